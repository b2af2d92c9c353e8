use axum::{
    extract::{Query, State},
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::clock::reference_time;
use crate::geometry::GeoPoint;
use crate::predict::PassRecord;
use crate::web::api::error::{ApiError, ApiResult, ErrorResponse};
use crate::web::state::AppState;

pub const OBSERVER_UNKNOWN: &str =
    "Observer location unknown, enable location services to see pass predictions";
pub const NO_PASSES: &str = "No upcoming visible passes";

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct PassesQuery {
    pub lat: Option<f64>,
    pub lon: Option<f64>,
    #[serde(default)]
    pub count: Option<usize>,
    /// Reference time expression (`now`, `T+2h`, RFC3339)
    #[serde(default)]
    pub at: Option<String>,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct StationPassesQuery {
    #[serde(default)]
    pub count: Option<usize>,
    #[serde(default)]
    pub at: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PassesResponse {
    pub observer: Option<GeoPoint>,
    pub reference_time: DateTime<Utc>,
    pub passes: Vec<PassRecord>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

#[utoipa::path(
    get,
    path = "/api/passes",
    tag = "passes",
    params(
        ("lat" = Option<f64>, Query, description = "Observer latitude (degrees)"),
        ("lon" = Option<f64>, Query, description = "Observer longitude (degrees)"),
        ("count" = Option<usize>, Query, description = "Number of passes"),
        ("at" = Option<String>, Query, description = "Reference time (now, T+2h, RFC3339)")
    ),
    responses(
        (status = 200, description = "Pass predictions", body = PassesResponse),
        (status = 400, description = "Invalid parameters", body = ErrorResponse)
    )
)]
pub async fn list_passes(
    State(state): State<AppState>,
    Query(query): Query<PassesQuery>,
) -> ApiResult<Json<PassesResponse>> {
    // Both coordinates are needed before the observer counts as known
    let observer = match (query.lat, query.lon) {
        (Some(lat), Some(lon)) => Some(GeoPoint::new(lat, lon)?),
        _ => None,
    };

    respond(&state, observer, query.count, query.at.as_deref()).map(Json)
}

#[utoipa::path(
    get,
    path = "/api/station/passes",
    tag = "passes",
    params(
        ("count" = Option<usize>, Query, description = "Number of passes"),
        ("at" = Option<String>, Query, description = "Reference time (now, T+2h, RFC3339)")
    ),
    responses(
        (status = 200, description = "Pass predictions for the configured station", body = PassesResponse),
        (status = 400, description = "Invalid parameters", body = ErrorResponse)
    )
)]
pub async fn station_passes(
    State(state): State<AppState>,
    Query(query): Query<StationPassesQuery>,
) -> ApiResult<Json<PassesResponse>> {
    let observer = state.station;
    respond(&state, observer, query.count, query.at.as_deref()).map(Json)
}

fn respond(
    state: &AppState,
    observer: Option<GeoPoint>,
    count: Option<usize>,
    at: Option<&str>,
) -> ApiResult<PassesResponse> {
    let limits = &state.config.predict;
    let count = count.unwrap_or(limits.default_count);
    if count == 0 || count > limits.max_count {
        return Err(ApiError::Validation(format!(
            "count must be between 1 and {}",
            limits.max_count
        )));
    }

    let reference_time = reference_time(at, state.clock.as_ref())?;
    let passes = state.predict(observer.as_ref(), reference_time, count);

    let message = if observer.is_none() {
        Some(OBSERVER_UNKNOWN.to_string())
    } else if passes.is_empty() {
        Some(NO_PASSES.to_string())
    } else {
        None
    };

    Ok(PassesResponse {
        observer,
        reference_time,
        passes,
        message,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use crate::web::config::Config;
    use chrono::{Duration, TimeZone};
    use std::sync::Arc;

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 5, 1, 20, 0, 0).unwrap()
    }

    fn state(yaml: &str) -> AppState {
        let config = Config::from_yaml(yaml).unwrap();
        AppState::with_clock(config, Arc::new(FixedClock(t0()))).unwrap()
    }

    fn query(lat: Option<f64>, lon: Option<f64>) -> PassesQuery {
        PassesQuery {
            lat,
            lon,
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn missing_coordinate_means_unknown_observer() {
        let state = state("predict:\n  seed: 1\n");
        for q in [query(None, None), query(Some(40.0), None), query(None, Some(-74.0))] {
            let Json(resp) = list_passes(State(state.clone()), Query(q)).await.unwrap();
            assert!(resp.observer.is_none());
            assert!(resp.passes.is_empty());
            assert_eq!(resp.message.as_deref(), Some(OBSERVER_UNKNOWN));
        }
    }

    #[tokio::test]
    async fn predicts_default_count_from_clock() {
        let state = state("predict:\n  seed: 1\n");
        let Json(resp) = list_passes(State(state), Query(query(Some(40.7128), Some(-74.006))))
            .await
            .unwrap();

        assert_eq!(resp.reference_time, t0());
        assert_eq!(resp.passes.len(), 3);
        assert_eq!(resp.passes[0].start_time, t0() + Duration::minutes(90));
        assert!(resp.message.is_none());
    }

    #[tokio::test]
    async fn honours_count_and_reference_time() {
        let state = state("predict:\n  seed: 1\n");
        let q = PassesQuery {
            lat: Some(51.5),
            lon: Some(-0.12),
            count: Some(6),
            at: Some("T+1h".into()),
        };
        let Json(resp) = list_passes(State(state), Query(q)).await.unwrap();

        assert_eq!(resp.reference_time, t0() + Duration::hours(1));
        assert_eq!(resp.passes.len(), 6);
        assert_eq!(
            resp.passes[5].start_time,
            t0() + Duration::hours(1) + Duration::minutes(540)
        );
    }

    #[tokio::test]
    async fn rejects_invalid_input() {
        let state = state("predict:\n  max_count: 4\n");

        let bad_lat = list_passes(State(state.clone()), Query(query(Some(91.0), Some(0.0)))).await;
        assert!(matches!(bad_lat, Err(ApiError::Validation(_))));

        let too_many = PassesQuery {
            count: Some(5),
            ..query(Some(0.0), Some(0.0))
        };
        assert!(list_passes(State(state.clone()), Query(too_many)).await.is_err());

        let zero = PassesQuery {
            count: Some(0),
            ..query(Some(0.0), Some(0.0))
        };
        assert!(list_passes(State(state.clone()), Query(zero)).await.is_err());

        let bad_time = PassesQuery {
            at: Some("whenever".into()),
            ..query(Some(0.0), Some(0.0))
        };
        assert!(list_passes(State(state), Query(bad_time)).await.is_err());
    }

    #[tokio::test]
    async fn far_reference_time_is_a_validation_error() {
        let state = state("{}");
        for at in ["T+300000years", "2026-01-01T00:00:00Z + 300000years"] {
            let q = PassesQuery {
                at: Some(at.into()),
                ..query(Some(40.7128), Some(-74.006))
            };
            let err = list_passes(State(state.clone()), Query(q)).await.unwrap_err();
            assert!(matches!(err, ApiError::Validation(_)), "{at}");
        }
    }

    #[tokio::test]
    async fn seeded_states_agree() {
        let yaml = "predict:\n  seed: 1234\n";
        let a = list_passes(State(state(yaml)), Query(query(Some(10.0), Some(20.0))))
            .await
            .unwrap();
        let b = list_passes(State(state(yaml)), Query(query(Some(10.0), Some(20.0))))
            .await
            .unwrap();
        assert_eq!(a.0.passes, b.0.passes);
    }

    #[tokio::test]
    async fn station_endpoint_uses_configured_station() {
        let configured = state("station:\n  coordinates: \"40.7128, -74.0060\"\n");
        let Json(resp) = station_passes(State(configured), Query(StationPassesQuery::default()))
            .await
            .unwrap();
        assert_eq!(resp.observer, GeoPoint::new(40.7128, -74.006).ok());
        assert_eq!(resp.passes.len(), 3);

        let unconfigured = state("{}");
        let Json(resp) = station_passes(State(unconfigured), Query(StationPassesQuery::default()))
            .await
            .unwrap();
        assert!(resp.passes.is_empty());
        assert_eq!(resp.message.as_deref(), Some(OBSERVER_UNKNOWN));
    }
}
