use axum::{extract::Query, Json};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::geometry::{
    compute_bearing, estimate_elevation, great_circle_distance_km, initial_bearing_deg,
    Direction, GeoPoint,
};
use crate::web::api::error::{ApiResult, ErrorResponse};

#[derive(Debug, Deserialize, ToSchema)]
pub struct PairQuery {
    pub from_lat: f64,
    pub from_lon: f64,
    pub to_lat: f64,
    pub to_lon: f64,
}

impl PairQuery {
    fn points(&self) -> ApiResult<(GeoPoint, GeoPoint)> {
        Ok((
            GeoPoint::new(self.from_lat, self.from_lon)?,
            GeoPoint::new(self.to_lat, self.to_lon)?,
        ))
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct BearingResponse {
    pub bearing_deg: f64,
    pub direction: Direction,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ElevationResponse {
    pub distance_km: f64,
    pub elevation_deg: u8,
}

#[utoipa::path(
    get,
    path = "/api/bearing",
    tag = "geometry",
    params(
        ("from_lat" = f64, Query, description = "Origin latitude"),
        ("from_lon" = f64, Query, description = "Origin longitude"),
        ("to_lat" = f64, Query, description = "Target latitude"),
        ("to_lon" = f64, Query, description = "Target longitude")
    ),
    responses(
        (status = 200, description = "Viewing direction", body = BearingResponse),
        (status = 400, description = "Invalid coordinates", body = ErrorResponse)
    )
)]
pub async fn bearing(Query(query): Query<PairQuery>) -> ApiResult<Json<BearingResponse>> {
    let (origin, target) = query.points()?;
    Ok(Json(BearingResponse {
        bearing_deg: round2(initial_bearing_deg(&origin, &target)),
        direction: compute_bearing(&origin, &target),
    }))
}

#[utoipa::path(
    get,
    path = "/api/elevation",
    tag = "geometry",
    params(
        ("from_lat" = f64, Query, description = "Observer latitude"),
        ("from_lon" = f64, Query, description = "Observer longitude"),
        ("to_lat" = f64, Query, description = "Sub-satellite latitude"),
        ("to_lon" = f64, Query, description = "Sub-satellite longitude")
    ),
    responses(
        (status = 200, description = "Estimated elevation", body = ElevationResponse),
        (status = 400, description = "Invalid coordinates", body = ErrorResponse)
    )
)]
pub async fn elevation(Query(query): Query<PairQuery>) -> ApiResult<Json<ElevationResponse>> {
    let (origin, target) = query.points()?;
    Ok(Json(ElevationResponse {
        distance_km: round2(great_circle_distance_km(&origin, &target)),
        elevation_deg: estimate_elevation(&origin, &target),
    }))
}

fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}
