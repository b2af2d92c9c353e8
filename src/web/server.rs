use axum::{routing::get, Router};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use super::api::geometry as geometry_handlers;
use super::api::predict as predict_handlers;
use super::api_doc::ApiDoc;
use super::config::Config;
use super::state::AppState;

pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Predict API endpoints
        .route("/api/passes", get(predict_handlers::list_passes))
        .route("/api/station/passes", get(predict_handlers::station_passes))
        // Geometry API endpoints
        .route("/api/bearing", get(geometry_handlers::bearing))
        .route("/api/elevation", get(geometry_handlers::elevation))
        // OpenAPI / Swagger
        .merge(SwaggerUi::new("/swagger-ui").url("/api-doc/openapi.json", ApiDoc::openapi()))
        // Middleware
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn run_server(config: Config) -> std::io::Result<()> {
    let bind_addr = config.web.bind.clone();
    let state = AppState::new(config).map_err(std::io::Error::other)?;

    match (&state.station, &state.config.station) {
        (Some(point), Some(station)) => log::info!(
            "Default observer {} at ({:.4}, {:.4})",
            station.name.as_deref().unwrap_or("station"),
            point.latitude_deg(),
            point.longitude_deg()
        ),
        _ => log::info!("No default observer configured"),
    }

    let app = router(state);

    log::info!("Starting server on {}", bind_addr);

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    axum::serve(listener, app).await
}
