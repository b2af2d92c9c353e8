use utoipa::OpenApi;

use super::api::error::ErrorResponse;
use super::api::geometry::{BearingResponse, ElevationResponse};
use super::api::predict::PassesResponse;

#[derive(OpenApi)]
#[openapi(
    paths(
        super::api::predict::list_passes,
        super::api::predict::station_passes,
        super::api::geometry::bearing,
        super::api::geometry::elevation,
    ),
    components(
        schemas(
            PassesResponse,
            BearingResponse,
            ElevationResponse,
            ErrorResponse,
            crate::predict::PassRecord,
            crate::geometry::GeoPoint,
            crate::geometry::Direction,
        )
    ),
    info(
        title = "ISS Pass API",
        description = "Viewing direction, elevation estimates and simulated ISS pass predictions",
        version = "0.1.0"
    ),
    tags(
        (name = "passes", description = "Pass predictions"),
        (name = "geometry", description = "Bearing and elevation")
    )
)]
pub struct ApiDoc;
