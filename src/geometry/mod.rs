mod bearing;
mod elevation;
mod error;
mod types;

pub use bearing::{compute_bearing, initial_bearing_deg};
pub use elevation::{estimate_elevation, great_circle_distance_km, EARTH_RADIUS_KM, ISS_ALTITUDE_KM};
pub use error::GeometryError;
pub use types::{Direction, GeoPoint};
