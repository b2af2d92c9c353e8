use super::types::{Direction, GeoPoint};

/// Initial great-circle bearing from `origin` to `target`, in degrees `[0, 360)`.
///
/// Identical points yield 0°.
pub fn initial_bearing_deg(origin: &GeoPoint, target: &GeoPoint) -> f64 {
    let lat1 = origin.lat_rad();
    let lat2 = target.lat_rad();
    let dlon = target.lon_rad() - origin.lon_rad();

    let y = dlon.sin() * lat2.cos();
    let x = lat1.cos() * lat2.sin() - lat1.sin() * lat2.cos() * dlon.cos();
    y.atan2(x).to_degrees().rem_euclid(360.0)
}

/// Viewing direction from `origin` towards `target`.
pub fn compute_bearing(origin: &GeoPoint, target: &GeoPoint) -> Direction {
    Direction::from_bearing_deg(initial_bearing_deg(origin, target))
}
