use super::types::GeoPoint;

pub const EARTH_RADIUS_KM: f64 = 6371.0;
/// Mean ISS altitude assumed for elevation estimates.
pub const ISS_ALTITUDE_KM: f64 = 408.0;

/// Great-circle surface distance via the spherical law of cosines.
pub fn great_circle_distance_km(origin: &GeoPoint, target: &GeoPoint) -> f64 {
    let lat1 = origin.lat_rad();
    let lat2 = target.lat_rad();
    let dlon = target.lon_rad() - origin.lon_rad();

    // Rounding can push the cosine just past 1.0 for coincident points.
    let cos_angle =
        (lat1.sin() * lat2.sin() + lat1.cos() * lat2.cos() * dlon.cos()).clamp(-1.0, 1.0);
    cos_angle.acos() * EARTH_RADIUS_KM
}

/// Approximate elevation angle, in whole degrees, of a satellite at
/// [`ISS_ALTITUDE_KM`] above `target` as seen from `origin`.
///
/// Treats surface distance and altitude as the legs of a flat right triangle.
/// This is not a line-of-sight horizon computation.
pub fn estimate_elevation(origin: &GeoPoint, target: &GeoPoint) -> u8 {
    let distance = great_circle_distance_km(origin, target);
    ISS_ALTITUDE_KM.atan2(distance).to_degrees().round() as u8
}
