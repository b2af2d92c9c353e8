use serde::Serialize;
use strum_macros::{Display, IntoStaticStr};
use utoipa::ToSchema;

use super::error::GeometryError;

/// A point on the Earth's surface in geodetic degrees.
///
/// Built through [`GeoPoint::new`], which rejects coordinates outside
/// `[-90, 90]` / `[-180, 180]` and non-finite values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, ToSchema)]
pub struct GeoPoint {
    latitude_deg: f64,
    longitude_deg: f64,
}

impl GeoPoint {
    pub fn new(latitude_deg: f64, longitude_deg: f64) -> Result<Self, GeometryError> {
        if !latitude_deg.is_finite() || !longitude_deg.is_finite() {
            return Err(GeometryError::NotFinite);
        }
        if !(-90.0..=90.0).contains(&latitude_deg) {
            return Err(GeometryError::LatitudeOutOfRange(latitude_deg));
        }
        if !(-180.0..=180.0).contains(&longitude_deg) {
            return Err(GeometryError::LongitudeOutOfRange(longitude_deg));
        }
        Ok(Self {
            latitude_deg,
            longitude_deg,
        })
    }

    /// Parses the `"lat, lon"` form used in config files and on the command line.
    pub fn from_coordinates(coordinates: &str) -> Result<Self, GeometryError> {
        let invalid = || GeometryError::InvalidCoordinates(coordinates.to_string());
        let parts: Vec<_> = coordinates.split(',').map(|s| s.trim()).collect();
        if parts.len() != 2 {
            return Err(invalid());
        }
        let lat = parts[0].parse().map_err(|_| invalid())?;
        let lon = parts[1].parse().map_err(|_| invalid())?;
        Self::new(lat, lon)
    }

    /// Shifts the point by the given offsets without range checking.
    ///
    /// The result may lie outside the valid coordinate ranges; the trigonometry in
    /// this crate is still defined for it.
    pub(crate) fn offset_unchecked(&self, dlat_deg: f64, dlon_deg: f64) -> Self {
        Self {
            latitude_deg: self.latitude_deg + dlat_deg,
            longitude_deg: self.longitude_deg + dlon_deg,
        }
    }

    pub fn latitude_deg(&self) -> f64 {
        self.latitude_deg
    }

    pub fn longitude_deg(&self) -> f64 {
        self.longitude_deg
    }

    pub fn lat_rad(&self) -> f64 {
        self.latitude_deg.to_radians()
    }

    pub fn lon_rad(&self) -> f64 {
        self.longitude_deg.to_radians()
    }
}

/// Compass direction bucketed into eight 45° sectors.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, ToSchema, Display, IntoStaticStr,
)]
pub enum Direction {
    #[serde(rename = "N")]
    #[strum(serialize = "N")]
    North,
    #[serde(rename = "NE")]
    #[strum(serialize = "NE")]
    NorthEast,
    #[serde(rename = "E")]
    #[strum(serialize = "E")]
    East,
    #[serde(rename = "SE")]
    #[strum(serialize = "SE")]
    SouthEast,
    #[serde(rename = "S")]
    #[strum(serialize = "S")]
    South,
    #[serde(rename = "SW")]
    #[strum(serialize = "SW")]
    SouthWest,
    #[serde(rename = "W")]
    #[strum(serialize = "W")]
    West,
    #[serde(rename = "NW")]
    #[strum(serialize = "NW")]
    NorthWest,
}

impl Direction {
    /// All directions in sector order, starting at north and going clockwise.
    pub const ALL: [Direction; 8] = [
        Direction::North,
        Direction::NorthEast,
        Direction::East,
        Direction::SouthEast,
        Direction::South,
        Direction::SouthWest,
        Direction::West,
        Direction::NorthWest,
    ];

    /// Buckets a bearing in degrees into the nearest of the eight sectors.
    ///
    /// Sectors are centred on multiples of 45°, so 22.5° rounds up to NE and
    /// 337.5° wraps around to N.
    pub fn from_bearing_deg(bearing_deg: f64) -> Self {
        let normalized = bearing_deg.rem_euclid(360.0);
        let index = (normalized / 45.0).round() as usize % 8;
        Self::ALL[index]
    }

    pub fn as_str(&self) -> &'static str {
        self.into()
    }
}
