use chrono::{DateTime, Duration, Utc};
use serde::Serialize;
use utoipa::ToSchema;

use crate::geometry::Direction;

/// A predicted visibility window
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct PassRecord {
    pub start_time: DateTime<Utc>,
    pub duration_minutes: u32,
    pub direction: Direction,
    pub max_elevation_deg: u8,
}

impl PassRecord {
    pub fn end_time(&self) -> DateTime<Utc> {
        self.start_time + Duration::minutes(i64::from(self.duration_minutes))
    }
}
