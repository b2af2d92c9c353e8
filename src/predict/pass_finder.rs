use std::ops::RangeInclusive;

use chrono::{DateTime, Duration, Utc};
use rand::Rng;

use crate::geometry::{compute_bearing, GeoPoint};
use crate::predict::types::PassRecord;

pub const DEFAULT_PASS_COUNT: usize = 3;
/// Upper bound on `count` accepted by the CLI and the default HTTP limit.
pub const DEFAULT_MAX_PASS_COUNT: usize = 32;
pub const PASS_INTERVAL_MINUTES: i64 = 90;

const DURATION_MINUTES: RangeInclusive<u32> = 3..=7;
const MAX_ELEVATION_DEG: RangeInclusive<u8> = 30..=74;
const TARGET_OFFSET_DEG: f64 = 10.0;

/// Simulate the next `count` passes over `observer`.
///
/// This is a placeholder model, not orbital propagation: passes are spaced
/// [`PASS_INTERVAL_MINUTES`] apart after `reference_time`, and duration,
/// direction and peak elevation are drawn from `rng`. The direction is the
/// bearing towards the observer's position shifted by up to 10° in latitude and
/// longitude; the peak elevation comes from its own range and does not use
/// [`crate::geometry::estimate_elevation`].
///
/// An unknown observer yields no passes. Generation stops early, without
/// panicking, once a pass would end past the latest representable time.
pub fn predict_passes<R: Rng + ?Sized>(
    observer: Option<&GeoPoint>,
    reference_time: DateTime<Utc>,
    count: usize,
    rng: &mut R,
) -> Vec<PassRecord> {
    let Some(observer) = observer else {
        log::debug!("observer location unknown, no passes predicted");
        return Vec::new();
    };

    let interval = Duration::minutes(PASS_INTERVAL_MINUTES);
    let longest = Duration::minutes(i64::from(*DURATION_MINUTES.end()));
    let mut passes = Vec::with_capacity(count.min(DEFAULT_MAX_PASS_COUNT));
    let mut start_time = reference_time;

    for _ in 0..count {
        match start_time
            .checked_add_signed(interval)
            .filter(|next| next.checked_add_signed(longest).is_some())
        {
            Some(next) => start_time = next,
            None => {
                log::warn!(
                    "stopping after {} passes, next pass would overflow the calendar",
                    passes.len()
                );
                break;
            }
        }

        let duration_minutes = rng.gen_range(DURATION_MINUTES);
        let target = observer.offset_unchecked(
            rng.gen_range(0.0..TARGET_OFFSET_DEG),
            rng.gen_range(0.0..TARGET_OFFSET_DEG),
        );
        let max_elevation_deg = rng.gen_range(MAX_ELEVATION_DEG);

        passes.push(PassRecord {
            start_time,
            duration_minutes,
            direction: compute_bearing(observer, &target),
            max_elevation_deg,
        });
    }

    log::debug!(
        "predicted {} passes for ({:.4}, {:.4}) after {}",
        passes.len(),
        observer.latitude_deg(),
        observer.longitude_deg(),
        reference_time
    );

    passes
}
