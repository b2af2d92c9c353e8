//! Wall-clock access and reference-time expressions.

use chrono::{DateTime, Duration, Utc};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClockError {
    #[error("invalid time expression '{0}': {1}")]
    InvalidExpression(String, String),
    #[error("{0} shifted by {1} is out of range")]
    OutOfRange(DateTime<Utc>, Duration),
}

pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A clock frozen at a single instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// When to predict from: now, relative to now, or an absolute instant.
#[derive(Debug, Clone, PartialEq)]
pub enum TimeExpr {
    Relative(Duration),
    Absolute(DateTime<Utc>),
}

impl TimeExpr {
    /// Accepted forms:
    /// - `now`
    /// - `T+2h`, `T-15m` (relative to now)
    /// - `2026-01-12T10:00:00Z`
    /// - `2026-01-12T10:00:00Z + 10m`
    pub fn parse(s: &str) -> Result<Self, ClockError> {
        parse_time(s).map_err(|e| ClockError::InvalidExpression(s.to_string(), e))
    }

    pub fn resolve(&self, now: DateTime<Utc>) -> Result<DateTime<Utc>, ClockError> {
        match self {
            TimeExpr::Relative(d) => now
                .checked_add_signed(*d)
                .ok_or(ClockError::OutOfRange(now, *d)),
            TimeExpr::Absolute(dt) => Ok(*dt),
        }
    }
}

/// Reference time for an optional expression, defaulting to the clock's now.
pub fn reference_time(
    expr: Option<&str>,
    clock: &dyn Clock,
) -> Result<DateTime<Utc>, ClockError> {
    let now = clock.now();
    match expr {
        Some(s) => TimeExpr::parse(s)?.resolve(now),
        None => Ok(now),
    }
}

fn parse_time(s: &str) -> Result<TimeExpr, String> {
    let s = s.trim();

    if s.eq_ignore_ascii_case("now") {
        return Ok(TimeExpr::Relative(Duration::zero()));
    }

    if s.to_lowercase().starts_with('t') {
        return parse_offset(&s[1..]).map(TimeExpr::Relative);
    }

    // RFC3339 base followed by an offset, e.g. "2026-01-12T10:00:00Z - 10s"
    if let Some(idx) = s.rfind(['+', '-']).filter(|&idx| idx > 10) {
        if let Ok(base) = DateTime::parse_from_rfc3339(s[..idx].trim()) {
            let base = base.with_timezone(&Utc);
            let offset = parse_offset(&s[idx..])?;
            return base
                .checked_add_signed(offset)
                .map(TimeExpr::Absolute)
                .ok_or_else(|| format!("{} shifted by {} is out of range", base, offset));
        }
    }

    DateTime::parse_from_rfc3339(s)
        .map(|dt| TimeExpr::Absolute(dt.with_timezone(&Utc)))
        .map_err(|e| e.to_string())
}

/// `+90m`, `-5s` or an unsigned `2h`.
fn parse_offset(s: &str) -> Result<Duration, String> {
    let s = s.trim();
    let (neg, rest) = match s.strip_prefix('-') {
        Some(r) => (true, r),
        None => (false, s.strip_prefix('+').unwrap_or(s)),
    };
    let dur = humantime::parse_duration(rest.trim())
        .map_err(|e| e.to_string())
        .and_then(|d| Duration::from_std(d).map_err(|e| e.to_string()))?;
    Ok(if neg { -dur } else { dur })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 1, 12, 10, 0, 0).unwrap()
    }

    #[test]
    fn now_and_relative() {
        let clock = FixedClock(t0());
        assert_eq!(reference_time(None, &clock).unwrap(), t0());
        assert_eq!(reference_time(Some("now"), &clock).unwrap(), t0());
        assert_eq!(
            reference_time(Some("T+2h"), &clock).unwrap(),
            t0() + Duration::hours(2)
        );
        assert_eq!(
            reference_time(Some("t-15m"), &clock).unwrap(),
            t0() - Duration::minutes(15)
        );
    }

    #[test]
    fn absolute() {
        assert_eq!(
            TimeExpr::parse("2026-01-12T10:00:00Z").unwrap(),
            TimeExpr::Absolute(t0())
        );
        assert_eq!(
            TimeExpr::parse("2026-01-12T12:00:00+02:00").unwrap(),
            TimeExpr::Absolute(t0())
        );
    }

    #[test]
    fn absolute_with_offset() {
        assert_eq!(
            TimeExpr::parse("2026-01-12T10:00:00Z + 10m").unwrap(),
            TimeExpr::Absolute(t0() + Duration::minutes(10))
        );
        assert_eq!(
            TimeExpr::parse("2026-01-12T10:00:00Z - 30s").unwrap(),
            TimeExpr::Absolute(t0() - Duration::seconds(30))
        );
    }

    #[test]
    fn far_offsets_are_errors() {
        let clock = FixedClock(Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap());
        assert!(matches!(
            reference_time(Some("T+300000years"), &clock),
            Err(ClockError::OutOfRange(_, _))
        ));
        assert!(matches!(
            reference_time(Some("T-300000years"), &clock),
            Err(ClockError::OutOfRange(_, _))
        ));
        assert!(matches!(
            TimeExpr::parse("2026-01-12T10:00:00Z + 300000years"),
            Err(ClockError::InvalidExpression(_, _))
        ));
    }

    #[test]
    fn rejects_garbage() {
        assert!(TimeExpr::parse("tomorrow-ish").is_err());
        assert!(TimeExpr::parse("yesterday").is_err());
        assert!(TimeExpr::parse("T+soon").is_err());
    }
}
