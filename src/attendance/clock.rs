//! Clock/calendar adapter
//!
//! The only source of "now" for the engine. Wall-clock time is resolved in the
//! organisation's fixed civil zone, whatever zone the server itself runs in, and
//! the civil date it yields is the partition key for a day's attendance.

use anyhow::{Context, Result, bail};
use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, Utc};

pub trait Clock: Send + Sync {
    /// Current wall-clock date and time in the organisation's zone
    fn now(&self) -> NaiveDateTime;

    fn today(&self) -> NaiveDate {
        self.now().date()
    }
}

/// System clock pinned to a fixed UTC offset
#[derive(Debug, Clone, Copy)]
pub struct ZonedClock {
    offset: FixedOffset,
}

impl ZonedClock {
    pub fn new(offset: FixedOffset) -> Self {
        Self { offset }
    }

    pub fn offset(&self) -> FixedOffset {
        self.offset
    }

    /// Civil time in this zone at the given instant
    pub fn civil_time(&self, instant: DateTime<Utc>) -> NaiveDateTime {
        instant.with_timezone(&self.offset).naive_local()
    }
}

impl Clock for ZonedClock {
    fn now(&self) -> NaiveDateTime {
        self.civil_time(Utc::now())
    }
}

/// Clock frozen at a single instant
#[cfg(test)]
#[derive(Debug, Clone, Copy)]
pub struct FixedClock {
    at: NaiveDateTime,
}

#[cfg(test)]
impl FixedClock {
    pub fn new(at: NaiveDateTime) -> Self {
        Self { at }
    }

    pub fn at(date: NaiveDate, time: NaiveTime) -> Self {
        Self::new(date.and_time(time))
    }
}

#[cfg(test)]
impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.at
    }
}

/// Parse an offset written as `+HH:MM` / `-HH:MM` (`Z` is accepted for UTC).
pub fn parse_utc_offset(raw: &str) -> Result<FixedOffset> {
    let raw = raw.trim();
    if raw.eq_ignore_ascii_case("z") {
        return FixedOffset::east_opt(0).context("zero offset");
    }

    let (sign, rest) = match raw.split_at_checked(1) {
        Some(("+", rest)) => (1, rest),
        Some(("-", rest)) => (-1, rest),
        _ => bail!("UTC offset must start with '+' or '-': {raw:?}"),
    };

    let (hours, minutes) = rest
        .split_once(':')
        .with_context(|| format!("UTC offset must look like +HH:MM: {raw:?}"))?;
    let hours: i32 = hours
        .parse()
        .with_context(|| format!("invalid offset hours in {raw:?}"))?;
    let minutes: i32 = minutes
        .parse()
        .with_context(|| format!("invalid offset minutes in {raw:?}"))?;

    if !(0..=23).contains(&hours) || !(0..=59).contains(&minutes) {
        bail!("UTC offset out of range: {raw:?}");
    }

    FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60))
        .with_context(|| format!("UTC offset out of range: {raw:?}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_parse_offsets() {
        assert_eq!(parse_utc_offset("+06:00").unwrap().local_minus_utc(), 6 * 3600);
        assert_eq!(
            parse_utc_offset("-03:30").unwrap().local_minus_utc(),
            -(3 * 3600 + 30 * 60)
        );
        assert_eq!(parse_utc_offset("Z").unwrap().local_minus_utc(), 0);
        assert_eq!(parse_utc_offset(" +00:00 ").unwrap().local_minus_utc(), 0);
    }

    #[test]
    fn test_parse_offsets_rejects_garbage() {
        for raw in ["", "06:00", "+6", "+24:00", "+05:60", "+ab:cd", "UTC"] {
            assert!(parse_utc_offset(raw).is_err(), "{raw:?} should be rejected");
        }
    }

    #[test]
    fn test_civil_date_follows_zone_not_utc() {
        // 20:30 UTC is already the next morning in UTC+06:00
        let clock = ZonedClock::new(parse_utc_offset("+06:00").unwrap());
        let instant = Utc.with_ymd_and_hms(2025, 3, 10, 20, 30, 0).unwrap();

        let civil = clock.civil_time(instant);
        assert_eq!(civil.date(), NaiveDate::from_ymd_opt(2025, 3, 11).unwrap());
        assert_eq!(civil.time(), NaiveTime::from_hms_opt(2, 30, 0).unwrap());
    }

    #[test]
    fn test_west_of_utc_stays_on_previous_day() {
        let clock = ZonedClock::new(parse_utc_offset("-05:00").unwrap());
        let instant = Utc.with_ymd_and_hms(2025, 3, 11, 3, 0, 0).unwrap();

        assert_eq!(
            clock.civil_time(instant).date(),
            NaiveDate::from_ymd_opt(2025, 3, 10).unwrap()
        );
    }

    #[test]
    fn test_fixed_clock() {
        let date = NaiveDate::from_ymd_opt(2025, 3, 10).unwrap();
        let time = NaiveTime::from_hms_opt(9, 15, 0).unwrap();
        let clock: Box<dyn Clock> = Box::new(FixedClock::at(date, time));

        assert_eq!(clock.today(), date);
        assert_eq!(clock.now().time(), time);
    }
}
