//! Duration aggregator
//!
//! A day's working duration is the span from its earliest check-in to its
//! latest check-out. Gaps between sessions count as worked time. Multi-day
//! totals sum those per-day spans.

use std::collections::BTreeMap;

use chrono::{Duration, NaiveDate, NaiveTime};

use crate::model::attendance::AttendanceRecord;

/// Span of one day's activity: `max(check_out) - min(check_in)` over the
/// records that have both ends. Zero when none does.
pub fn day_span<'a, I>(records: I) -> Duration
where
    I: IntoIterator<Item = &'a AttendanceRecord>,
{
    let mut first_in = None;
    let mut last_out = None;

    for record in records {
        if let (Some(check_in), Some(check_out)) = (record.check_in_time, record.check_out_time) {
            first_in = Some(first_in.map_or(check_in, |t: NaiveTime| t.min(check_in)));
            last_out = Some(last_out.map_or(check_out, |t: NaiveTime| t.max(check_out)));
        }
    }

    match (first_in, last_out) {
        (Some(first_in), Some(last_out)) => (last_out - first_in).max(Duration::zero()),
        _ => Duration::zero(),
    }
}

/// Group records by `(user_id, date)`, keeping each group's input order.
pub fn group_by_day(
    records: &[AttendanceRecord],
) -> BTreeMap<(u64, NaiveDate), Vec<&AttendanceRecord>> {
    let mut groups: BTreeMap<_, Vec<_>> = BTreeMap::new();
    for record in records {
        groups
            .entry((record.user_id, record.attendance_date))
            .or_default()
            .push(record);
    }
    groups
}

/// Sum of per-day spans across every `(user_id, date)` group in the set.
pub fn total_span(records: &[AttendanceRecord]) -> Duration {
    group_by_day(records)
        .values()
        .map(|day| day_span(day.iter().copied()))
        .fold(Duration::zero(), |acc, d| acc + d)
}

/// `hh:mm:ss`; hours are not folded into days, so long totals read `27:15:00`.
pub fn format_hms(duration: Duration) -> String {
    let secs = duration.num_seconds().max(0);
    format!("{:02}:{:02}:{:02}", secs / 3600, (secs % 3600) / 60, secs % 60)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::attendance::NewAttendance;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, d).unwrap()
    }

    fn at(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    fn session(
        id: u64,
        user: u64,
        d: u32,
        from: NaiveTime,
        to: Option<NaiveTime>,
    ) -> AttendanceRecord {
        let mut r = NewAttendance::check_in(user, day(d), from).with_id(id);
        r.check_out_time = to;
        r
    }

    #[test]
    fn test_span_covers_gap_between_sessions() {
        let records = vec![
            session(1, 1, 10, at(9, 0), Some(at(12, 0))),
            session(2, 1, 10, at(13, 30), Some(at(17, 45))),
        ];

        assert_eq!(format_hms(day_span(&records)), "08:45:00");
    }

    #[test]
    fn test_span_ignores_open_session() {
        let records = vec![
            session(1, 1, 10, at(9, 0), Some(at(11, 30))),
            session(2, 1, 10, at(7, 0), None),
        ];

        assert_eq!(format_hms(day_span(&records)), "02:30:00");
    }

    #[test]
    fn test_span_zero_without_complete_session() {
        let records = vec![
            session(1, 1, 10, at(9, 0), None),
            NewAttendance::absent_marker(1, day(10)).with_id(2),
        ];

        assert_eq!(day_span(&records), Duration::zero());
        assert_eq!(format_hms(day_span(&Vec::<AttendanceRecord>::new())), "00:00:00");
    }

    #[test]
    fn test_total_sums_days() {
        let records = vec![
            session(1, 1, 10, at(9, 0), Some(at(17, 0))),
            session(2, 1, 11, at(9, 0), Some(at(11, 0))),
            session(3, 1, 11, at(12, 0), Some(at(13, 30))),
        ];

        assert_eq!(format_hms(total_span(&records)), "12:30:00");
    }

    #[test]
    fn test_total_keeps_users_apart() {
        // one span per (user, date): user 2's late checkout must not stretch user 1's day
        let records = vec![
            session(1, 1, 10, at(9, 0), Some(at(10, 0))),
            session(2, 2, 10, at(9, 0), Some(at(18, 0))),
        ];

        assert_eq!(format_hms(total_span(&records)), "10:00:00");
    }

    #[test]
    fn test_format_does_not_wrap_at_a_day() {
        assert_eq!(format_hms(Duration::seconds(27 * 3600 + 15 * 60)), "27:15:00");
        assert_eq!(format_hms(Duration::seconds(59)), "00:00:59");
        assert_eq!(format_hms(Duration::seconds(-5)), "00:00:00");
    }

    #[test]
    fn test_group_by_day_keeps_input_order() {
        let records = vec![
            session(1, 1, 11, at(9, 0), None),
            session(2, 1, 10, at(9, 0), None),
            session(3, 1, 10, at(13, 0), None),
        ];

        let groups = group_by_day(&records);
        let keys: Vec<_> = groups.keys().copied().collect();
        assert_eq!(keys, vec![(1, day(10)), (1, day(11))]);
        let ids: Vec<_> = groups[&(1, day(10))].iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![2, 3]);
    }
}
