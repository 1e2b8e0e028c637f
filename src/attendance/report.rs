//! Report shapes handed to the presentation layer

use std::collections::BTreeMap;

use chrono::{Duration, NaiveDate, NaiveTime};
use serde::Serialize;
use utoipa::ToSchema;

use crate::attendance::duration::{day_span, format_hms, group_by_day, total_span};
use crate::attendance::status::StatusThresholds;
use crate::model::attendance::{AttendanceRecord, AttendanceStatus};

const ZERO_HOURS: &str = "00:00:00";

fn format_time(time: Option<NaiveTime>) -> Option<String> {
    time.map(|t| t.format("%H:%M:%S").to_string())
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceView {
    #[schema(example = 42)]
    pub id: u64,
    #[schema(example = 7)]
    pub user_id: u64,
    #[schema(example = "2025-03-10", value_type = String, format = "date")]
    pub date: NaiveDate,
    #[schema(example = "09:00:00", nullable = true)]
    pub check_in_time: Option<String>,
    #[schema(example = "17:45:00", nullable = true)]
    pub check_out_time: Option<String>,
    pub status: AttendanceStatus,
    #[schema(example = "08:45:00", nullable = true)]
    pub working_hours: Option<String>,
}

impl From<&AttendanceRecord> for AttendanceView {
    fn from(record: &AttendanceRecord) -> Self {
        Self {
            id: record.id,
            user_id: record.user_id,
            date: record.attendance_date,
            check_in_time: format_time(record.check_in_time),
            check_out_time: format_time(record.check_out_time),
            status: record.status,
            working_hours: record.working_hours.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TodayReport {
    #[schema(example = "08:45:00")]
    pub working_hours: String,
    pub attendances: Vec<AttendanceView>,
}

impl TodayReport {
    pub fn empty() -> Self {
        Self {
            working_hours: ZERO_HOURS.to_string(),
            attendances: Vec::new(),
        }
    }

    pub fn build(records: &[AttendanceRecord]) -> Self {
        Self {
            working_hours: format_hms(day_span(records)),
            attendances: records.iter().map(AttendanceView::from).collect(),
        }
    }
}

/// One calendar day of one user
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DaySummary {
    #[schema(example = "2025-03-10", value_type = String, format = "date")]
    pub date: NaiveDate,
    #[schema(example = "08:45:00")]
    pub working_hours: String,
    pub status: AttendanceStatus,
    pub attendances: Vec<AttendanceView>,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserAttendanceReport {
    #[schema(example = "12:30:00")]
    pub total_working_hours: String,
    pub days: Vec<DaySummary>,
    pub attendances: Vec<AttendanceView>,
}

impl UserAttendanceReport {
    pub fn empty() -> Self {
        Self {
            total_working_hours: ZERO_HOURS.to_string(),
            days: Vec::new(),
            attendances: Vec::new(),
        }
    }

    pub fn build(records: &[AttendanceRecord], thresholds: &StatusThresholds) -> Self {
        Self {
            total_working_hours: format_hms(total_span(records)),
            days: summarize_days(records, thresholds)
                .into_iter()
                .map(|(_, _, day)| day)
                .collect(),
            attendances: records.iter().map(AttendanceView::from).collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserDaysReport {
    #[schema(example = 7)]
    pub user_id: u64,
    #[schema(example = "12:30:00")]
    pub total_working_hours: String,
    pub days: Vec<DaySummary>,
}

/// Per-user reports over a store-wide record set, in user order.
pub fn build_all_users(
    records: &[AttendanceRecord],
    thresholds: &StatusThresholds,
) -> Vec<UserDaysReport> {
    let mut users: BTreeMap<u64, (Vec<DaySummary>, Duration)> = BTreeMap::new();

    for (user_id, worked, day) in summarize_days(records, thresholds) {
        let (days, total) = users
            .entry(user_id)
            .or_insert_with(|| (Vec::new(), Duration::zero()));
        days.push(day);
        *total = *total + worked;
    }

    users
        .into_iter()
        .map(|(user_id, (days, total))| UserDaysReport {
            user_id,
            total_working_hours: format_hms(total),
            days,
        })
        .collect()
}

/// One entry per `(user_id, date)` group, ordered by user then date.
fn summarize_days(
    records: &[AttendanceRecord],
    thresholds: &StatusThresholds,
) -> Vec<(u64, Duration, DaySummary)> {
    group_by_day(records)
        .into_iter()
        .map(|((user_id, date), day)| {
            let worked = day_span(day.iter().copied());
            let summary = DaySummary {
                date,
                working_hours: format_hms(worked),
                status: thresholds.classify_day(day.iter().copied(), worked),
                attendances: day.iter().copied().map(AttendanceView::from).collect(),
            };
            (user_id, worked, summary)
        })
        .collect()
}
