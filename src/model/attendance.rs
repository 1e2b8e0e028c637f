use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};
use utoipa::ToSchema;

#[derive(
    Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize, Display, EnumString, ToSchema,
)]
pub enum AttendanceStatus {
    Pending,
    Present,
    HalfDay,
    Absent,
}

impl TryFrom<String> for AttendanceStatus {
    type Error = strum::ParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// One check-in/check-out session attempt, as stored in the `attendance` table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct AttendanceRecord {
    pub id: u64,
    pub user_id: u64,
    pub attendance_date: NaiveDate,
    pub check_in_time: Option<NaiveTime>,
    /// `None` while the session is still open
    pub check_out_time: Option<NaiveTime>,
    #[sqlx(try_from = "String")]
    pub status: AttendanceStatus,
    pub working_hours: Option<String>,
}

impl AttendanceRecord {
    /// A session that was checked into and is still waiting for its checkout.
    /// Absent markers and force-closed sessions never count as open.
    pub fn is_open(&self) -> bool {
        self.check_out_time.is_none() && self.status == AttendanceStatus::Pending
    }

    /// Both ends known, so the record contributes to the day's span.
    pub fn is_complete(&self) -> bool {
        self.check_in_time.is_some() && self.check_out_time.is_some()
    }
}

/// A record before the store has assigned its identity.
#[derive(Debug, Clone, PartialEq)]
pub struct NewAttendance {
    pub user_id: u64,
    pub attendance_date: NaiveDate,
    pub check_in_time: Option<NaiveTime>,
    pub check_out_time: Option<NaiveTime>,
    pub status: AttendanceStatus,
    pub working_hours: Option<String>,
}

impl NewAttendance {
    pub fn check_in(user_id: u64, date: NaiveDate, at: NaiveTime) -> Self {
        Self {
            user_id,
            attendance_date: date,
            check_in_time: Some(at),
            check_out_time: None,
            status: AttendanceStatus::Pending,
            working_hours: None,
        }
    }

    pub fn absent_marker(user_id: u64, date: NaiveDate) -> Self {
        Self {
            user_id,
            attendance_date: date,
            check_in_time: None,
            check_out_time: None,
            status: AttendanceStatus::Absent,
            working_hours: Some("00:00:00".to_string()),
        }
    }

    pub fn with_id(self, id: u64) -> AttendanceRecord {
        AttendanceRecord {
            id,
            user_id: self.user_id,
            attendance_date: self.attendance_date,
            check_in_time: self.check_in_time,
            check_out_time: self.check_out_time,
            status: self.status,
            working_hours: self.working_hours,
        }
    }
}
