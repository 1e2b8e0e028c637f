//! Status classifier

use anyhow::{Result, bail};
use chrono::Duration;

use crate::model::attendance::{AttendanceRecord, AttendanceStatus};

/// Lower bounds of `HalfDay` and `Present`; anything shorter is `Absent`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusThresholds {
    half_day: Duration,
    full_day: Duration,
}

impl Default for StatusThresholds {
    fn default() -> Self {
        Self {
            half_day: Duration::hours(4),
            full_day: Duration::hours(8),
        }
    }
}

impl StatusThresholds {
    pub fn from_hours(half_day: i64, full_day: i64) -> Result<Self> {
        if half_day <= 0 || full_day <= half_day {
            bail!("status thresholds need 0 < half day < full day, got {half_day}h / {full_day}h");
        }
        Ok(Self {
            half_day: Duration::hours(half_day),
            full_day: Duration::hours(full_day),
        })
    }

    pub fn classify(&self, worked: Duration) -> AttendanceStatus {
        if worked >= self.full_day {
            AttendanceStatus::Present
        } else if worked >= self.half_day {
            AttendanceStatus::HalfDay
        } else {
            AttendanceStatus::Absent
        }
    }

    /// Status of a whole day as reports show it. Without any complete session
    /// there is no span to classify: an open session keeps the day `Pending`,
    /// otherwise the day only holds markers and is `Absent`.
    pub fn classify_day<'a, I>(&self, records: I, worked: Duration) -> AttendanceStatus
    where
        I: IntoIterator<Item = &'a AttendanceRecord>,
    {
        let mut any_open = false;
        for record in records {
            if record.is_complete() {
                return self.classify(worked);
            }
            any_open |= record.is_open();
        }

        if any_open {
            AttendanceStatus::Pending
        } else {
            AttendanceStatus::Absent
        }
    }
}
