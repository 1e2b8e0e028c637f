//! Attendance engine
//!
//! Orchestrates one check-in or checkout as a single read-decide-write pass:
//! resolve today through the [`Clock`], read the day's rows, validate the
//! transition, then write. Nothing here retries, and nothing guards two
//! concurrent requests for the same user against each other.

use std::fmt;
use std::sync::Arc;

use chrono::{Duration, Timelike};
use tracing::{error, info, instrument, warn};

use crate::attendance::clock::Clock;
use crate::attendance::duration::{day_span, format_hms};
use crate::attendance::error::AttendanceError;
use crate::attendance::report::{self, TodayReport, UserAttendanceReport, UserDaysReport};
use crate::attendance::session;
use crate::attendance::status::StatusThresholds;
use crate::model::attendance::{AttendanceRecord, AttendanceStatus, NewAttendance};
use crate::store::AttendanceStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CheckedIn;

impl fmt::Display for CheckedIn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Check-in successful")
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum CheckOutOutcome {
    /// The open session was closed and the whole day recomputed
    CheckedOut {
        status: AttendanceStatus,
        worked: Duration,
    },
    /// Nothing recorded today; an `Absent` marker row was written instead
    AbsentNoCheckIn,
    /// Checkout arrived after midnight; the day's open sessions were forced to `Absent`
    AbsentMissedCheckout { closed: usize },
}

impl CheckOutOutcome {
    /// Whether the caller should see this as a rejected request even though
    /// the engine did write something.
    pub fn is_rejection(&self) -> bool {
        matches!(self, CheckOutOutcome::AbsentNoCheckIn)
    }
}

impl fmt::Display for CheckOutOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CheckOutOutcome::CheckedOut { status, worked } => write!(
                f,
                "Check-out successful. Status: {status}, Working hours: {}",
                format_hms(*worked)
            ),
            CheckOutOutcome::AbsentNoCheckIn => {
                f.write_str("User has not checked in today. Marked as Absent.")
            }
            CheckOutOutcome::AbsentMissedCheckout { closed } => write!(
                f,
                "Check-out missed before midnight. {closed} open session(s) marked as Absent."
            ),
        }
    }
}

pub struct AttendanceEngine {
    store: Arc<dyn AttendanceStore>,
    clock: Arc<dyn Clock>,
    thresholds: StatusThresholds,
}

impl AttendanceEngine {
    pub fn new(
        store: Arc<dyn AttendanceStore>,
        clock: Arc<dyn Clock>,
        thresholds: StatusThresholds,
    ) -> Self {
        Self {
            store,
            clock,
            thresholds,
        }
    }

    #[instrument(name = "attendance_check_in", skip(self))]
    pub async fn check_in(&self, user_id: u64) -> Result<CheckedIn, AttendanceError> {
        let now = self.clock.now();
        let today = self
            .store
            .records_for_user_and_date(user_id, now.date())
            .await?;

        if !session::can_check_in(&today) {
            warn!("Check-in rejected: session still open");
            return Err(AttendanceError::AlreadyCheckedIn);
        }

        let record = self
            .store
            .add_record(NewAttendance::check_in(user_id, now.date(), now.time()))
            .await?;

        info!(record_id = record.id, date = %record.attendance_date, "Checked in");
        Ok(CheckedIn)
    }

    #[instrument(name = "attendance_check_out", skip(self))]
    pub async fn check_out(&self, user_id: u64) -> Result<CheckOutOutcome, AttendanceError> {
        let now = self.clock.now();
        let mut today = self
            .store
            .records_for_user_and_date(user_id, now.date())
            .await?;

        if today.is_empty() {
            let record = self
                .store
                .add_record(NewAttendance::absent_marker(user_id, now.date()))
                .await?;
            info!(record_id = record.id, "Check-out without check-in, marked absent");
            return Ok(CheckOutOutcome::AbsentNoCheckIn);
        }

        // sessions left open past midnight are not closed with a real duration
        if now.hour() == 0 {
            let forced: Vec<AttendanceRecord> = session::open_sessions(&today)
                .into_iter()
                .map(|open| AttendanceRecord {
                    status: AttendanceStatus::Absent,
                    working_hours: Some(format_hms(Duration::zero())),
                    ..open.clone()
                })
                .collect();

            if !forced.is_empty() {
                self.store.update_records(&forced).await?;
                info!(closed = forced.len(), "Missed check-out, open sessions marked absent");
                return Ok(CheckOutOutcome::AbsentMissedCheckout {
                    closed: forced.len(),
                });
            }
        }

        let target = match session::checkout_target(&today) {
            Ok(record) => record.id,
            Err(e) => {
                warn!(reason = %e, "Check-out rejected");
                return Err(e);
            }
        };

        for record in today.iter_mut().filter(|r| r.id == target) {
            record.check_out_time = Some(now.time());
        }

        let worked = day_span(&today);
        let status = self.thresholds.classify(worked);
        let working_hours = format_hms(worked);
        for record in today.iter_mut() {
            record.status = status;
            record.working_hours = Some(working_hours.clone());
        }

        self.store.update_records(&today).await?;

        info!(record_id = target, %status, %working_hours, "Checked out");
        Ok(CheckOutOutcome::CheckedOut { status, worked })
    }

    /// Today's rows and span. Store failures degrade to an empty report.
    #[instrument(name = "attendance_today", skip(self))]
    pub async fn today_attendance(&self, user_id: u64) -> TodayReport {
        let today = self.clock.today();
        match self.store.records_for_user_and_date(user_id, today).await {
            Ok(records) if records.is_empty() => TodayReport::empty(),
            Ok(records) => TodayReport::build(&records),
            Err(e) => {
                error!(error = %e, "Failed to load today's attendance");
                TodayReport::empty()
            }
        }
    }

    #[instrument(name = "attendance_history", skip(self))]
    pub async fn all_attendance(&self, user_id: u64) -> UserAttendanceReport {
        match self.store.records_for_user(user_id).await {
            Ok(records) if records.is_empty() => UserAttendanceReport::empty(),
            Ok(records) => UserAttendanceReport::build(&records, &self.thresholds),
            Err(e) => {
                error!(error = %e, "Failed to load attendance history");
                UserAttendanceReport::empty()
            }
        }
    }

    #[instrument(name = "attendance_all_users", skip(self))]
    pub async fn all_users_attendance(&self) -> Vec<UserDaysReport> {
        match self.store.all_records().await {
            Ok(records) => report::build_all_users(&records, &self.thresholds),
            Err(e) => {
                error!(error = %e, "Failed to load attendance of all users");
                Vec::new()
            }
        }
    }
}
