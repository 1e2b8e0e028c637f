//! Session validator: pure checks over one user's records for one day

use crate::attendance::error::AttendanceError;
use crate::model::attendance::AttendanceRecord;

/// Check-in is legal only while no session of the day is still open.
pub fn can_check_in(today: &[AttendanceRecord]) -> bool {
    !today.iter().any(AttendanceRecord::is_open)
}

/// The session a checkout should close: the last open one in creation order.
pub fn select_open_session(today: &[AttendanceRecord]) -> Option<&AttendanceRecord> {
    today.iter().filter(|r| r.is_open()).max_by_key(|r| r.id)
}

/// Same as [`select_open_session`], with the reason when there is nothing to close.
pub fn checkout_target(today: &[AttendanceRecord]) -> Result<&AttendanceRecord, AttendanceError> {
    if today.is_empty() {
        return Err(AttendanceError::NotCheckedInToday);
    }
    select_open_session(today).ok_or(AttendanceError::AlreadyCheckedOut)
}

/// Every open session of the day, for the midnight force-close.
pub fn open_sessions(today: &[AttendanceRecord]) -> Vec<&AttendanceRecord> {
    today.iter().filter(|r| r.is_open()).collect()
}
