use thiserror::Error;

use crate::store::StoreError;

#[derive(Debug, Error)]
pub enum AttendanceError {
    #[error("User has already checked in and not checked out yet.")]
    AlreadyCheckedIn,

    #[error("User has not checked in today.")]
    NotCheckedInToday,

    #[error("All check-ins already checked out.")]
    AlreadyCheckedOut,

    #[error(transparent)]
    Store(#[from] StoreError),
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum ErrorKind {
    /// Expected business-rule rejection, surfaced as-is
    Validation,
    /// The record store failed underneath the operation
    Store,
}

impl AttendanceError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            AttendanceError::AlreadyCheckedIn
            | AttendanceError::NotCheckedInToday
            | AttendanceError::AlreadyCheckedOut => ErrorKind::Validation,
            AttendanceError::Store(_) => ErrorKind::Store,
        }
    }
}

/// Write operations, as named in the legacy error prefix
#[derive(Debug, Copy, Clone, Eq, PartialEq, strum_macros::Display)]
pub enum Operation {
    #[strum(serialize = "check-in")]
    CheckIn,
    #[strum(serialize = "check-out")]
    CheckOut,
}

/// Render an engine result into the legacy message contract.
///
/// Callers on the other side of the boundary tell outcomes apart by the text
/// alone: store failures start with `Error during`, rejections carry their
/// fixed wording, successes carry the outcome's own message.
pub fn legacy_message<T: std::fmt::Display>(
    operation: Operation,
    result: &Result<T, AttendanceError>,
) -> String {
    match result {
        Ok(outcome) => outcome.to_string(),
        Err(e) => match e.kind() {
            ErrorKind::Validation => e.to_string(),
            ErrorKind::Store => format!("Error during {operation}: {e}"),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kinds() {
        assert_eq!(AttendanceError::AlreadyCheckedIn.kind(), ErrorKind::Validation);
        assert_eq!(AttendanceError::AlreadyCheckedOut.kind(), ErrorKind::Validation);
        assert_eq!(AttendanceError::NotCheckedInToday.kind(), ErrorKind::Validation);
        assert_eq!(
            AttendanceError::from(StoreError::NotFound(3)).kind(),
            ErrorKind::Store
        );
    }

    #[test]
    fn test_store_failures_get_operation_prefix() {
        let result: Result<String, _> =
            Err(AttendanceError::from(StoreError::Database("connection reset".into())));

        assert_eq!(
            legacy_message(Operation::CheckOut, &result),
            "Error during check-out: Database error: connection reset"
        );
        assert_eq!(
            legacy_message(Operation::CheckIn, &result),
            "Error during check-in: Database error: connection reset"
        );
    }

    #[test]
    fn test_rejections_keep_their_wording() {
        let result: Result<String, _> = Err(AttendanceError::AlreadyCheckedOut);
        let message = legacy_message(Operation::CheckOut, &result);

        assert!(message.contains("already checked out"));
        assert!(!message.starts_with("Error"));
    }

    #[test]
    fn test_success_uses_outcome_text() {
        let result: Result<&str, AttendanceError> = Ok("Check-in successful");
        assert_eq!(legacy_message(Operation::CheckIn, &result), "Check-in successful");
    }
}
