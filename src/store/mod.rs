//! Record store consumed by the attendance engine
//!
//! The engine only ever reads, creates and overwrites rows through
//! [`AttendanceStore`]; it never deletes and never holds a lock across calls.

mod memory;
mod mysql;

pub use memory::MemoryStore;
pub use mysql::MySqlAttendanceStore;

use async_trait::async_trait;
use chrono::NaiveDate;
use thiserror::Error;

use crate::model::attendance::{AttendanceRecord, NewAttendance};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(String),

    #[error("Attendance record {0} not found")]
    NotFound(u64),
}

impl From<sqlx::Error> for StoreError {
    fn from(e: sqlx::Error) -> Self {
        StoreError::Database(e.to_string())
    }
}

pub type StoreResult<T> = Result<T, StoreError>;

#[async_trait]
pub trait AttendanceStore: Send + Sync {
    /// Persist a new record and return it with its assigned id
    async fn add_record(&self, record: NewAttendance) -> StoreResult<AttendanceRecord>;

    /// Records of one user on one date, ordered by check-in time
    async fn records_for_user_and_date(
        &self,
        user_id: u64,
        date: NaiveDate,
    ) -> StoreResult<Vec<AttendanceRecord>>;

    /// Full overwrite of a single record by id
    async fn update_record(&self, record: &AttendanceRecord) -> StoreResult<()>;

    /// Overwrite several records as one batch; either all land or none do
    async fn update_records(&self, records: &[AttendanceRecord]) -> StoreResult<()>;

    /// All records of one user, ordered by date then check-in time
    async fn records_for_user(&self, user_id: u64) -> StoreResult<Vec<AttendanceRecord>>;

    /// Every record, ordered by user, date, then check-in time
    async fn all_records(&self) -> StoreResult<Vec<AttendanceRecord>>;
}
