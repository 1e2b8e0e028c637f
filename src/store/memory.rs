//! In-process store, used when no database is configured and by the tests

use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::model::attendance::{AttendanceRecord, NewAttendance};
use crate::store::{AttendanceStore, StoreError, StoreResult};

#[derive(Default)]
struct Inner {
    records: Vec<AttendanceRecord>,
    next_id: u64,
}

#[derive(Default)]
pub struct MemoryStore {
    inner: Mutex<Inner>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> StoreResult<MutexGuard<'_, Inner>> {
        self.inner
            .lock()
            .map_err(|_| StoreError::Database("memory store lock poisoned".to_string()))
    }

    fn select<F>(&self, keep: F) -> StoreResult<Vec<AttendanceRecord>>
    where
        F: Fn(&AttendanceRecord) -> bool,
    {
        let inner = self.lock()?;
        let mut rows: Vec<AttendanceRecord> =
            inner.records.iter().filter(|r| keep(r)).cloned().collect();
        // stable sort keeps insertion order between equal keys, same as ORDER BY ..., id
        rows.sort_by_key(|r| (r.user_id, r.attendance_date, r.check_in_time));
        Ok(rows)
    }
}

#[async_trait]
impl AttendanceStore for MemoryStore {
    async fn add_record(&self, record: NewAttendance) -> StoreResult<AttendanceRecord> {
        let mut inner = self.lock()?;
        inner.next_id += 1;
        let stored = record.with_id(inner.next_id);
        inner.records.push(stored.clone());
        Ok(stored)
    }

    async fn records_for_user_and_date(
        &self,
        user_id: u64,
        date: NaiveDate,
    ) -> StoreResult<Vec<AttendanceRecord>> {
        self.select(|r| r.user_id == user_id && r.attendance_date == date)
    }

    async fn update_record(&self, record: &AttendanceRecord) -> StoreResult<()> {
        self.update_records(std::slice::from_ref(record)).await
    }

    async fn update_records(&self, records: &[AttendanceRecord]) -> StoreResult<()> {
        let mut inner = self.lock()?;

        // validate the whole batch first so a missing id leaves nothing half-written
        let mut slots = Vec::with_capacity(records.len());
        for record in records {
            let slot = inner
                .records
                .iter()
                .position(|r| r.id == record.id)
                .ok_or(StoreError::NotFound(record.id))?;
            slots.push(slot);
        }

        for (slot, record) in slots.into_iter().zip(records) {
            inner.records[slot] = record.clone();
        }
        Ok(())
    }

    async fn records_for_user(&self, user_id: u64) -> StoreResult<Vec<AttendanceRecord>> {
        self.select(|r| r.user_id == user_id)
    }

    async fn all_records(&self) -> StoreResult<Vec<AttendanceRecord>> {
        self.select(|_| true)
    }
}
