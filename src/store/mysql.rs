use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::{MySql, MySqlPool, Transaction};
use tracing::debug;

use crate::model::attendance::{AttendanceRecord, NewAttendance};
use crate::store::{AttendanceStore, StoreResult};

const SELECT_COLUMNS: &str = r#"
    SELECT id, user_id, attendance_date, check_in_time, check_out_time, status, working_hours
    FROM attendance
"#;

/// sqlx-backed store over the `attendance` table
#[derive(Clone)]
pub struct MySqlAttendanceStore {
    pool: MySqlPool,
}

impl MySqlAttendanceStore {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    async fn overwrite(
        tx: &mut Transaction<'_, MySql>,
        record: &AttendanceRecord,
    ) -> StoreResult<()> {
        // affected-rows is "changed rows" on MySQL, so an identical overwrite reports 0;
        // it can't be used as an existence check here
        sqlx::query(
            r#"
            UPDATE attendance
            SET user_id = ?, attendance_date = ?, check_in_time = ?, check_out_time = ?,
                status = ?, working_hours = ?
            WHERE id = ?
            "#,
        )
        .bind(record.user_id)
        .bind(record.attendance_date)
        .bind(record.check_in_time)
        .bind(record.check_out_time)
        .bind(record.status.to_string())
        .bind(record.working_hours.as_deref())
        .bind(record.id)
        .execute(&mut **tx)
        .await?;

        Ok(())
    }
}

#[async_trait]
impl AttendanceStore for MySqlAttendanceStore {
    async fn add_record(&self, record: NewAttendance) -> StoreResult<AttendanceRecord> {
        let result = sqlx::query(
            r#"
            INSERT INTO attendance
            (user_id, attendance_date, check_in_time, check_out_time, status, working_hours)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(record.user_id)
        .bind(record.attendance_date)
        .bind(record.check_in_time)
        .bind(record.check_out_time)
        .bind(record.status.to_string())
        .bind(record.working_hours.as_deref())
        .execute(&self.pool)
        .await?;

        let id = result.last_insert_id();
        debug!(id, user_id = record.user_id, "Attendance row inserted");

        Ok(record.with_id(id))
    }

    async fn records_for_user_and_date(
        &self,
        user_id: u64,
        date: NaiveDate,
    ) -> StoreResult<Vec<AttendanceRecord>> {
        let sql = format!(
            "{SELECT_COLUMNS} WHERE user_id = ? AND attendance_date = ? ORDER BY check_in_time, id"
        );

        let rows = sqlx::query_as::<_, AttendanceRecord>(&sql)
            .bind(user_id)
            .bind(date)
            .fetch_all(&self.pool)
            .await?;

        Ok(rows)
    }

    async fn update_record(&self, record: &AttendanceRecord) -> StoreResult<()> {
        let mut tx = self.pool.begin().await?;
        Self::overwrite(&mut tx, record).await?;
        tx.commit().await?;
        Ok(())
    }

    async fn update_records(&self, records: &[AttendanceRecord]) -> StoreResult<()> {
        let mut tx = self.pool.begin().await?;
        for record in records {
            Self::overwrite(&mut tx, record).await?;
        }
        tx.commit().await?;

        debug!(count = records.len(), "Attendance rows updated");
        Ok(())
    }

    async fn records_for_user(&self, user_id: u64) -> StoreResult<Vec<AttendanceRecord>> {
        let sql = format!(
            "{SELECT_COLUMNS} WHERE user_id = ? ORDER BY attendance_date, check_in_time, id"
        );

        let rows = sqlx::query_as::<_, AttendanceRecord>(&sql)
            .bind(user_id)
            .fetch_all(&self.pool)
            .await?;

        Ok(rows)
    }

    async fn all_records(&self) -> StoreResult<Vec<AttendanceRecord>> {
        let sql = format!("{SELECT_COLUMNS} ORDER BY user_id, attendance_date, check_in_time, id");

        let rows = sqlx::query_as::<_, AttendanceRecord>(&sql)
            .fetch_all(&self.pool)
            .await?;

        Ok(rows)
    }
}
