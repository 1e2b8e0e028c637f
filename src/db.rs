use sqlx::MySqlPool;
use tracing::info;

pub async fn init_db(database_url: &str) -> Result<MySqlPool, sqlx::Error> {
    let pool = MySqlPool::connect(database_url).await?;
    ensure_schema(&pool).await?;
    Ok(pool)
}

/// Create the `attendance` table when it does not exist yet
async fn ensure_schema(pool: &MySqlPool) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS attendance (
            id BIGINT UNSIGNED NOT NULL AUTO_INCREMENT PRIMARY KEY,
            user_id BIGINT UNSIGNED NOT NULL,
            attendance_date DATE NOT NULL,
            check_in_time TIME NULL,
            check_out_time TIME NULL,
            status VARCHAR(20) NOT NULL DEFAULT 'Pending',
            working_hours VARCHAR(16) NULL,
            INDEX idx_attendance_user_date (user_id, attendance_date)
        )
        "#,
    )
    .execute(pool)
    .await?;

    info!("Attendance schema ready");
    Ok(())
}
