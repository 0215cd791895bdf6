use crate::domain::{
    models::availability::{AvailabilityWindow, NewAvailabilityWindow},
    ports::AvailabilityRepository,
};
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::SqlitePool;

pub struct SqliteAvailabilityRepo {
    pool: SqlitePool,
}

impl SqliteAvailabilityRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AvailabilityRepository for SqliteAvailabilityRepo {
    async fn get(&self, counselor_id: i64) -> Result<Vec<AvailabilityWindow>, AppError> {
        sqlx::query_as::<_, AvailabilityWindow>(
            "SELECT * FROM availability_windows WHERE counselor_id = ? ORDER BY day_of_week ASC, start_time ASC",
        )
            .bind(counselor_id)
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn replace(
        &self,
        counselor_id: i64,
        windows: &[NewAvailabilityWindow],
    ) -> Result<(), AppError> {
        let mut tx = self.pool.begin().await.map_err(AppError::Database)?;

        sqlx::query("DELETE FROM availability_windows WHERE counselor_id = ?")
            .bind(counselor_id)
            .execute(&mut *tx)
            .await
            .map_err(AppError::Database)?;

        for window in windows {
            sqlx::query(
                "INSERT INTO availability_windows (counselor_id, day_of_week, start_time, end_time) VALUES (?, ?, ?, ?)",
            )
                .bind(counselor_id)
                .bind(window.day_of_week)
                .bind(&window.start_time)
                .bind(&window.end_time)
                .execute(&mut *tx)
                .await
                .map_err(AppError::Database)?;
        }

        tx.commit().await.map_err(AppError::Database)
    }
}
