use crate::domain::{
    models::appointment::{Appointment, AppointmentFilter, NewAppointment},
    ports::AppointmentRepository,
};
use crate::error::AppError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::SqlitePool;

pub struct SqliteAppointmentRepo {
    pool: SqlitePool,
}

impl SqliteAppointmentRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AppointmentRepository for SqliteAppointmentRepo {
    async fn create(&self, appointment: &NewAppointment) -> Result<Appointment, AppError> {
        let now = Utc::now();
        sqlx::query_as::<_, Appointment>(
            "INSERT INTO appointments (student_id, assigned_to, scheduled_at, type, status, location, provider_or_notes, admin_notes, created_by, created_at, updated_at)
             VALUES (?, ?, ?, ?, 'scheduled', ?, ?, ?, ?, ?, ?)
             RETURNING *",
        )
            .bind(appointment.student_id)
            .bind(appointment.assigned_to)
            .bind(appointment.scheduled_at)
            .bind(appointment.kind)
            .bind(&appointment.location)
            .bind(&appointment.provider_or_notes)
            .bind(&appointment.admin_notes)
            .bind(appointment.created_by)
            .bind(now)
            .bind(now)
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Appointment>, AppError> {
        sqlx::query_as::<_, Appointment>("SELECT * FROM appointments WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn list(&self, filter: &AppointmentFilter) -> Result<Vec<Appointment>, AppError> {
        let mut sql = String::from("SELECT * FROM appointments WHERE 1=1");
        if filter.student_id.is_some() {
            sql.push_str(" AND student_id = ?");
        }
        if filter.assigned_to.is_some() {
            sql.push_str(" AND assigned_to = ?");
        }
        if filter.assigned_to_or_unassigned.is_some() {
            sql.push_str(" AND (assigned_to = ? OR assigned_to IS NULL)");
        }
        if filter.status.is_some() {
            sql.push_str(" AND status = ?");
        }
        if filter.from.is_some() {
            sql.push_str(" AND scheduled_at >= ?");
        }
        if filter.to.is_some() {
            sql.push_str(" AND scheduled_at <= ?");
        }
        sql.push_str(" ORDER BY scheduled_at ASC LIMIT ?");

        let mut query = sqlx::query_as::<_, Appointment>(&sql);
        if let Some(student_id) = filter.student_id {
            query = query.bind(student_id);
        }
        if let Some(assigned_to) = filter.assigned_to {
            query = query.bind(assigned_to);
        }
        if let Some(provider_id) = filter.assigned_to_or_unassigned {
            query = query.bind(provider_id);
        }
        if let Some(status) = filter.status {
            query = query.bind(status);
        }
        if let Some(from) = filter.from {
            query = query.bind(from);
        }
        if let Some(to) = filter.to {
            query = query.bind(to);
        }
        query = query.bind(filter.limit);

        query.fetch_all(&self.pool).await.map_err(AppError::Database)
    }

    async fn list_scheduled_for_day(
        &self,
        provider_id: i64,
        day_start: DateTime<Utc>,
        day_end: DateTime<Utc>,
    ) -> Result<Vec<Appointment>, AppError> {
        sqlx::query_as::<_, Appointment>(
            "SELECT * FROM appointments WHERE assigned_to = ? AND status = 'scheduled' AND scheduled_at >= ? AND scheduled_at < ?",
        )
            .bind(provider_id)
            .bind(day_start)
            .bind(day_end)
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn update(&self, appointment: &Appointment) -> Result<Appointment, AppError> {
        sqlx::query_as::<_, Appointment>(
            "UPDATE appointments SET assigned_to=?, scheduled_at=?, type=?, status=?, location=?, provider_or_notes=?, admin_notes=?, counselor_report=?, updated_at=?
             WHERE id=?
             RETURNING *",
        )
            .bind(appointment.assigned_to)
            .bind(appointment.scheduled_at)
            .bind(appointment.kind)
            .bind(appointment.status)
            .bind(&appointment.location)
            .bind(&appointment.provider_or_notes)
            .bind(&appointment.admin_notes)
            .bind(&appointment.counselor_report)
            .bind(appointment.updated_at)
            .bind(appointment.id)
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn delete(&self, id: i64) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM appointments WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(AppError::Database)?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Appointment not found".into()));
        }
        Ok(())
    }
}
