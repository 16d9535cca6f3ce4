use sqlx::PgConnection;

use crate::{
    pkg::{
        internal::adaptors::jobs::spec::JobEntry,
        server::handlers::jobs::{CreateJobInput, UpdateJobInput},
    },
    prelude::Result,
};

pub struct JobMutator<'a> {
    conn: &'a mut PgConnection,
}

impl<'a> JobMutator<'a> {
    pub fn new(conn: &'a mut PgConnection) -> Self {
        JobMutator { conn }
    }

    pub async fn create(&mut self, owner_user_id: &str, job: &CreateJobInput) -> Result<JobEntry> {
        let row = sqlx::query_as::<_, JobEntry>(
            r#"
            INSERT INTO jobs (owner_user_id, title, description, salary_from, salary_to, is_active)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, owner_user_id, title, description, salary_from, salary_to, is_active, created_at
            "#,
        )
        .bind(owner_user_id)
        .bind(&job.title)
        .bind(&job.description)
        .bind(job.salary_from)
        .bind(job.salary_to)
        .bind(job.is_active)
        .fetch_one(&mut *self.conn)
        .await?;
        Ok(row)
    }

    pub async fn update(&mut self, job: &UpdateJobInput) -> Result<Option<JobEntry>> {
        let row = sqlx::query_as::<_, JobEntry>(
            r#"
            UPDATE jobs
            SET title = $2, description = $3, salary_from = $4, salary_to = $5
            WHERE id = $1
            RETURNING id, owner_user_id, title, description, salary_from, salary_to, is_active, created_at
            "#,
        )
        .bind(job.id)
        .bind(&job.title)
        .bind(&job.description)
        .bind(job.salary_from)
        .bind(job.salary_to)
        .fetch_optional(&mut *self.conn)
        .await?;
        Ok(row)
    }

    /// Guarded flip: returns None when the row is gone or already inactive,
    /// so a concurrent deactivation surfaces as a conflict to the caller.
    pub async fn deactivate(&mut self, id: i32) -> Result<Option<JobEntry>> {
        let row = sqlx::query_as::<_, JobEntry>(
            r#"
            UPDATE jobs SET is_active = FALSE
            WHERE id = $1 AND is_active
            RETURNING id, owner_user_id, title, description, salary_from, salary_to, is_active, created_at
            "#,
        )
        .bind(id)
        .fetch_optional(&mut *self.conn)
        .await?;
        Ok(row)
    }
}
