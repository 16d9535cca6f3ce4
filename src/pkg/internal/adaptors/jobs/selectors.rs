use sqlx::PgConnection;

use crate::{pkg::internal::adaptors::jobs::spec::JobEntry, prelude::Result};

pub struct JobSelector<'a> {
    conn: &'a mut PgConnection,
}

impl<'a> JobSelector<'a> {
    pub fn new(conn: &'a mut PgConnection) -> Self {
        JobSelector { conn }
    }

    pub async fn get_by_id(&mut self, id: i32) -> Result<Option<JobEntry>> {
        let row = sqlx::query_as::<_, JobEntry>(
            "SELECT id, owner_user_id, title, description, salary_from, salary_to, is_active, created_at
             FROM jobs WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&mut *self.conn)
        .await?;
        Ok(row)
    }

    pub async fn get_page(&mut self, limit: i64, offset: i64) -> Result<Vec<JobEntry>> {
        let rows = sqlx::query_as::<_, JobEntry>(
            "SELECT id, owner_user_id, title, description, salary_from, salary_to, is_active, created_at
             FROM jobs ORDER BY created_at DESC LIMIT $1 OFFSET $2",
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(&mut *self.conn)
        .await?;
        Ok(rows)
    }
}
