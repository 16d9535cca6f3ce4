use sqlx::PgConnection;

use crate::{pkg::internal::adaptors::responses::spec::ResponseEntry, prelude::Result};

pub struct ResponseSelector<'a> {
    conn: &'a mut PgConnection,
}

impl<'a> ResponseSelector<'a> {
    pub fn new(conn: &'a mut PgConnection) -> Self {
        ResponseSelector { conn }
    }

    pub async fn get_for_job(&mut self, job_id: i32) -> Result<Vec<ResponseEntry>> {
        let rows = sqlx::query_as::<_, ResponseEntry>(
            "SELECT id, responder_user_id, job_id, message
             FROM responses WHERE job_id = $1 ORDER BY id",
        )
        .bind(job_id)
        .fetch_all(&mut *self.conn)
        .await?;
        Ok(rows)
    }

    /// Indexed lookup backing both the duplicate early-reject and withdrawal.
    pub async fn get_by_responder_and_job(
        &mut self,
        responder_user_id: &str,
        job_id: i32,
    ) -> Result<Option<ResponseEntry>> {
        let row = sqlx::query_as::<_, ResponseEntry>(
            "SELECT id, responder_user_id, job_id, message
             FROM responses WHERE responder_user_id = $1 AND job_id = $2",
        )
        .bind(responder_user_id)
        .bind(job_id)
        .fetch_optional(&mut *self.conn)
        .await?;
        Ok(row)
    }
}
