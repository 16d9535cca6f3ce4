use sqlx::PgConnection;

use crate::{
    errors::Error,
    pkg::internal::adaptors::responses::spec::ResponseEntry,
    prelude::Result,
};

pub struct ResponseMutator<'a> {
    conn: &'a mut PgConnection,
}

impl<'a> ResponseMutator<'a> {
    pub fn new(conn: &'a mut PgConnection) -> Self {
        ResponseMutator { conn }
    }

    pub async fn create(
        &mut self,
        responder_user_id: &str,
        job_id: i32,
        message: Option<&str>,
    ) -> Result<ResponseEntry> {
        let row = sqlx::query_as::<_, ResponseEntry>(
            r#"
            INSERT INTO responses (responder_user_id, job_id, message)
            VALUES ($1, $2, $3)
            RETURNING id, responder_user_id, job_id, message
            "#,
        )
        .bind(responder_user_id)
        .bind(job_id)
        .bind(message)
        .fetch_one(&mut *self.conn)
        .await
        .map_err(|e| match e {
            // the unique index is the authoritative duplicate guard; a racing
            // insert that slipped past the early reject lands here
            sqlx::Error::Database(ref db) if db.is_unique_violation() => {
                Error::Conflict("response already exists")
            }
            e => e.into(),
        })?;
        Ok(row)
    }

    pub async fn delete(&mut self, id: i32) -> Result<Option<ResponseEntry>> {
        let row = sqlx::query_as::<_, ResponseEntry>(
            "DELETE FROM responses WHERE id = $1
             RETURNING id, responder_user_id, job_id, message",
        )
        .bind(id)
        .fetch_optional(&mut *self.conn)
        .await?;
        Ok(row)
    }
}
