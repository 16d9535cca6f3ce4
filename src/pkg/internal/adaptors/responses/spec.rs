use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ResponseEntry {
    pub id: i32,
    pub responder_user_id: String,
    pub job_id: i32,
    pub message: Option<String>,
}
