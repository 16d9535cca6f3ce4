use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct JobEntry {
    pub id: i32,
    pub owner_user_id: String,
    pub title: String,
    pub description: String,
    pub salary_from: Option<f64>,
    pub salary_to: Option<f64>,
    pub is_active: bool,
    pub created_at: chrono::NaiveDateTime,
}
