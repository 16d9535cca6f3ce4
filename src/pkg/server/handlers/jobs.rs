use axum::{
    Json,
    extract::{Query, State},
};
use serde::Deserialize;

use crate::{
    pkg::{
        internal::{adaptors::jobs::spec::JobEntry, jobs},
        server::{authn::Caller, state::AppState},
    },
    prelude::Result,
};

#[derive(Debug, Deserialize)]
pub struct CreateJobInput {
    pub title: String,
    pub description: String,
    pub salary_from: Option<f64>,
    pub salary_to: Option<f64>,
    pub is_active: bool,
}

#[derive(Debug, Deserialize)]
pub struct UpdateJobInput {
    pub id: i32,
    pub title: String,
    pub description: String,
    pub salary_from: Option<f64>,
    pub salary_to: Option<f64>,
}

#[derive(Deserialize)]
pub struct ListParams {
    #[serde(default = "default_limit")]
    pub limit: i64,
    #[serde(default)]
    pub offset: i64,
}

fn default_limit() -> i64 {
    100
}

#[derive(Deserialize)]
pub struct JobIdParam {
    pub job_id: i32,
}

pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> Result<Json<Vec<JobEntry>>> {
    let mut conn = state.db_pool.acquire().await?;
    let jobs = jobs::list(&mut conn, params.limit, params.offset).await?;
    Ok(Json(jobs))
}

pub async fn create(
    State(state): State<AppState>,
    Caller(user): Caller,
    Json(input): Json<CreateJobInput>,
) -> Result<Json<JobEntry>> {
    let mut conn = state.db_pool.acquire().await?;
    let job = jobs::create(&mut conn, &user, &input).await?;
    Ok(Json(job))
}

pub async fn update(
    State(state): State<AppState>,
    Caller(user): Caller,
    Json(input): Json<UpdateJobInput>,
) -> Result<Json<JobEntry>> {
    let mut conn = state.db_pool.acquire().await?;
    let job = jobs::update(&mut conn, &user, &input).await?;
    Ok(Json(job))
}

pub async fn remove(
    State(state): State<AppState>,
    Caller(user): Caller,
    Query(params): Query<JobIdParam>,
) -> Result<Json<JobEntry>> {
    let mut conn = state.db_pool.acquire().await?;
    let job = jobs::deactivate(&mut conn, &user, params.job_id).await?;
    Ok(Json(job))
}
