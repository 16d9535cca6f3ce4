use axum::{
    Json,
    extract::{Query, State},
};
use serde::Deserialize;

use crate::{
    pkg::{
        internal::{adaptors::responses::spec::ResponseEntry, responses},
        server::{authn::Caller, handlers::jobs::JobIdParam, state::AppState},
    },
    prelude::Result,
};

#[derive(Debug, Deserialize)]
pub struct SubmitResponseInput {
    pub job_id: i32,
    pub message: Option<String>,
}

pub async fn list(
    State(state): State<AppState>,
    Caller(user): Caller,
    Query(params): Query<JobIdParam>,
) -> Result<Json<Vec<ResponseEntry>>> {
    let mut conn = state.db_pool.acquire().await?;
    let responses = responses::list_for_job(&mut conn, &user, params.job_id).await?;
    Ok(Json(responses))
}

pub async fn submit(
    State(state): State<AppState>,
    Caller(user): Caller,
    Json(input): Json<SubmitResponseInput>,
) -> Result<Json<ResponseEntry>> {
    let mut conn = state.db_pool.acquire().await?;
    let response =
        responses::submit(&mut conn, &user, input.job_id, input.message.as_deref()).await?;
    Ok(Json(response))
}

pub async fn withdraw(
    State(state): State<AppState>,
    Caller(user): Caller,
    Query(params): Query<JobIdParam>,
) -> Result<Json<ResponseEntry>> {
    let mut conn = state.db_pool.acquire().await?;
    let response = responses::withdraw(&mut conn, &user, params.job_id).await?;
    Ok(Json(response))
}
