use axum::{
    Router,
    routing::{get, post},
};

use super::handlers;
use super::handlers::auth::{login, signup};
use super::handlers::probes::{healthz, livez};
use super::state::AppState;
use crate::prelude::Result;

pub async fn build_routes() -> Result<Router> {
    let state = AppState::new().await?;
    let app = Router::new()
        .route("/signup", post(signup))
        .route("/login", post(login))
        .route(
            "/jobs",
            get(handlers::jobs::list)
                .post(handlers::jobs::create)
                .put(handlers::jobs::update)
                .delete(handlers::jobs::remove),
        )
        .route(
            "/response",
            get(handlers::responses::list)
                .post(handlers::responses::submit)
                .delete(handlers::responses::withdraw),
        )
        .route("/healthz", get(healthz))
        .route("/livez", get(livez))
        .with_state(state);

    Ok(app)
}
