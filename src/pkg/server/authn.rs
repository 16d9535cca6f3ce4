use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts},
};

use crate::{
    errors::Error,
    pkg::{internal::auth::User, server::state::AppState},
    prelude::Result,
    token,
};

/// Authenticated caller, resolved per handler from the bearer token.
/// Handlers without this extractor stay unauthenticated.
pub struct Caller(pub User);

fn bearer_token(parts: &Parts) -> Option<&str> {
    parts
        .headers
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
}

impl FromRequestParts<AppState> for Caller {
    type Rejection = Error;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self> {
        let token = bearer_token(parts).ok_or(Error::Unauthorized)?;
        let claims = token::verify(token).map_err(|_| {
            tracing::warn!("token invalid or expired, authentication denied");
            Error::Unauthorized
        })?;
        let user = User::get(&state.db_pool, &claims.sub)
            .await?
            .ok_or(Error::Unauthorized)?;
        tracing::debug!(user_id = %user.user_id, "authenticated caller");
        Ok(Caller(user))
    }
}
