use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::{
    errors::Error,
    pkg::{
        internal::auth::{Role, User},
        server::state::AppState,
    },
    prelude::Result,
};

#[derive(Deserialize, Validate)]
pub struct SignupInput {
    pub name: String,
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 8))]
    pub password: String,
    #[validate(must_match(other = "password", message = "passwords do not match"))]
    pub password2: String,
    #[serde(default)]
    pub is_company: bool,
}

#[derive(Deserialize)]
pub struct LoginInput {
    pub email: String,
    pub password: String,
}

#[derive(Serialize)]
pub struct TokenOutput {
    pub access_token: String,
    pub token_type: &'static str,
}

pub async fn signup(
    State(state): State<AppState>,
    Json(input): Json<SignupInput>,
) -> Result<Json<User>> {
    input
        .validate()
        .map_err(|e| Error::Validation(e.to_string()))?;
    let user = User::create(
        &state.db_pool,
        &input.name,
        &input.email,
        &input.password,
        Role::from_is_company(input.is_company),
    )
    .await?;
    Ok(Json(user))
}

pub async fn login(
    State(state): State<AppState>,
    Json(input): Json<LoginInput>,
) -> Result<Json<TokenOutput>> {
    let access_token = User::login(&state.db_pool, &input.email, &input.password).await?;
    Ok(Json(TokenOutput {
        access_token,
        token_type: "bearer",
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(password: &str, password2: &str) -> SignupInput {
        SignupInput {
            name: "Ivan Ivanov".into(),
            email: "ivanivanov@mail.com".into(),
            password: password.into(),
            password2: password2.into(),
            is_company: false,
        }
    }

    #[test]
    fn matching_passwords_validate() {
        assert!(input("password123", "password123").validate().is_ok());
    }

    #[test]
    fn mismatched_passwords_are_rejected() {
        assert!(input("password123", "different123").validate().is_err());
    }

    #[test]
    fn short_passwords_are_rejected() {
        assert!(input("short", "short").validate().is_err());
    }

    #[test]
    fn bad_email_is_rejected() {
        let mut bad = input("password123", "password123");
        bad.email = "not-an-email".into();
        assert!(bad.validate().is_err());
    }
}
