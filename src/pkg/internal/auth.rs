use rand::{Rng, distr::Alphanumeric};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use sqlx::{PgPool, prelude::FromRow};
use uuid::Uuid;

use crate::{
    errors::Error,
    prelude::Result,
    token,
};

/// Closed set of account kinds. Stored as the `user_role` enum in Postgres.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "user_role", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Company,
    Individual,
}

impl Role {
    pub fn from_is_company(is_company: bool) -> Self {
        if is_company { Role::Company } else { Role::Individual }
    }

    pub fn is_company(self) -> bool {
        self == Role::Company
    }
}

#[derive(FromRow, Serialize, Debug, Clone)]
pub struct User {
    pub user_id: String,
    pub name: String,
    pub email: String,
    pub role: Role,
}

#[derive(FromRow)]
struct Credentials {
    user_id: String,
    password_hash: String,
}

impl User {
    pub async fn create(
        pool: &PgPool,
        name: &str,
        email: &str,
        password: &str,
        role: Role,
    ) -> Result<Self> {
        let salt = generate_salt();
        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (user_id, name, email, password_hash, role)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING user_id, name, email, role
            "#,
        )
        .bind(Uuid::new_v4().to_string())
        .bind(name)
        .bind(email)
        .bind(hash_password(password, &salt))
        .bind(role)
        .fetch_one(pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db) if db.is_unique_violation() => {
                Error::Conflict("email is already registered")
            }
            e => e.into(),
        })?;
        tracing::info!(user_id = %user.user_id, role = ?user.role, "registered new user");
        Ok(user)
    }

    pub async fn get(pool: &PgPool, user_id: &str) -> Result<Option<Self>> {
        Ok(sqlx::query_as::<_, User>(
            "SELECT user_id, name, email, role FROM users WHERE user_id = $1",
        )
        .bind(user_id)
        .fetch_optional(pool)
        .await?)
    }

    /// Resolves email + password to a bearer token. Unknown emails and bad
    /// passwords are indistinguishable to the caller.
    pub async fn login(pool: &PgPool, email: &str, password: &str) -> Result<String> {
        let creds = sqlx::query_as::<_, Credentials>(
            "SELECT user_id, password_hash FROM users WHERE email = $1",
        )
        .bind(email)
        .fetch_optional(pool)
        .await?
        .ok_or(Error::Unauthorized)?;
        if !verify_password(password, &creds.password_hash) {
            return Err(Error::Unauthorized);
        }
        token::issue(&creds.user_id)
    }
}

fn generate_salt() -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(16)
        .map(char::from)
        .collect()
}

fn hash_password(password: &str, salt: &str) -> String {
    let digest = Sha256::digest(format!("{salt}{password}"));
    format!("{salt}${digest:x}")
}

fn verify_password(password: &str, stored: &str) -> bool {
    match stored.split_once('$') {
        Some((salt, _)) => hash_password(password, salt) == stored,
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_maps_from_wire_flag() {
        assert_eq!(Role::from_is_company(true), Role::Company);
        assert_eq!(Role::from_is_company(false), Role::Individual);
        assert!(Role::Company.is_company());
        assert!(!Role::Individual.is_company());
    }

    #[test]
    fn password_round_trip() {
        let stored = hash_password("mypassword123", &generate_salt());
        assert!(verify_password("mypassword123", &stored));
        assert!(!verify_password("notmypassword", &stored));
    }

    #[test]
    fn malformed_stored_hash_never_verifies() {
        assert!(!verify_password("anything", "no-salt-separator"));
    }

    #[test]
    fn salts_differ_between_users() {
        let a = hash_password("same", &generate_salt());
        let b = hash_password("same", &generate_salt());
        assert_ne!(a, b);
    }
}
