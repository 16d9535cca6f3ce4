use chrono::Utc;
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

use crate::{conf::settings, prelude::Result};

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// user_id of the authenticated caller
    pub sub: String,
    pub exp: i64,
}

pub fn issue(user_id: &str) -> Result<String> {
    let expiry = Utc::now() + chrono::Duration::hours(settings.token_ttl_hours);
    let claims = Claims {
        sub: user_id.to_string(),
        exp: expiry.timestamp(),
    };
    Ok(encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(settings.jwt_secret.as_bytes()),
    )?)
}

pub fn verify(token: &str) -> Result<Claims> {
    let data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(settings.jwt_secret.as_bytes()),
        &Validation::default(),
    )?;
    Ok(data.claims)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn issued_token_verifies() {
        let token = issue("some-user-id").unwrap();
        let claims = verify(&token).unwrap();
        assert_eq!(claims.sub, "some-user-id");
        assert!(claims.exp > Utc::now().timestamp());
    }

    #[test]
    fn garbage_token_is_rejected() {
        assert!(verify("not-a-token").is_err());
    }

    #[test]
    fn tampered_token_is_rejected() {
        let token = issue("some-user-id").unwrap();
        let mut tampered = token.clone();
        tampered.pop();
        // signature no longer matches the payload
        assert!(verify(&tampered).is_err());
    }
}
