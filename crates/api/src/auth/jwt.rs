//! Session tokens.
//!
//! Login issues an HS256 JWT whose subject is the user id. The same token is
//! returned in the response body and set as the `token` cookie; the
//! [`AuthUser`](crate::middleware::auth::AuthUser) extractor accepts either.
//! Tokens are stateless: logout only expires the cookie.

use chrono::Utc;
use inkwell_core::types::DbId;
use jsonwebtoken::errors::Error as TokenError;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Cookie that carries the session token.
pub const TOKEN_COOKIE: &str = "token";

const DEFAULT_EXPIRY_MINS: i64 = 24 * 60;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Owning user.
    pub sub: DbId,
    pub exp: i64,
    pub iat: i64,
    /// Random per-token id.
    pub jti: String,
}

impl Claims {
    fn for_user(user_id: DbId, lifetime_secs: i64) -> Self {
        let iat = Utc::now().timestamp();
        Self {
            sub: user_id,
            exp: iat + lifetime_secs,
            iat,
            jti: Uuid::new_v4().to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct JwtConfig {
    /// HMAC signing secret.
    pub secret: String,
    /// Session lifetime in minutes.
    pub expiry_mins: i64,
}

impl JwtConfig {
    /// Reads `JWT_SECRET` (required, non-empty) and `JWT_EXPIRY_MINS`
    /// (default one day).
    ///
    /// # Panics
    ///
    /// On a missing or empty secret, or a non-numeric expiry.
    pub fn from_env() -> Self {
        let secret = std::env::var("JWT_SECRET").expect("JWT_SECRET must be set");
        assert!(!secret.is_empty(), "JWT_SECRET must not be empty");

        let expiry_mins = match std::env::var("JWT_EXPIRY_MINS") {
            Ok(raw) => raw
                .parse()
                .expect("JWT_EXPIRY_MINS must be a whole number of minutes"),
            Err(_) => DEFAULT_EXPIRY_MINS,
        };

        Self {
            secret,
            expiry_mins,
        }
    }

    /// Session lifetime in seconds: the token's `exp - iat` and the cookie's
    /// `Max-Age`.
    pub fn expiry_secs(&self) -> i64 {
        self.expiry_mins * 60
    }
}

/// Sign a session token for `user_id`.
pub fn generate_token(user_id: DbId, config: &JwtConfig) -> Result<String, TokenError> {
    let claims = Claims::for_user(user_id, config.expiry_secs());
    jsonwebtoken::encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(config.secret.as_bytes()),
    )
}

/// Check signature and expiry and return the claims.
pub fn validate_token(token: &str, config: &JwtConfig) -> Result<Claims, TokenError> {
    let data = jsonwebtoken::decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.secret.as_bytes()),
        &Validation::new(Algorithm::HS256),
    )?;
    Ok(data.claims)
}

pub fn session_cookie(token: &str, config: &JwtConfig) -> String {
    format!(
        "{TOKEN_COOKIE}={token}; HttpOnly; Path=/; SameSite=Lax; Max-Age={}",
        config.expiry_secs()
    )
}

pub fn expired_session_cookie() -> String {
    format!("{TOKEN_COOKIE}=; HttpOnly; Path=/; SameSite=Lax; Max-Age=0")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(secret: &str) -> JwtConfig {
        JwtConfig {
            secret: secret.to_string(),
            expiry_mins: 60,
        }
    }

    #[test]
    fn token_round_trips_user_and_lifetime() {
        let config = config("inkwell-test-secret");
        let token = generate_token(42, &config).unwrap();

        let claims = validate_token(&token, &config).unwrap();
        assert_eq!(claims.sub, 42);
        assert_eq!(claims.exp - claims.iat, 3600);
    }

    #[test]
    fn every_token_gets_a_fresh_jti() {
        let config = config("inkwell-test-secret");
        let a = validate_token(&generate_token(1, &config).unwrap(), &config).unwrap();
        let b = validate_token(&generate_token(1, &config).unwrap(), &config).unwrap();
        assert_ne!(a.jti, b.jti);
    }

    #[test]
    fn expired_token_is_rejected() {
        let config = config("inkwell-test-secret");
        // Past the decoder's 60 second leeway.
        let claims = Claims::for_user(7, -300);
        let token = jsonwebtoken::encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(config.secret.as_bytes()),
        )
        .unwrap();

        assert!(validate_token(&token, &config).is_err());
    }

    #[test]
    fn token_from_another_secret_is_rejected() {
        let token = generate_token(1, &config("earthsea")).unwrap();
        assert!(validate_token(&token, &config("hainish")).is_err());
    }

    #[test]
    fn cookies_carry_lifetime() {
        assert_eq!(
            session_cookie("abc", &config("s")),
            "token=abc; HttpOnly; Path=/; SameSite=Lax; Max-Age=3600"
        );
        assert_eq!(
            expired_session_cookie(),
            "token=; HttpOnly; Path=/; SameSite=Lax; Max-Age=0"
        );
    }
}
