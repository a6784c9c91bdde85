//! JWT implementation of SessionValidator.
//!
//! Sessions are HS256-signed tokens minted by the account service. The
//! claims carry everything the ticketing core needs, so validation is
//! purely local: no network call per request.

use async_trait::async_trait;
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;

use crate::domain::foundation::{AuthError, AuthenticatedUser, UserId};
use crate::ports::SessionValidator;

/// Configuration for the JWT session validator.
#[derive(Clone)]
pub struct JwtConfig {
    /// Shared HMAC secret for HS256 verification.
    secret: Secret<String>,
    /// Expected token issuer.
    pub issuer: String,
}

impl JwtConfig {
    pub fn new(secret: impl Into<String>, issuer: impl Into<String>) -> Self {
        Self {
            secret: Secret::new(secret.into()),
            issuer: issuer.into(),
        }
    }
}

/// Session token claims.
#[derive(Debug, Deserialize)]
struct SessionClaims {
    /// User identifier.
    sub: String,
    /// User email.
    email: String,
    /// Optional display name.
    name: Option<String>,
    /// Whether the caller may validate tickets at the gate.
    #[serde(default)]
    admin: bool,
    #[allow(dead_code)]
    exp: i64,
}

/// JWT implementation of the SessionValidator port.
pub struct JwtSessionValidator {
    decoding_key: DecodingKey,
    validation: Validation,
}

impl JwtSessionValidator {
    pub fn new(config: JwtConfig) -> Self {
        let decoding_key = DecodingKey::from_secret(config.secret.expose_secret().as_bytes());
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[&config.issuer]);

        Self {
            decoding_key,
            validation,
        }
    }
}

#[async_trait]
impl SessionValidator for JwtSessionValidator {
    async fn validate(&self, token: &str) -> Result<AuthenticatedUser, AuthError> {
        let data = decode::<SessionClaims>(token, &self.decoding_key, &self.validation).map_err(
            |e| {
                use jsonwebtoken::errors::ErrorKind;
                match e.kind() {
                    ErrorKind::ExpiredSignature => AuthError::TokenExpired,
                    _ => AuthError::InvalidToken,
                }
            },
        )?;

        let claims = data.claims;
        let user_id = UserId::new(claims.sub).map_err(|_| AuthError::InvalidToken)?;

        Ok(AuthenticatedUser::new(
            user_id,
            claims.email,
            claims.name,
            claims.admin,
        ))
    }
}
