//! Authentication configuration

use serde::Deserialize;

use super::error::ValidationError;
use super::server::Environment;

/// Authentication configuration (session token verification)
#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    /// Shared HMAC secret for session token verification
    pub session_secret: String,

    /// Expected token issuer
    #[serde(default = "default_issuer")]
    pub issuer: String,
}

impl AuthConfig {
    /// Validate auth configuration
    ///
    /// A short secret is tolerated in development but rejected in
    /// production and staging.
    pub fn validate(&self, environment: &Environment) -> Result<(), ValidationError> {
        if self.session_secret.is_empty() {
            return Err(ValidationError::MissingRequired("SESSION_SECRET"));
        }
        if *environment != Environment::Development && self.session_secret.len() < 32 {
            return Err(ValidationError::SessionSecretTooShort);
        }
        Ok(())
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            session_secret: String::new(),
            issuer: default_issuer(),
        }
    }
}

fn default_issuer() -> String {
    "fantasia".to_string()
}
