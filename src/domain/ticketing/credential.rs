//! Credential codec.
//!
//! A credential is the opaque string embedded in a ticket's scannable code:
//! `ticket:<event_id>:<user_id>:<issued_at_millis>`. The fixed prefix makes
//! a credential human-distinguishable from garbage input, and the issuance
//! timestamp makes concurrent purchases by the same user produce distinct
//! strings with overwhelming probability.
//!
//! The codec is pure and guarantees neither secrecy nor uniqueness: a
//! credential is an identifier, not a capability token, and uniqueness is
//! enforced by the ticket store's unique constraint.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::{EventId, UserId};

use super::TicketingError;

/// Fixed textual tag identifying a string as a ticket credential.
pub const CREDENTIAL_PREFIX: &str = "ticket";

const DELIMITER: char = ':';

/// Opaque ticket credential string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Credential(String);

/// Structured fields recovered from a credential.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedCredential {
    pub event_id: EventId,
    pub user_id: UserId,
    pub issued_at_millis: i64,
}

impl Credential {
    /// Encodes the issuance fields into a credential string.
    ///
    /// Fails with `MalformedCredential` if the user id contains the field
    /// delimiter, which would make the string ambiguous to decode.
    pub fn encode(
        event_id: &EventId,
        user_id: &UserId,
        issued_at_millis: i64,
    ) -> Result<Self, TicketingError> {
        if user_id.as_str().contains(DELIMITER) {
            return Err(TicketingError::malformed_credential(
                "user id must not contain ':'",
            ));
        }
        Ok(Self(format!(
            "{CREDENTIAL_PREFIX}{DELIMITER}{event_id}{DELIMITER}{user_id}{DELIMITER}{issued_at_millis}"
        )))
    }

    /// Decodes a credential string back into its issuance fields.
    pub fn decode(input: &str) -> Result<DecodedCredential, TicketingError> {
        let mut parts = input.split(DELIMITER);

        let prefix = parts.next().unwrap_or_default();
        if prefix != CREDENTIAL_PREFIX {
            return Err(TicketingError::malformed_credential("wrong prefix"));
        }

        let (event_part, user_part, millis_part) = match (parts.next(), parts.next(), parts.next())
        {
            (Some(e), Some(u), Some(m)) => (e, u, m),
            _ => return Err(TicketingError::malformed_credential("wrong field count")),
        };
        if parts.next().is_some() {
            return Err(TicketingError::malformed_credential("wrong field count"));
        }

        let event_id = event_part
            .parse::<EventId>()
            .map_err(|_| TicketingError::malformed_credential("invalid event id"))?;
        let user_id = UserId::new(user_part)
            .map_err(|_| TicketingError::malformed_credential("empty user id"))?;
        let issued_at_millis = millis_part
            .parse::<i64>()
            .map_err(|_| TicketingError::malformed_credential("invalid timestamp"))?;

        Ok(DecodedCredential {
            event_id,
            user_id,
            issued_at_millis,
        })
    }

    /// Wraps an already-persisted credential string.
    ///
    /// Used when rehydrating tickets from the store; performs no validation
    /// since the stored value was produced by `encode`.
    pub fn from_stored(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Returns the credential as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
