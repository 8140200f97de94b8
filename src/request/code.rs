//! Authorization codes carrying tokens minted during the authorize step.

// self
use crate::{_prelude::*, auth::ClientId, error::ConfigError, token::Token};

/// Persisted authorization code handed back to the token endpoint for exchange.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorizationCode {
	/// Client the code was issued to.
	pub client_id: ClientId,
	/// Instant the code was minted.
	#[serde(with = "time::serde::rfc3339")]
	pub created_at: OffsetDateTime,
	/// Identity token minted at authorize time.
	pub identity_token: Token,
	/// Access token minted at authorize time.
	pub access_token: Token,
}
impl AuthorizationCode {
	/// Creates a code stamped with the current clock.
	pub fn new(client_id: ClientId, identity_token: Token, access_token: Token) -> Self {
		Self { client_id, created_at: OffsetDateTime::now_utc(), identity_token, access_token }
	}

	/// Loads a code persisted as JSON, reporting the path of any malformed field.
	pub fn from_json(json: &str) -> Result<Self, ConfigError> {
		crate::error::from_json_str(json)
	}

	/// Serializes the code for persistence.
	pub fn to_json(&self) -> Result<String, ConfigError> {
		serde_json::to_string(self).map_err(|e| ConfigError::Serialize { source: e })
	}
}
