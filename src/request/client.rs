//! Registered client settings relevant to token issuance.

// self
use crate::{_prelude::*, auth::ClientId, error::ConfigError, token::TokenKind};

/// Client registration as seen by the issuer.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Client {
	/// Client identifier; doubles as the identity-token audience.
	pub client_id: ClientId,
	/// Identity-token lifetime in seconds.
	pub identity_token_lifetime: u32,
	/// Access-token lifetime in seconds.
	pub access_token_lifetime: u32,
}
impl Client {
	/// Default identity-token lifetime (five minutes).
	pub const DEFAULT_IDENTITY_TOKEN_LIFETIME: u32 = 300;
	/// Default access-token lifetime (one hour).
	pub const DEFAULT_ACCESS_TOKEN_LIFETIME: u32 = 3_600;

	/// Returns a builder seeded with the default lifetimes.
	pub fn builder(client_id: ClientId) -> ClientBuilder {
		ClientBuilder::new(client_id)
	}

	/// Configured lifetime for the provided token kind.
	pub fn lifetime_for(&self, kind: TokenKind) -> u32 {
		match kind {
			TokenKind::IdentityToken => self.identity_token_lifetime,
			TokenKind::AccessToken => self.access_token_lifetime,
		}
	}
}

/// Builder for [`Client`].
#[derive(Clone, Debug)]
pub struct ClientBuilder {
	client_id: ClientId,
	identity_token_lifetime: u32,
	access_token_lifetime: u32,
}
impl ClientBuilder {
	fn new(client_id: ClientId) -> Self {
		Self {
			client_id,
			identity_token_lifetime: Client::DEFAULT_IDENTITY_TOKEN_LIFETIME,
			access_token_lifetime: Client::DEFAULT_ACCESS_TOKEN_LIFETIME,
		}
	}

	/// Sets the identity-token lifetime in seconds.
	pub fn identity_token_lifetime(mut self, seconds: u32) -> Self {
		self.identity_token_lifetime = seconds;

		self
	}

	/// Sets the access-token lifetime in seconds.
	pub fn access_token_lifetime(mut self, seconds: u32) -> Self {
		self.access_token_lifetime = seconds;

		self
	}

	/// Consumes the builder, rejecting zero lifetimes.
	pub fn build(self) -> Result<Client, ConfigError> {
		if self.identity_token_lifetime == 0 {
			return Err(ConfigError::NonPositiveLifetime { kind: TokenKind::IdentityToken });
		}
		if self.access_token_lifetime == 0 {
			return Err(ConfigError::NonPositiveLifetime { kind: TokenKind::AccessToken });
		}

		Ok(Client {
			client_id: self.client_id,
			identity_token_lifetime: self.identity_token_lifetime,
			access_token_lifetime: self.access_token_lifetime,
		})
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	fn client_id() -> ClientId {
		ClientId::new("web-app").expect("Client fixture should be valid.")
	}

	#[test]
	fn builder_applies_defaults_and_overrides() {
		let client = Client::builder(client_id())
			.access_token_lifetime(900)
			.build()
			.expect("Client builder should succeed.");

		assert_eq!(client.lifetime_for(TokenKind::IdentityToken), 300);
		assert_eq!(client.lifetime_for(TokenKind::AccessToken), 900);
	}

	#[test]
	fn zero_lifetimes_are_rejected() {
		let err = Client::builder(client_id())
			.identity_token_lifetime(0)
			.build()
			.expect_err("Zero identity lifetime must be rejected.");

		assert!(matches!(
			err,
			ConfigError::NonPositiveLifetime { kind: TokenKind::IdentityToken }
		));
		assert!(Client::builder(client_id()).access_token_lifetime(0).build().is_err());
	}
}
