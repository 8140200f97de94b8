//! Validated request models handed to the issuer by the protocol layer.
//!
//! Validation itself happens upstream; these types only carry its outcome.

pub mod client;
pub mod code;

pub use client::*;
pub use code::*;

// self
use crate::{_prelude::*, auth::ScopeList};

/// Authorize-endpoint request that already passed protocol validation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidatedAuthorizeRequest {
	/// Client the request was made on behalf of.
	pub client: Client,
	/// Raw `nonce` parameter, if the client sent one.
	pub nonce: Option<String>,
	/// Requested scopes, in request order.
	pub scopes: ScopeList,
	/// Whether the response type asks for an access token as well.
	pub access_token_requested: bool,
}
impl ValidatedAuthorizeRequest {
	/// Creates a request for the provided client and scopes without nonce or access token.
	pub fn new(client: Client, scopes: ScopeList) -> Self {
		Self { client, nonce: None, scopes, access_token_requested: false }
	}

	/// Sets the nonce parameter.
	pub fn with_nonce(mut self, nonce: impl Into<String>) -> Self {
		self.nonce = Some(nonce.into());

		self
	}

	/// Overrides the access-token flag.
	pub fn with_access_token_requested(mut self, requested: bool) -> Self {
		self.access_token_requested = requested;

		self
	}

	/// Nonce to mirror into the identity token; blank values count as absent.
	pub fn nonce(&self) -> Option<&str> {
		self.nonce.as_deref().filter(|nonce| !nonce.trim().is_empty())
	}
}

/// Token-endpoint request that already passed protocol validation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidatedTokenRequest {
	/// Authenticated client redeeming the code.
	pub client: Client,
	/// Authorization code being exchanged.
	pub authorization_code: AuthorizationCode,
}
impl ValidatedTokenRequest {
	/// Creates a code-exchange request.
	pub fn new(client: Client, authorization_code: AuthorizationCode) -> Self {
		Self { client, authorization_code }
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;
	use crate::auth::ClientId;

	fn request() -> ValidatedAuthorizeRequest {
		let client_id = ClientId::new("web-app").expect("Client fixture should be valid.");
		let client = Client::builder(client_id).build().expect("Client should build.");
		let scopes = ScopeList::new(["openid"]).expect("Scope fixture should be valid.");

		ValidatedAuthorizeRequest::new(client, scopes)
	}

	#[test]
	fn blank_nonces_count_as_absent() {
		assert_eq!(request().nonce(), None);
		assert_eq!(request().with_nonce("").nonce(), None);
		assert_eq!(request().with_nonce("  ").nonce(), None);
		assert_eq!(request().with_nonce("n-0S6_WzA2Mj").nonce(), Some("n-0S6_WzA2Mj"));
	}

	#[test]
	fn access_token_flag_defaults_off() {
		assert!(!request().access_token_requested);
		assert!(request().with_access_token_requested(true).access_token_requested);
	}
}
