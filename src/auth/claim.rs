//! Claim values, protocol claim type constants, and the identity-token claim set.

// crates.io
use base64::{Engine as _, engine::general_purpose::URL_SAFE_NO_PAD};
use sha2::{Digest, Sha256, Sha384, Sha512};
// self
use crate::{_prelude::*, jwt::SigningAlgorithm};

/// Claim type strings published by the provider.
pub mod claim_types {
	/// Subject identifier of the authenticated end-user.
	pub const SUBJECT: &str = "sub";
	/// Identifier of the client the token was issued to.
	pub const CLIENT_ID: &str = "client_id";
	/// Space-delimited granted scopes.
	pub const SCOPE: &str = "scope";
	/// Value echoed from the authorize request to bind the identity token to it.
	pub const NONCE: &str = "nonce";
	/// Authentication method reference.
	pub const AUTHENTICATION_METHOD: &str = "amr";
	/// Authentication instant, in epoch seconds.
	pub const AUTHENTICATION_TIME: &str = "auth_time";
	/// Hash of the access token issued alongside an identity token.
	pub const ACCESS_TOKEN_HASH: &str = "at_hash";
}

/// A single `(type, value)` assertion embedded in a token.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Claim {
	/// Claim type, e.g. `sub` or `email`.
	#[serde(rename = "type")]
	pub claim_type: String,
	/// Claim value.
	pub value: String,
}
impl Claim {
	/// Creates a claim from its type and value.
	pub fn new(claim_type: impl Into<String>, value: impl Into<String>) -> Self {
		Self { claim_type: claim_type.into(), value: value.into() }
	}

	/// Returns true if the claim carries the given type.
	pub fn is(&self, claim_type: &str) -> bool {
		self.claim_type == claim_type
	}
}

/// Insertion-ordered set of identity-token claims keyed by `(type, value)`.
///
/// Two claims sharing a type but carrying different values are both kept; an exact
/// repeat of an earlier pair is dropped.
#[derive(Clone, Debug, Default)]
pub struct IdentityClaimSet {
	claims: Vec<Claim>,
	seen: HashSet<(String, String)>,
}
impl IdentityClaimSet {
	/// Creates an empty set.
	pub fn new() -> Self {
		Self::default()
	}

	/// Inserts a claim, returning `false` when the exact pair was already present.
	pub fn insert(&mut self, claim: Claim) -> bool {
		if !self.seen.insert((claim.claim_type.clone(), claim.value.clone())) {
			return false;
		}

		self.claims.push(claim);

		true
	}

	/// Number of distinct claims.
	pub fn len(&self) -> usize {
		self.claims.len()
	}

	/// Returns true if the set holds no claims.
	pub fn is_empty(&self) -> bool {
		self.claims.is_empty()
	}

	/// Consumes the set, yielding claims in first-seen order.
	pub fn into_vec(self) -> Vec<Claim> {
		self.claims
	}
}
impl Extend<Claim> for IdentityClaimSet {
	fn extend<I>(&mut self, iter: I)
	where
		I: IntoIterator<Item = Claim>,
	{
		for claim in iter {
			self.insert(claim);
		}
	}
}
impl FromIterator<Claim> for IdentityClaimSet {
	fn from_iter<I>(iter: I) -> Self
	where
		I: IntoIterator<Item = Claim>,
	{
		let mut set = Self::new();

		set.extend(iter);

		set
	}
}

/// Computes the OpenID Connect `at_hash` value for an access token.
///
/// The digest matches the hash size of the identity token's signing algorithm; the left
/// half of it is base64url-encoded without padding.
pub fn access_token_hash(access_token: &str, algorithm: SigningAlgorithm) -> String {
	let digest = match algorithm.digest_bits() {
		256 => Sha256::digest(access_token.as_bytes()).to_vec(),
		384 => Sha384::digest(access_token.as_bytes()).to_vec(),
		_ => Sha512::digest(access_token.as_bytes()).to_vec(),
	};

	URL_SAFE_NO_PAD.encode(&digest[..digest.len() / 2])
}
