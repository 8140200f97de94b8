//! Pre-signing token model shared by the factory and the encoder.

// self
use crate::{
	_prelude::*,
	auth::{self, Claim, claim_types},
	jwt::SigningAlgorithm,
};

/// Kind of credential a [`Token`] represents.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenKind {
	/// OpenID Connect identity token consumed by the client.
	IdentityToken,
	/// OAuth 2.0 bearer access token consumed by resource servers.
	AccessToken,
}
impl TokenKind {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			TokenKind::IdentityToken => "identity_token",
			TokenKind::AccessToken => "access_token",
		}
	}

	/// Claim types every token of this kind must carry before signing.
	pub const fn required_claims(self) -> &'static [&'static str] {
		match self {
			TokenKind::IdentityToken => &[
				claim_types::SUBJECT,
				claim_types::AUTHENTICATION_METHOD,
				claim_types::AUTHENTICATION_TIME,
			],
			TokenKind::AccessToken =>
				&[claim_types::SUBJECT, claim_types::CLIENT_ID, claim_types::SCOPE],
		}
	}
}
impl Display for TokenKind {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		match self {
			TokenKind::IdentityToken => f.write_str("identity token"),
			TokenKind::AccessToken => f.write_str("access token"),
		}
	}
}

/// Canonical representation of an issued credential before it is signed.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
	/// Identity or access token.
	pub kind: TokenKind,
	/// Canonical issuer URI of the provider.
	pub issuer: String,
	/// Client identifier (identity tokens) or the resources audience (access tokens).
	pub audience: String,
	/// Lifetime in seconds, measured from the moment of signing.
	pub lifetime: u32,
	/// Claims in emission order.
	pub claims: Vec<Claim>,
}
impl Token {
	/// Iterator over the values carried for a claim type, in claim order.
	pub fn claim_values<'a>(&'a self, claim_type: &str) -> impl Iterator<Item = &'a str> {
		self.claims
			.iter()
			.filter(move |claim| claim.is(claim_type))
			.map(|claim| claim.value.as_str())
	}

	/// First value carried for a claim type.
	pub fn claim_value(&self, claim_type: &str) -> Option<&str> {
		self.claim_values(claim_type).next()
	}

	/// Returns the first protocol-mandated claim type this token lacks, if any.
	pub fn missing_required_claim(&self) -> Option<&'static str> {
		self.kind
			.required_claims()
			.iter()
			.copied()
			.find(|required| !self.claims.iter().any(|claim| claim.is(required)))
	}

	/// Binds an identity token to the access token issued alongside it via `at_hash`.
	///
	/// Any earlier `at_hash` claim is replaced so the token carries exactly one.
	pub fn with_access_token_hash(
		mut self,
		access_token: &str,
		algorithm: SigningAlgorithm,
	) -> Self {
		self.claims.retain(|claim| !claim.is(claim_types::ACCESS_TOKEN_HASH));
		self.claims.push(Claim::new(
			claim_types::ACCESS_TOKEN_HASH,
			auth::access_token_hash(access_token, algorithm),
		));

		self
	}
}
