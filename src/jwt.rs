//! Token encoding: frames a [`Token`] as a JWT payload and hands it to a signer.
//!
//! The validity window is stamped when [`TokenEncoder::create_signed_token`] runs, not when
//! the token was built, so a token's lifetime always counts from the moment it is signed.

pub mod credential;
pub mod payload;
pub mod signer;

pub use credential::*;
pub use payload::*;
pub use signer::*;

// self
use crate::{
	_prelude::*,
	error::ConfigError,
	obs::{self, IssueOutcome, IssueSpan},
	token::Token,
};

/// Turns [`Token`] values into compact signed strings.
#[derive(Clone, Debug, Default)]
pub struct TokenEncoder<S = JwtSigner> {
	signer: S,
}
impl<S> TokenEncoder<S>
where
	S: TokenSigner,
{
	/// Creates an encoder that delegates signatures to `signer`.
	pub fn new(signer: S) -> Self {
		Self { signer }
	}

	/// Signer used by this encoder.
	pub fn signer(&self) -> &S {
		&self.signer
	}

	/// Signs the token with a validity window starting now.
	pub fn create_signed_token(
		&self,
		token: &Token,
		credential: &S::Credential,
	) -> Result<String> {
		self.create_signed_token_at(token, credential, OffsetDateTime::now_utc())
	}

	/// Signs the token with a validity window starting at `now`.
	pub fn create_signed_token_at(
		&self,
		token: &Token,
		credential: &S::Credential,
		now: OffsetDateTime,
	) -> Result<String> {
		let _span = IssueSpan::new(token.kind, "create_signed_token").entered();

		obs::record_issue_outcome(token.kind, IssueOutcome::Attempt);

		let result = self.sign(token, credential, now);

		obs::record_issue_outcome(token.kind, IssueOutcome::of(&result));

		result
	}

	fn sign(
		&self,
		token: &Token,
		credential: &S::Credential,
		now: OffsetDateTime,
	) -> Result<String> {
		if token.lifetime == 0 {
			return Err(ConfigError::NonPositiveLifetime { kind: token.kind }.into());
		}
		if let Some(claim_type) = token.missing_required_claim() {
			return Err(Error::MissingRequiredClaim { kind: token.kind, claim_type });
		}

		let payload = JwtPayload::new(token, ValidityWindow::starting_at(now, token.lifetime));

		for claim_type in payload.shadowed_claims() {
			obs::warn_reserved_claim(token.kind, claim_type);
		}

		Ok(self.signer.sign(&payload, credential)?)
	}
}
