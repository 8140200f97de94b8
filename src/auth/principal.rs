//! Claims-backed view of the authenticated end-user handed to the issuer.

// self
use crate::{
	_prelude::*,
	auth::{Claim, SubjectId, claim_types},
};

/// Failures raised when the principal lacks a claim the token needs.
#[derive(Clone, Debug, PartialEq, Eq, ThisError)]
pub enum PrincipalError {
	/// The principal carries no claim of the requested type.
	#[error("Principal has no `{claim_type}` claim.")]
	MissingClaim {
		/// Claim type that was looked up.
		claim_type: &'static str,
	},
	/// The `auth_time` claim is not an epoch-seconds integer.
	#[error("Principal authentication time `{value}` is not an epoch timestamp.")]
	InvalidAuthenticationTime {
		/// Raw claim value.
		value: String,
	},
}

/// Authenticated subject as established by the login step.
///
/// The principal is a bag of claims; the accessors below pick out the ones token
/// issuance depends on and fail when they are absent.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Principal {
	claims: Vec<Claim>,
}
impl Principal {
	/// Builds a principal carrying subject, authentication method, and authentication time.
	pub fn new(
		subject: SubjectId,
		authentication_method: impl Into<String>,
		authenticated_at: OffsetDateTime,
	) -> Self {
		Self {
			claims: vec![
				Claim::new(claim_types::SUBJECT, subject),
				Claim::new(claim_types::AUTHENTICATION_METHOD, authentication_method),
				Claim::new(
					claim_types::AUTHENTICATION_TIME,
					authenticated_at.unix_timestamp().to_string(),
				),
			],
		}
	}

	/// Wraps an arbitrary claim list without validation.
	pub fn from_claims(claims: Vec<Claim>) -> Self {
		Self { claims }
	}

	/// Appends an extra claim to the principal.
	pub fn with_claim(mut self, claim: Claim) -> Self {
		self.claims.push(claim);

		self
	}

	/// All claims held by the principal.
	pub fn claims(&self) -> &[Claim] {
		&self.claims
	}

	/// Returns the first value for the provided claim type.
	pub fn find(&self, claim_type: &str) -> Option<&str> {
		self.claims.iter().find(|claim| claim.is(claim_type)).map(|claim| claim.value.as_str())
	}

	/// Subject identifier.
	pub fn subject(&self) -> Result<&str, PrincipalError> {
		self.require(claim_types::SUBJECT)
	}

	/// Authentication method reference.
	pub fn authentication_method(&self) -> Result<&str, PrincipalError> {
		self.require(claim_types::AUTHENTICATION_METHOD)
	}

	/// Authentication instant in epoch seconds.
	pub fn authentication_time_epoch(&self) -> Result<i64, PrincipalError> {
		let raw = self.require(claim_types::AUTHENTICATION_TIME)?;

		raw.trim()
			.parse()
			.map_err(|_| PrincipalError::InvalidAuthenticationTime { value: raw.to_owned() })
	}

	fn require(&self, claim_type: &'static str) -> Result<&str, PrincipalError> {
		self.find(claim_type).ok_or(PrincipalError::MissingClaim { claim_type })
	}
}

#[cfg(test)]
mod tests {
	// crates.io
	use time::macros;
	// self
	use super::*;

	#[test]
	fn accessors_read_the_login_claims() {
		let subject = SubjectId::new("818727").expect("Subject fixture should be valid.");
		let principal =
			Principal::new(subject, "password", macros::datetime!(2025-01-01 00:00 UTC));

		assert_eq!(principal.subject(), Ok("818727"));
		assert_eq!(principal.authentication_method(), Ok("password"));
		assert_eq!(principal.authentication_time_epoch(), Ok(1_735_689_600));
	}

	#[test]
	fn missing_and_malformed_claims_fail() {
		let principal = Principal::from_claims(vec![Claim::new(
			claim_types::AUTHENTICATION_TIME,
			"yesterday",
		)]);

		assert_eq!(
			principal.subject(),
			Err(PrincipalError::MissingClaim { claim_type: claim_types::SUBJECT })
		);
		assert_eq!(
			principal.authentication_time_epoch(),
			Err(PrincipalError::InvalidAuthenticationTime { value: "yesterday".into() })
		);
	}

	#[test]
	fn first_value_wins_for_repeated_types() {
		let principal = Principal::from_claims(vec![
			Claim::new(claim_types::SUBJECT, "first"),
			Claim::new(claim_types::SUBJECT, "second"),
		])
		.with_claim(Claim::new("idp", "local"));

		assert_eq!(principal.subject(), Ok("first"));
		assert_eq!(principal.find("idp"), Some("local"));
		assert_eq!(principal.claims().len(), 3);
	}
}
