//! JWT payload framing: registered members, validity window, and grouped claims.

// crates.io
use serde::{Serializer, ser::SerializeMap};
// self
use crate::{_prelude::*, auth::Claim, token::Token};

/// Registered members written by the encoder itself; claims with these types are skipped.
pub const REGISTERED_MEMBERS: [&str; 5] = ["iss", "aud", "nbf", "iat", "exp"];

/// `[not_before, expires_at]` window stamped onto a token when it is signed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ValidityWindow {
	/// Start of validity; also reported as the issued-at instant.
	pub not_before: OffsetDateTime,
	/// End of validity.
	pub expires_at: OffsetDateTime,
}
impl ValidityWindow {
	/// Window opening at `now` and lasting `lifetime_seconds`.
	pub fn starting_at(now: OffsetDateTime, lifetime_seconds: u32) -> Self {
		Self { not_before: now, expires_at: now + Duration::seconds(i64::from(lifetime_seconds)) }
	}
}

/// Everything the signer embeds into the compact token.
///
/// Serializes as a JSON object: `iss`, `aud`, `nbf`, `iat`, `exp`, then one member per
/// claim type in first-seen order. A type carried once maps to a string; a type carried
/// several times maps to an array of its values in claim order.
#[derive(Clone, Copy, Debug)]
pub struct JwtPayload<'a> {
	/// Issuer URI.
	pub issuer: &'a str,
	/// Audience.
	pub audience: &'a str,
	/// Validity window computed at signing time.
	pub window: ValidityWindow,
	/// Token claims in emission order.
	pub claims: &'a [Claim],
}
impl<'a> JwtPayload<'a> {
	/// Frames a token for signing within the provided window.
	pub fn new(token: &'a Token, window: ValidityWindow) -> Self {
		Self { issuer: &token.issuer, audience: &token.audience, window, claims: &token.claims }
	}

	/// Claim types that would overwrite a registered member and are left out.
	pub fn shadowed_claims(&self) -> impl Iterator<Item = &'a str> {
		self.claims
			.iter()
			.map(|claim| claim.claim_type.as_str())
			.filter(|claim_type| is_registered(claim_type))
	}

	/// Claim values grouped by type, in first-seen type order.
	pub fn grouped_claims(&self) -> Vec<(&'a str, Vec<&'a str>)> {
		let mut groups: Vec<(&'a str, Vec<&'a str>)> = Vec::new();

		for claim in self.claims {
			if is_registered(&claim.claim_type) {
				continue;
			}

			match groups.iter_mut().find(|(claim_type, _)| *claim_type == claim.claim_type) {
				Some((_, values)) => values.push(claim.value.as_str()),
				None => groups.push((claim.claim_type.as_str(), vec![claim.value.as_str()])),
			}
		}

		groups
	}
}
impl Serialize for JwtPayload<'_> {
	fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
	where
		S: Serializer,
	{
		let groups = self.grouped_claims();
		let issued_at = self.window.not_before.unix_timestamp();
		let mut map = serializer.serialize_map(Some(REGISTERED_MEMBERS.len() + groups.len()))?;

		map.serialize_entry("iss", self.issuer)?;
		map.serialize_entry("aud", self.audience)?;
		map.serialize_entry("nbf", &issued_at)?;
		map.serialize_entry("iat", &issued_at)?;
		map.serialize_entry("exp", &self.window.expires_at.unix_timestamp())?;

		for (claim_type, values) in &groups {
			match values.as_slice() {
				[single] => map.serialize_entry(claim_type, single)?,
				many => map.serialize_entry(claim_type, many)?,
			}
		}

		map.end()
	}
}

fn is_registered(claim_type: &str) -> bool {
	REGISTERED_MEMBERS.iter().any(|member| *member == claim_type)
}
