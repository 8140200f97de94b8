//! Signing algorithms and the key material handed to [`JwtSigner`](crate::jwt::JwtSigner).

// crates.io
use jsonwebtoken::{Algorithm, EncodingKey};
// self
use crate::{_prelude::*, jwt::SigningError};

/// Key family a signing algorithm operates on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum KeyFamily {
	/// Shared-secret HMAC keys.
	Hmac,
	/// RSA private keys.
	Rsa,
	/// Elliptic-curve private keys.
	Ec,
	/// Edwards-curve private keys.
	Ed,
}
impl KeyFamily {
	/// Returns a stable label suitable for error messages.
	pub const fn as_str(self) -> &'static str {
		match self {
			KeyFamily::Hmac => "HMAC",
			KeyFamily::Rsa => "RSA",
			KeyFamily::Ec => "EC",
			KeyFamily::Ed => "Ed25519",
		}
	}
}
impl Display for KeyFamily {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// JOSE signing algorithms supported by the built-in signer.
#[allow(clippy::upper_case_acronyms)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SigningAlgorithm {
	/// HMAC with SHA-256.
	HS256,
	/// HMAC with SHA-384.
	HS384,
	/// HMAC with SHA-512.
	HS512,
	/// RSASSA-PKCS1-v1_5 with SHA-256.
	RS256,
	/// RSASSA-PKCS1-v1_5 with SHA-384.
	RS384,
	/// RSASSA-PKCS1-v1_5 with SHA-512.
	RS512,
	/// RSASSA-PSS with SHA-256.
	PS256,
	/// RSASSA-PSS with SHA-384.
	PS384,
	/// RSASSA-PSS with SHA-512.
	PS512,
	/// ECDSA with P-256 and SHA-256.
	ES256,
	/// ECDSA with P-384 and SHA-384.
	ES384,
	/// Ed25519.
	EdDSA,
}
impl SigningAlgorithm {
	/// Returns the algorithm name as used in JWT headers.
	pub const fn as_str(self) -> &'static str {
		match self {
			Self::HS256 => "HS256",
			Self::HS384 => "HS384",
			Self::HS512 => "HS512",
			Self::RS256 => "RS256",
			Self::RS384 => "RS384",
			Self::RS512 => "RS512",
			Self::PS256 => "PS256",
			Self::PS384 => "PS384",
			Self::PS512 => "PS512",
			Self::ES256 => "ES256",
			Self::ES384 => "ES384",
			Self::EdDSA => "EdDSA",
		}
	}

	/// Key family the algorithm signs with.
	pub const fn family(self) -> KeyFamily {
		match self {
			Self::HS256 | Self::HS384 | Self::HS512 => KeyFamily::Hmac,
			Self::RS256 | Self::RS384 | Self::RS512 | Self::PS256 | Self::PS384 | Self::PS512 =>
				KeyFamily::Rsa,
			Self::ES256 | Self::ES384 => KeyFamily::Ec,
			Self::EdDSA => KeyFamily::Ed,
		}
	}

	/// Size of the hash the algorithm is built on; Ed25519 counts as SHA-512.
	pub const fn digest_bits(self) -> u16 {
		match self {
			Self::HS256 | Self::RS256 | Self::PS256 | Self::ES256 => 256,
			Self::HS384 | Self::RS384 | Self::PS384 | Self::ES384 => 384,
			Self::HS512 | Self::RS512 | Self::PS512 | Self::EdDSA => 512,
		}
	}

	/// Converts to the `jsonwebtoken` algorithm type.
	pub const fn to_jwt_algorithm(self) -> Algorithm {
		match self {
			Self::HS256 => Algorithm::HS256,
			Self::HS384 => Algorithm::HS384,
			Self::HS512 => Algorithm::HS512,
			Self::RS256 => Algorithm::RS256,
			Self::RS384 => Algorithm::RS384,
			Self::RS512 => Algorithm::RS512,
			Self::PS256 => Algorithm::PS256,
			Self::PS384 => Algorithm::PS384,
			Self::PS512 => Algorithm::PS512,
			Self::ES256 => Algorithm::ES256,
			Self::ES384 => Algorithm::ES384,
			Self::EdDSA => Algorithm::EdDSA,
		}
	}
}
impl Display for SigningAlgorithm {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}
impl FromStr for SigningAlgorithm {
	type Err = SigningError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		const ALL: [SigningAlgorithm; 12] = [
			SigningAlgorithm::HS256,
			SigningAlgorithm::HS384,
			SigningAlgorithm::HS512,
			SigningAlgorithm::RS256,
			SigningAlgorithm::RS384,
			SigningAlgorithm::RS512,
			SigningAlgorithm::PS256,
			SigningAlgorithm::PS384,
			SigningAlgorithm::PS512,
			SigningAlgorithm::ES256,
			SigningAlgorithm::ES384,
			SigningAlgorithm::EdDSA,
		];

		ALL.into_iter()
			.find(|algorithm| algorithm.as_str() == s)
			.ok_or_else(|| SigningError::UnsupportedAlgorithm { name: s.to_owned() })
	}
}

/// Signing key plus the algorithm and key id it is published under.
#[derive(Clone)]
pub struct SigningCredential {
	algorithm: SigningAlgorithm,
	key: EncodingKey,
	key_id: Option<String>,
}
impl SigningCredential {
	/// Builds an HMAC credential from a shared secret.
	pub fn hmac(algorithm: SigningAlgorithm, secret: &[u8]) -> Result<Self, SigningError> {
		ensure_family(algorithm, KeyFamily::Hmac)?;

		Ok(Self::with_key(algorithm, EncodingKey::from_secret(secret)))
	}

	/// Builds an RSA credential (RS* or PS*) from a PEM-encoded private key.
	pub fn from_rsa_pem(algorithm: SigningAlgorithm, pem: &[u8]) -> Result<Self, SigningError> {
		ensure_family(algorithm, KeyFamily::Rsa)?;

		let key = EncodingKey::from_rsa_pem(pem).map_err(SigningError::invalid_key)?;

		Ok(Self::with_key(algorithm, key))
	}

	/// Builds an ECDSA credential from a PEM-encoded PKCS#8 private key.
	pub fn from_ec_pem(algorithm: SigningAlgorithm, pem: &[u8]) -> Result<Self, SigningError> {
		ensure_family(algorithm, KeyFamily::Ec)?;

		let key = EncodingKey::from_ec_pem(pem).map_err(SigningError::invalid_key)?;

		Ok(Self::with_key(algorithm, key))
	}

	/// Builds an Ed25519 credential from a PEM-encoded PKCS#8 private key.
	pub fn from_ed_pem(pem: &[u8]) -> Result<Self, SigningError> {
		let key = EncodingKey::from_ed_pem(pem).map_err(SigningError::invalid_key)?;

		Ok(Self::with_key(SigningAlgorithm::EdDSA, key))
	}

	/// Publishes the credential under a key id (`kid` header).
	pub fn with_key_id(mut self, key_id: impl Into<String>) -> Self {
		self.key_id = Some(key_id.into());

		self
	}

	/// Signing algorithm.
	pub fn algorithm(&self) -> SigningAlgorithm {
		self.algorithm
	}

	/// Key id, if one was assigned.
	pub fn key_id(&self) -> Option<&str> {
		self.key_id.as_deref()
	}

	pub(crate) fn encoding_key(&self) -> &EncodingKey {
		&self.key
	}

	fn with_key(algorithm: SigningAlgorithm, key: EncodingKey) -> Self {
		Self { algorithm, key, key_id: None }
	}
}
impl Debug for SigningCredential {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("SigningCredential")
			.field("algorithm", &self.algorithm)
			.field("key", &"<redacted>")
			.field("key_id", &self.key_id)
			.finish()
	}
}

fn ensure_family(algorithm: SigningAlgorithm, key: KeyFamily) -> Result<(), SigningError> {
	if algorithm.family() != key {
		return Err(SigningError::KeyMismatch { algorithm, key });
	}

	Ok(())
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn algorithm_names_round_trip() {
		for name in ["HS256", "RS384", "PS512", "ES256", "EdDSA"] {
			let algorithm =
				SigningAlgorithm::from_str(name).expect("Known algorithm names should parse.");

			assert_eq!(algorithm.to_string(), name);
		}

		assert!(matches!(
			SigningAlgorithm::from_str("none"),
			Err(SigningError::UnsupportedAlgorithm { name }) if name == "none"
		));
		assert!(SigningAlgorithm::from_str("hs256").is_err(), "Names are case-sensitive.");
	}

	#[test]
	fn credential_rejects_mismatched_families() {
		let err = SigningCredential::hmac(SigningAlgorithm::RS256, b"secret")
			.expect_err("HMAC keys cannot sign RS256.");

		assert!(matches!(
			err,
			SigningError::KeyMismatch { algorithm: SigningAlgorithm::RS256, key: KeyFamily::Hmac }
		));
		assert!(SigningCredential::from_ec_pem(SigningAlgorithm::PS256, b"").is_err());
	}

	#[test]
	fn malformed_pem_is_an_invalid_key() {
		let err = SigningCredential::from_rsa_pem(SigningAlgorithm::RS256, b"not a pem")
			.expect_err("Garbage PEM input must be rejected.");

		assert!(matches!(err, SigningError::InvalidKey { .. }));
	}

	#[test]
	fn debug_redacts_key_material() {
		let credential = SigningCredential::hmac(SigningAlgorithm::HS256, b"super-secret")
			.expect("HMAC credential should build.")
			.with_key_id("2025-01");
		let rendered = format!("{credential:?}");

		assert!(rendered.contains("<redacted>"));
		assert!(!rendered.contains("super-secret"));
		assert_eq!(credential.key_id(), Some("2025-01"));
		assert_eq!(credential.algorithm(), SigningAlgorithm::HS256);
	}
}
