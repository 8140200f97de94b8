//! Signer contract and the built-in `jsonwebtoken` implementation.

// crates.io
use jsonwebtoken::{Header, errors::ErrorKind};
// self
use crate::{
	_prelude::*,
	error::BoxError,
	jwt::{JwtPayload, KeyFamily, SigningAlgorithm, SigningCredential},
};

/// Failures raised while producing a signature.
#[derive(Debug, ThisError)]
pub enum SigningError {
	/// The algorithm name is not one the signer understands.
	#[error("Signing algorithm `{name}` is not supported.")]
	UnsupportedAlgorithm {
		/// Raw algorithm name.
		name: String,
	},
	/// The algorithm cannot be used with the supplied key.
	#[error("Signing algorithm {algorithm} cannot be used with a {key} key.")]
	KeyMismatch {
		/// Requested algorithm.
		algorithm: SigningAlgorithm,
		/// Family of the key that was supplied.
		key: KeyFamily,
	},
	/// Key material is malformed or unusable.
	#[error("Signing key is invalid.")]
	InvalidKey {
		/// Underlying key failure.
		#[source]
		source: jsonwebtoken::errors::Error,
	},
	/// The payload could not be serialized or signed.
	#[error("Token could not be signed.")]
	Encoding {
		/// Underlying signing failure.
		#[source]
		source: jsonwebtoken::errors::Error,
	},
	/// Failure raised by a custom [`TokenSigner`].
	#[error("{source}")]
	External {
		/// Signer-specific error.
		#[source]
		source: BoxError,
	},
}
impl SigningError {
	/// Wraps a custom signer failure.
	pub fn external(src: impl 'static + Send + Sync + StdError) -> Self {
		Self::External { source: Box::new(src) }
	}

	pub(crate) fn invalid_key(source: jsonwebtoken::errors::Error) -> Self {
		Self::InvalidKey { source }
	}
}
impl From<jsonwebtoken::errors::Error> for SigningError {
	fn from(e: jsonwebtoken::errors::Error) -> Self {
		match e.kind() {
			ErrorKind::InvalidKeyFormat
			| ErrorKind::InvalidEcdsaKey
			| ErrorKind::InvalidRsaKey(_) => Self::invalid_key(e),
			_ => Self::Encoding { source: e },
		}
	}
}

/// Produces the compact serialization of a [`JwtPayload`].
///
/// The signer owns algorithm selection and key handling; the encoder only decides what
/// goes into the payload. Errors are returned to the caller without retries.
pub trait TokenSigner
where
	Self: Send + Sync,
{
	/// Key material the signer needs.
	type Credential: ?Sized;

	/// Signs the payload and returns `header.payload.signature`.
	fn sign(
		&self,
		payload: &JwtPayload<'_>,
		credential: &Self::Credential,
	) -> Result<String, SigningError>;
}

/// JWS compact signer backed by `jsonwebtoken`.
#[derive(Clone, Copy, Debug, Default)]
pub struct JwtSigner;
impl TokenSigner for JwtSigner {
	type Credential = SigningCredential;

	fn sign(
		&self,
		payload: &JwtPayload<'_>,
		credential: &SigningCredential,
	) -> Result<String, SigningError> {
		let mut header = Header::new(credential.algorithm().to_jwt_algorithm());

		header.kid = credential.key_id().map(str::to_owned);

		Ok(jsonwebtoken::encode(&header, payload, credential.encoding_key())?)
	}
}

#[cfg(test)]
mod tests {
	// crates.io
	use base64::{Engine as _, engine::general_purpose::URL_SAFE_NO_PAD};
	use time::macros;
	// self
	use super::*;
	use crate::{
		auth::Claim,
		jwt::ValidityWindow,
		token::{Token, TokenKind},
	};

	fn decode_segment(segment: &str) -> serde_json::Value {
		let bytes = URL_SAFE_NO_PAD.decode(segment).expect("JWT segments should be base64url.");

		serde_json::from_slice(&bytes).expect("JWT segments should be JSON.")
	}

	#[test]
	fn header_carries_algorithm_type_and_key_id() {
		let token = Token {
			kind: TokenKind::AccessToken,
			issuer: "https://idp.example.com".into(),
			audience: "https://idp.example.com/resources".into(),
			lifetime: 60,
			claims: vec![Claim::new("sub", "818727")],
		};
		let window = ValidityWindow::starting_at(macros::datetime!(2025-01-01 00:00 UTC), 60);
		let credential = SigningCredential::hmac(SigningAlgorithm::HS384, b"0123456789abcdef")
			.expect("HMAC credential should build.")
			.with_key_id("k1");
		let jwt = JwtSigner
			.sign(&JwtPayload::new(&token, window), &credential)
			.expect("Signing with an HMAC key should succeed.");
		let segments = jwt.split('.').collect::<Vec<_>>();

		assert_eq!(segments.len(), 3);

		let header = decode_segment(segments[0]);

		assert_eq!(header["alg"], "HS384");
		assert_eq!(header["typ"], "JWT");
		assert_eq!(header["kid"], "k1");
		assert_eq!(decode_segment(segments[1])["sub"], "818727");
	}

	#[test]
	fn external_errors_keep_their_message() {
		let err = SigningError::external(std::io::Error::other("hsm unreachable"));

		assert_eq!(err.to_string(), "hsm unreachable");
		assert!(StdError::source(&err).is_some());
	}
}
