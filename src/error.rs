//! Issuer-level error types shared across the factory, encoder, and models.

// self
use crate::{_prelude::*, token::TokenKind};

/// Issuer-wide result type alias returning [`Error`] by default.
pub type Result<T, E = Error> = std::result::Result<T, E>;

pub(crate) type BoxError = Box<dyn StdError + Send + Sync>;

/// Canonical issuer error exposed by public APIs.
#[derive(Debug, ThisError)]
pub enum Error {
	/// Local configuration or model construction problem.
	#[error(transparent)]
	Config(#[from] ConfigError),
	/// The authenticated principal is missing a claim the token requires.
	#[error(transparent)]
	Principal(#[from] crate::auth::PrincipalError),
	/// The claims provider failed; the original error is preserved as-is.
	#[error(transparent)]
	ClaimsProvider(#[from] crate::ext::ClaimsProviderError),
	/// The signer failed; the original error is preserved as-is.
	#[error(transparent)]
	Signing(#[from] crate::jwt::SigningError),

	/// A token reached the encoder without one of its protocol-mandated claims.
	#[error("The {kind} is missing the required `{claim_type}` claim.")]
	MissingRequiredClaim {
		/// Kind of the offending token.
		kind: TokenKind,
		/// Claim type that was expected.
		claim_type: &'static str,
	},
}

/// Configuration and validation failures raised while building issuer models.
#[derive(Debug, ThisError)]
pub enum ConfigError {
	/// Issuer URI cannot be parsed or is not an absolute http(s) URI.
	#[error("Issuer URI `{uri}` is invalid.")]
	InvalidIssuer {
		/// Raw URI supplied by the caller.
		uri: String,
		/// Underlying parsing failure, when the URI did not parse at all.
		#[source]
		source: Option<url::ParseError>,
	},
	/// A token lifetime of zero seconds was configured.
	#[error("The {kind} lifetime must be positive.")]
	NonPositiveLifetime {
		/// Token kind the lifetime applies to.
		kind: TokenKind,
	},
	/// Identifier validation failed.
	#[error("Identifier is invalid.")]
	InvalidIdentifier(#[from] crate::auth::IdentifierError),
	/// Requested scopes cannot be normalized.
	#[error("Requested scopes are invalid.")]
	InvalidScope(#[from] crate::auth::ScopeValidationError),
	/// JSON payload could not be deserialized into the target model.
	#[error("Malformed JSON payload.")]
	Deserialize {
		/// Structured parsing failure, including the failing path.
		#[source]
		source: serde_path_to_error::Error<serde_json::Error>,
	},
	/// Model could not be serialized for persistence.
	#[error("Model could not be serialized.")]
	Serialize {
		/// Underlying serializer failure.
		#[source]
		source: serde_json::Error,
	},
}
impl From<serde_path_to_error::Error<serde_json::Error>> for ConfigError {
	fn from(e: serde_path_to_error::Error<serde_json::Error>) -> Self {
		Self::Deserialize { source: e }
	}
}

/// Deserializes a JSON document while tracking the path of the first failure.
pub(crate) fn from_json_str<T>(json: &str) -> Result<T, ConfigError>
where
	T: serde::de::DeserializeOwned,
{
	let deserializer = &mut serde_json::Deserializer::from_str(json);

	Ok(serde_path_to_error::deserialize(deserializer)?)
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[derive(Debug, Deserialize)]
	struct Nested {
		#[allow(dead_code)]
		inner: Inner,
	}

	#[derive(Debug, Deserialize)]
	struct Inner {
		#[allow(dead_code)]
		lifetime: u32,
	}

	#[test]
	fn deserialize_errors_report_the_failing_path() {
		let err = from_json_str::<Nested>("{\"inner\":{\"lifetime\":\"soon\"}}")
			.expect_err("A string lifetime must be rejected.");
		let ConfigError::Deserialize { source } = err else {
			panic!("Expected a deserialize error, got {err:?}.");
		};

		assert_eq!(source.path().to_string(), "inner.lifetime");
	}

	#[test]
	fn missing_claim_message_names_token_and_claim() {
		let err = Error::MissingRequiredClaim { kind: TokenKind::AccessToken, claim_type: "scope" };

		assert_eq!(err.to_string(), "The access token is missing the required `scope` claim.");
	}
}
