//! Issuer configuration handed explicitly to every issuance call.

// self
use crate::{_prelude::*, error::ConfigError};

/// Path appended to the issuer URI to form the shared access-token audience.
pub const RESOURCES_PATH: &str = "/resources";

/// Provider-wide settings consumed by token issuance.
///
/// The issuer URI is stored without a trailing slash so suffixes such as
/// [`RESOURCES_PATH`] can be appended directly.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawIssuerSettings", into = "RawIssuerSettings")]
pub struct IssuerSettings {
	issuer_uri: String,
}
impl IssuerSettings {
	/// Validates and normalizes an issuer URI.
	pub fn new(issuer_uri: impl AsRef<str>) -> Result<Self, ConfigError> {
		let raw = issuer_uri.as_ref();
		let invalid = |source: Option<url::ParseError>| ConfigError::InvalidIssuer {
			uri: raw.to_owned(),
			source,
		};

		// `Url::parse` strips surrounding whitespace, but the raw value is what gets stored.
		if raw.chars().any(|c| c.is_whitespace() || c.is_control()) {
			return Err(invalid(None));
		}

		let url = Url::parse(raw).map_err(|e| invalid(Some(e)))?;

		if !matches!(url.scheme(), "http" | "https") || url.cannot_be_a_base() {
			return Err(invalid(None));
		}
		if url.query().is_some() || url.fragment().is_some() {
			return Err(invalid(None));
		}

		Ok(Self { issuer_uri: raw.trim_end_matches('/').to_owned() })
	}

	/// Loads settings from a JSON document such as `{"issuer_uri": "https://idp"}`.
	pub fn from_json(json: &str) -> Result<Self, ConfigError> {
		let raw: RawIssuerSettings = crate::error::from_json_str(json)?;

		Self::new(raw.issuer_uri)
	}

	/// Canonical issuer URI.
	pub fn issuer_uri(&self) -> &str {
		&self.issuer_uri
	}

	/// Audience shared by every access token this provider issues.
	pub fn resources_audience(&self) -> String {
		format!("{}{RESOURCES_PATH}", self.issuer_uri)
	}
}

#[derive(Serialize, Deserialize)]
struct RawIssuerSettings {
	issuer_uri: String,
}
impl TryFrom<RawIssuerSettings> for IssuerSettings {
	type Error = ConfigError;

	fn try_from(value: RawIssuerSettings) -> Result<Self, Self::Error> {
		Self::new(value.issuer_uri)
	}
}
impl From<IssuerSettings> for RawIssuerSettings {
	fn from(value: IssuerSettings) -> Self {
		Self { issuer_uri: value.issuer_uri }
	}
}
