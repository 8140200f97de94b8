//! Client and subject identifiers, validated once at the edge.

// std
use std::ops::Deref;
// self
use crate::_prelude::*;

/// Identifier family; each family has its own validation rules.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum IdentifierKind {
	/// OAuth 2.0 client identifier.
	Client,
	/// OpenID Connect subject identifier.
	Subject,
}
impl IdentifierKind {
	/// Longest identifier accepted for the family, in characters.
	///
	/// Subjects follow the OpenID Connect ceiling of 255 ASCII characters.
	pub const fn max_len(self) -> usize {
		match self {
			IdentifierKind::Client => 128,
			IdentifierKind::Subject => 255,
		}
	}

	/// Returns a stable lowercase label.
	pub const fn as_str(self) -> &'static str {
		match self {
			IdentifierKind::Client => "client",
			IdentifierKind::Subject => "subject",
		}
	}

	fn validate(self, view: &str) -> Result<(), IdentifierError> {
		if view.is_empty() {
			return Err(IdentifierError::Empty { kind: self });
		}
		if view.chars().any(|c| c.is_whitespace() || c.is_control()) {
			return Err(IdentifierError::ContainsWhitespace { kind: self });
		}
		if self == IdentifierKind::Subject && !view.is_ascii() {
			return Err(IdentifierError::NonAscii { kind: self });
		}

		let max = self.max_len();

		if view.chars().count() > max {
			return Err(IdentifierError::TooLong { kind: self, max });
		}

		Ok(())
	}
}
impl Display for IdentifierKind {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Error returned when identifier validation fails.
#[derive(Clone, Debug, PartialEq, Eq, ThisError)]
pub enum IdentifierError {
	/// The identifier was empty.
	#[error("The {kind} identifier cannot be empty.")]
	Empty {
		/// Identifier family.
		kind: IdentifierKind,
	},
	/// The identifier contains whitespace or control characters.
	#[error("The {kind} identifier contains whitespace or control characters.")]
	ContainsWhitespace {
		/// Identifier family.
		kind: IdentifierKind,
	},
	/// The identifier contains non-ASCII characters where only ASCII is allowed.
	#[error("The {kind} identifier must be ASCII.")]
	NonAscii {
		/// Identifier family.
		kind: IdentifierKind,
	},
	/// The identifier exceeded the family's length ceiling.
	#[error("The {kind} identifier exceeds {max} characters.")]
	TooLong {
		/// Identifier family.
		kind: IdentifierKind,
		/// Maximum permitted character count.
		max: usize,
	},
}

macro_rules! def_id {
	($(#[$meta:meta])* $name:ident => $kind:expr) => {
		$(#[$meta])*
		#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
		#[serde(try_from = "String", into = "String")]
		pub struct $name(String);
		impl $name {
			/// Identifier family enforced by this type.
			pub const KIND: IdentifierKind = $kind;

			/// Validates and wraps an identifier.
			pub fn new(value: impl Into<String>) -> Result<Self, IdentifierError> {
				Self::try_from(value.into())
			}

			/// Borrows the raw identifier.
			pub fn as_str(&self) -> &str {
				&self.0
			}
		}
		impl Deref for $name {
			type Target = str;

			fn deref(&self) -> &str {
				&self.0
			}
		}
		impl AsRef<str> for $name {
			fn as_ref(&self) -> &str {
				&self.0
			}
		}
		impl TryFrom<String> for $name {
			type Error = IdentifierError;

			fn try_from(value: String) -> Result<Self, Self::Error> {
				Self::KIND.validate(&value)?;

				Ok(Self(value))
			}
		}
		impl From<$name> for String {
			fn from(id: $name) -> Self {
				id.0
			}
		}
		impl FromStr for $name {
			type Err = IdentifierError;

			fn from_str(s: &str) -> Result<Self, Self::Err> {
				Self::new(s)
			}
		}
		impl Debug for $name {
			fn fmt(&self, f: &mut Formatter) -> FmtResult {
				f.debug_tuple(stringify!($name)).field(&self.0).finish()
			}
		}
		impl Display for $name {
			fn fmt(&self, f: &mut Formatter) -> FmtResult {
				f.write_str(&self.0)
			}
		}
	};
}

def_id! {
	/// Identifier of a registered OAuth 2.0 client; also the identity-token audience.
	ClientId => IdentifierKind::Client
}
def_id! {
	/// Locally unique, never reassigned identifier of an authenticated end-user.
	SubjectId => IdentifierKind::Subject
}
