//! User profile lookups passed through to claims providers.
//!
//! Profile storage belongs to the host. [`MemoryProfileStore`] is a development fixture
//! for local runs and tests, not a user store to deploy.

// self
use crate::{_prelude::*, auth::Claim, ext::ClaimsProviderError};

/// Read access to the host's user store.
///
/// The issuer never calls this itself; it hands the accessor to the [`ClaimsProvider`]
/// so the provider can resolve profile claims for the scopes it grants.
///
/// [`ClaimsProvider`]: crate::ext::ClaimsProvider
pub trait ProfileAccessor
where
	Self: Send + Sync,
{
	/// Returns the subject's claims whose types appear in `requested_claim_types`.
	///
	/// An empty request asks for every claim the store holds for the subject.
	fn profile_claims(
		&self,
		subject: &str,
		requested_claim_types: &[&str],
	) -> Result<Vec<Claim>, ClaimsProviderError>;
}

type ProfileMap = Arc<RwLock<HashMap<String, Vec<Claim>>>>;

/// Thread-safe in-process profile store for local development and tests.
///
/// Profiles live only in memory and are lost when the process exits; production hosts
/// implement [`ProfileAccessor`] over their own user store instead.
#[derive(Clone, Debug, Default)]
pub struct MemoryProfileStore(ProfileMap);
impl MemoryProfileStore {
	/// Replaces the stored profile for a subject.
	pub fn insert(&self, subject: impl Into<String>, claims: Vec<Claim>) {
		self.0.write().insert(subject.into(), claims);
	}

	/// Removes a subject, returning its former profile.
	pub fn remove(&self, subject: &str) -> Option<Vec<Claim>> {
		self.0.write().remove(subject)
	}
}
impl ProfileAccessor for MemoryProfileStore {
	fn profile_claims(
		&self,
		subject: &str,
		requested_claim_types: &[&str],
	) -> Result<Vec<Claim>, ClaimsProviderError> {
		let guard = self.0.read();
		let Some(claims) = guard.get(subject) else {
			return Ok(Vec::new());
		};

		Ok(claims
			.iter()
			.filter(|claim| {
				requested_claim_types.is_empty()
					|| requested_claim_types.iter().any(|requested| *requested == claim.claim_type)
			})
			.cloned()
			.collect())
	}
}
