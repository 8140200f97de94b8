//! Optional observability helpers for issuance calls.
//!
//! # Feature Flags
//!
//! - Enable `tracing` to emit structured spans named `oidc_token_issuer.issue` with the
//!   `token` (kind) and `stage` (call site) fields, plus debug/warn events for claim
//!   assembly.
//! - Enable `metrics` to increment the `oidc_token_issuer_issue_total` counter for every
//!   attempt/success/failure, labeled by `token` + `outcome`, and to sample the
//!   `oidc_token_issuer_token_claims` histogram with each built token's claim count.

mod metrics;
mod tracing;

pub use self::{metrics::*, tracing::*};

// self
use crate::_prelude::*;

/// Outcome labels recorded for each issuance call.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum IssueOutcome {
	/// Entry to an issuance helper.
	Attempt,
	/// Successful completion.
	Success,
	/// Failure propagated back to the caller.
	Failure,
}
impl IssueOutcome {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			IssueOutcome::Attempt => "attempt",
			IssueOutcome::Success => "success",
			IssueOutcome::Failure => "failure",
		}
	}

	/// Maps a call result onto its terminal outcome.
	pub fn of<T, E>(result: &Result<T, E>) -> Self {
		match result {
			Ok(_) => IssueOutcome::Success,
			Err(_) => IssueOutcome::Failure,
		}
	}
}
impl Display for IssueOutcome {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}
