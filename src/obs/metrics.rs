// self
use crate::{obs::IssueOutcome, token::TokenKind};

/// Counts an issuance outcome via the global metrics recorder (when enabled).
pub fn record_issue_outcome(kind: TokenKind, outcome: IssueOutcome) {
	#[cfg(feature = "metrics")]
	{
		metrics::counter!(
			"oidc_token_issuer_issue_total",
			"token" => kind.as_str(),
			"outcome" => outcome.as_str()
		)
		.increment(1);
	}

	#[cfg(not(feature = "metrics"))]
	{
		let _ = (kind, outcome);
	}
}

/// Samples the number of claims carried by a freshly built token.
pub fn record_claim_count(kind: TokenKind, claims: usize) {
	#[cfg(feature = "metrics")]
	{
		metrics::histogram!("oidc_token_issuer_token_claims", "token" => kind.as_str())
			.record(claims as f64);
	}

	#[cfg(not(feature = "metrics"))]
	{
		let _ = (kind, claims);
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn recorders_are_callable_without_an_installed_recorder() {
		record_issue_outcome(TokenKind::AccessToken, IssueOutcome::Failure);
		record_claim_count(TokenKind::IdentityToken, 5);
	}

	#[test]
	fn outcome_follows_result() {
		assert_eq!(IssueOutcome::of::<(), ()>(&Err(())), IssueOutcome::Failure);
		assert_eq!(IssueOutcome::of::<_, ()>(&Ok(1)), IssueOutcome::Success);
	}
}
