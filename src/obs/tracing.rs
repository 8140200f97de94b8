// self
use crate::{_prelude::*, token::TokenKind};

/// A span builder used by issuance calls.
#[derive(Clone, Debug)]
pub struct IssueSpan {
	#[cfg(feature = "tracing")]
	span: tracing::Span,
}
impl IssueSpan {
	/// Creates a new span tagged with the provided token kind + stage.
	pub fn new(kind: TokenKind, stage: &'static str) -> Self {
		#[cfg(feature = "tracing")]
		{
			let span =
				tracing::info_span!("oidc_token_issuer.issue", token = kind.as_str(), stage);

			Self { span }
		}
		#[cfg(not(feature = "tracing"))]
		{
			let _ = (kind, stage);

			Self {}
		}
	}

	/// Enters the span for the rest of the synchronous call.
	pub fn entered(self) -> IssueSpanGuard {
		#[cfg(feature = "tracing")]
		{
			IssueSpanGuard { guard: self.span.entered() }
		}
		#[cfg(not(feature = "tracing"))]
		{
			let _ = self;

			IssueSpanGuard {}
		}
	}
}

/// RAII guard returned by [`IssueSpan::entered`].
pub struct IssueSpanGuard {
	#[cfg(feature = "tracing")]
	#[allow(dead_code)]
	guard: tracing::span::EnteredSpan,
}
impl Debug for IssueSpanGuard {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str("IssueSpanGuard(..)")
	}
}

/// Records how many claims a freshly built token carries and how many repeats were dropped.
pub fn trace_claims(kind: TokenKind, emitted: usize, dropped: usize) {
	#[cfg(feature = "tracing")]
	{
		tracing::debug!(token = kind.as_str(), emitted, dropped, "assembled token claims");
	}
	#[cfg(not(feature = "tracing"))]
	{
		let _ = (kind, emitted, dropped);
	}
}

/// Reports a claim left out of the JWT payload because it collides with a registered member.
pub fn warn_reserved_claim(kind: TokenKind, claim_type: &str) {
	#[cfg(feature = "tracing")]
	{
		tracing::warn!(
			token = kind.as_str(),
			claim_type,
			"claim collides with a registered JWT member and was skipped"
		);
	}
	#[cfg(not(feature = "tracing"))]
	{
		let _ = (kind, claim_type);
	}
}
