//! Token factory: assembles identity and access tokens for the authorize and token endpoints.
//!
//! On the authorize endpoint the factory builds fresh tokens from the principal's login
//! claims plus whatever the [`ClaimsProvider`] contributes. On the token endpoint it hands
//! back the tokens minted when the authorization code was issued, untouched.

// self
use crate::{
	_prelude::*,
	auth::{Claim, IdentityClaimSet, Principal, claim_types},
	ext::{AccessClaimsContext, ClaimsProvider, IdentityClaimsContext, ProfileAccessor},
	obs::{self, IssueOutcome, IssueSpan},
	request::{ValidatedAuthorizeRequest, ValidatedTokenRequest},
	settings::IssuerSettings,
	token::{Token, TokenKind},
};

/// Builds [`Token`] values from validated requests.
///
/// The factory holds no per-request state; one instance can serve every request
/// concurrently.
#[derive(Clone)]
pub struct TokenFactory {
	/// Scope-to-claim policy consulted for every freshly built token.
	pub claims_provider: Arc<dyn ClaimsProvider>,
	/// User store handed through to the claims provider.
	pub profile: Arc<dyn ProfileAccessor>,
}
impl TokenFactory {
	/// Creates a factory around the host's claims provider and user store.
	pub fn new(
		claims_provider: Arc<dyn ClaimsProvider>,
		profile: Arc<dyn ProfileAccessor>,
	) -> Self {
		Self { claims_provider, profile }
	}

	/// Builds the identity token for an authorize request.
	///
	/// The token carries `sub`, `amr`, `auth_time`, the request nonce when present, and the
	/// provider's identity claims, deduplicated by exact `(type, value)` pair. When no
	/// access token is requested alongside it, the provider is asked for the full claim set
	/// so the identity token stands on its own.
	pub fn create_identity_token(
		&self,
		settings: &IssuerSettings,
		request: &ValidatedAuthorizeRequest,
		principal: &Principal,
	) -> Result<Token> {
		const KIND: TokenKind = TokenKind::IdentityToken;

		let _span = IssueSpan::new(KIND, "create_identity_token").entered();

		obs::record_issue_outcome(KIND, IssueOutcome::Attempt);

		let result = self.build_identity_token(settings, request, principal);

		obs::record_issue_outcome(KIND, IssueOutcome::of(&result));

		result
	}

	/// Builds the access token for an authorize request.
	///
	/// The token carries `sub`, `client_id`, and the space-joined `scope`, followed by the
	/// provider's access claims exactly as returned.
	pub fn create_access_token(
		&self,
		settings: &IssuerSettings,
		request: &ValidatedAuthorizeRequest,
		principal: &Principal,
	) -> Result<Token> {
		const KIND: TokenKind = TokenKind::AccessToken;

		let _span = IssueSpan::new(KIND, "create_access_token").entered();

		obs::record_issue_outcome(KIND, IssueOutcome::Attempt);

		let result = self.build_access_token(settings, request, principal);

		obs::record_issue_outcome(KIND, IssueOutcome::of(&result));

		result
	}

	/// Returns the identity token minted alongside the exchanged authorization code.
	pub fn exchange_identity_token(&self, request: &ValidatedTokenRequest) -> Token {
		Self::stored_token(TokenKind::IdentityToken, &request.authorization_code.identity_token)
	}

	/// Returns the access token minted alongside the exchanged authorization code.
	pub fn exchange_access_token(&self, request: &ValidatedTokenRequest) -> Token {
		Self::stored_token(TokenKind::AccessToken, &request.authorization_code.access_token)
	}

	fn build_identity_token(
		&self,
		settings: &IssuerSettings,
		request: &ValidatedAuthorizeRequest,
		principal: &Principal,
	) -> Result<Token> {
		let mut claims = IdentityClaimSet::from_iter([
			Claim::new(claim_types::SUBJECT, principal.subject()?),
			Claim::new(claim_types::AUTHENTICATION_METHOD, principal.authentication_method()?),
			Claim::new(
				claim_types::AUTHENTICATION_TIME,
				principal.authentication_time_epoch()?.to_string(),
			),
		]);

		if let Some(nonce) = request.nonce() {
			claims.insert(Claim::new(claim_types::NONCE, nonce));
		}

		let ctx = IdentityClaimsContext {
			principal,
			client: &request.client,
			scopes: &request.scopes,
			settings,
			include_all_claims: !request.access_token_requested,
			profile: self.profile.as_ref(),
		};
		let provided = self.claims_provider.identity_token_claims(&ctx)?;
		let offered = claims.len() + provided.len();

		claims.extend(provided);
		obs::trace_claims(TokenKind::IdentityToken, claims.len(), offered - claims.len());
		obs::record_claim_count(TokenKind::IdentityToken, claims.len());

		Ok(Token {
			kind: TokenKind::IdentityToken,
			issuer: settings.issuer_uri().to_owned(),
			audience: request.client.client_id.to_string(),
			lifetime: request.client.identity_token_lifetime,
			claims: claims.into_vec(),
		})
	}

	fn build_access_token(
		&self,
		settings: &IssuerSettings,
		request: &ValidatedAuthorizeRequest,
		principal: &Principal,
	) -> Result<Token> {
		let mut claims = vec![
			Claim::new(claim_types::SUBJECT, principal.subject()?),
			Claim::new(claim_types::CLIENT_ID, request.client.client_id.to_string()),
			Claim::new(claim_types::SCOPE, request.scopes.to_space_separated()),
		];
		let ctx = AccessClaimsContext {
			principal,
			client: &request.client,
			scopes: &request.scopes,
			settings,
			profile: self.profile.as_ref(),
		};

		claims.extend(self.claims_provider.access_token_claims(&ctx)?);
		obs::trace_claims(TokenKind::AccessToken, claims.len(), 0);
		obs::record_claim_count(TokenKind::AccessToken, claims.len());

		Ok(Token {
			kind: TokenKind::AccessToken,
			issuer: settings.issuer_uri().to_owned(),
			audience: settings.resources_audience(),
			lifetime: request.client.access_token_lifetime,
			claims,
		})
	}

	fn stored_token(kind: TokenKind, token: &Token) -> Token {
		let _span = IssueSpan::new(kind, "exchange_code").entered();

		obs::record_issue_outcome(kind, IssueOutcome::Attempt);
		obs::record_issue_outcome(kind, IssueOutcome::Success);

		token.clone()
	}
}
impl Debug for TokenFactory {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str("TokenFactory(..)")
	}
}

#[cfg(test)]
mod tests {
	// std
	use std::sync::atomic::{AtomicBool, Ordering};
	// crates.io
	use time::macros;
	// self
	use super::*;
	use crate::{
		auth::{ClientId, ScopeList, SubjectId},
		ext::{ClaimsProviderError, MemoryProfileStore},
		request::Client,
	};

	#[derive(Default)]
	struct FixedProvider {
		identity: Vec<Claim>,
		access: Vec<Claim>,
		include_all_claims: AtomicBool,
	}
	impl ClaimsProvider for FixedProvider {
		fn identity_token_claims(
			&self,
			ctx: &IdentityClaimsContext<'_>,
		) -> Result<Vec<Claim>, ClaimsProviderError> {
			self.include_all_claims.store(ctx.include_all_claims, Ordering::SeqCst);

			Ok(self.identity.clone())
		}

		fn access_token_claims(
			&self,
			_: &AccessClaimsContext<'_>,
		) -> Result<Vec<Claim>, ClaimsProviderError> {
			Ok(self.access.clone())
		}
	}

	fn settings() -> IssuerSettings {
		IssuerSettings::new("https://idp.example.com").expect("Issuer fixture should be valid.")
	}

	fn principal() -> Principal {
		Principal::new(
			SubjectId::new("818727").expect("Subject fixture should be valid."),
			"password",
			macros::datetime!(2025-01-01 00:00 UTC),
		)
	}

	fn request() -> ValidatedAuthorizeRequest {
		let client = Client::builder(ClientId::new("web-app").expect("Client id should be valid."))
			.build()
			.expect("Client fixture should build.");
		let scopes = ScopeList::new(["openid", "profile"]).expect("Scopes should be valid.");

		ValidatedAuthorizeRequest::new(client, scopes)
	}

	fn factory(provider: Arc<FixedProvider>) -> TokenFactory {
		TokenFactory::new(provider, Arc::new(MemoryProfileStore::default()))
	}

	#[test]
	fn identity_claims_are_deduplicated_against_mandatory_claims() {
		let provider = Arc::new(FixedProvider {
			identity: vec![
				Claim::new(claim_types::SUBJECT, "818727"),
				Claim::new("role", "admin"),
				Claim::new("role", "auditor"),
				Claim::new("role", "admin"),
			],
			..Default::default()
		});
		let token = factory(provider)
			.create_identity_token(&settings(), &request(), &principal())
			.expect("Identity token should build.");
		let types = token.claims.iter().map(|claim| claim.claim_type.as_str()).collect::<Vec<_>>();

		assert_eq!(types, vec!["sub", "amr", "auth_time", "role", "role"]);
		assert_eq!(token.claim_values("role").collect::<Vec<_>>(), vec!["admin", "auditor"]);
	}

	#[test]
	fn include_all_claims_tracks_access_token_request() {
		let provider = Arc::new(FixedProvider::default());
		let factory = factory(provider.clone());

		factory
			.create_identity_token(&settings(), &request(), &principal())
			.expect("Identity token should build.");

		assert!(provider.include_all_claims.load(Ordering::SeqCst));

		factory
			.create_identity_token(
				&settings(),
				&request().with_access_token_requested(true),
				&principal(),
			)
			.expect("Identity token should build.");

		assert!(!provider.include_all_claims.load(Ordering::SeqCst));
	}

	#[test]
	fn access_claims_keep_provider_duplicates() {
		let provider = Arc::new(FixedProvider {
			access: vec![Claim::new("role", "admin"), Claim::new("role", "admin")],
			..Default::default()
		});
		let token = factory(provider)
			.create_access_token(&settings(), &request(), &principal())
			.expect("Access token should build.");

		assert_eq!(token.audience, "https://idp.example.com/resources");
		assert_eq!(token.lifetime, Client::DEFAULT_ACCESS_TOKEN_LIFETIME);
		assert_eq!(token.claim_value(claim_types::SCOPE), Some("openid profile"));
		assert_eq!(token.claim_values("role").count(), 2);
	}

	#[test]
	fn factory_is_shareable_across_threads() {
		fn assert_send_sync<T: Send + Sync>() {}

		assert_send_sync::<TokenFactory>();
	}

	#[test]
	fn principal_without_subject_fails() {
		let principal = Principal::from_claims(vec![Claim::new("amr", "password")]);
		let err = factory(Arc::new(FixedProvider::default()))
			.create_access_token(&settings(), &request(), &principal)
			.expect_err("A principal without subject cannot be issued a token.");

		assert!(matches!(err, Error::Principal(_)));
	}
}
