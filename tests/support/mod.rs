//! Shared fixtures for issuance integration tests.

#![allow(dead_code)]

// std
use std::sync::{
	Arc,
	atomic::{AtomicBool, AtomicUsize, Ordering},
};
// crates.io
use time::macros;
// self
use oidc_token_issuer::{
	auth::{Claim, ClientId, Principal, ScopeList, SubjectId},
	ext::{
		AccessClaimsContext, ClaimsProvider, ClaimsProviderError, IdentityClaimsContext,
		MemoryProfileStore,
	},
	factory::TokenFactory,
	request::{Client, ValidatedAuthorizeRequest},
	settings::IssuerSettings,
};

pub const ISSUER: &str = "https://idp.example.com";
pub const CLIENT_ID: &str = "web-app";
pub const SUBJECT: &str = "818727";

/// Maps scopes onto profile claim types the way a typical deployment does.
#[derive(Default)]
pub struct ScopeClaimsProvider {
	pub include_all_claims: AtomicBool,
	pub identity_calls: AtomicUsize,
	pub extra_identity_claims: Vec<Claim>,
	pub extra_access_claims: Vec<Claim>,
}
impl ScopeClaimsProvider {
	fn claim_types_for(scopes: &ScopeList) -> Vec<&'static str> {
		scopes.iter().flat_map(scope_claim_types).copied().collect()
	}
}
impl ClaimsProvider for ScopeClaimsProvider {
	fn identity_token_claims(
		&self,
		ctx: &IdentityClaimsContext<'_>,
	) -> Result<Vec<Claim>, ClaimsProviderError> {
		self.include_all_claims.store(ctx.include_all_claims, Ordering::SeqCst);
		self.identity_calls.fetch_add(1, Ordering::SeqCst);

		let mut claims = self.extra_identity_claims.clone();

		if ctx.include_all_claims {
			let subject = ctx.principal.subject().map_err(ClaimsProviderError::new)?;
			let types = Self::claim_types_for(ctx.scopes);

			if !types.is_empty() {
				claims.extend(ctx.profile.profile_claims(subject, &types)?);
			}
		}

		Ok(claims)
	}

	fn access_token_claims(
		&self,
		ctx: &AccessClaimsContext<'_>,
	) -> Result<Vec<Claim>, ClaimsProviderError> {
		let subject = ctx.principal.subject().map_err(ClaimsProviderError::new)?;
		let types = Self::claim_types_for(ctx.scopes);
		let mut claims = self.extra_access_claims.clone();

		if !types.is_empty() {
			claims.extend(ctx.profile.profile_claims(subject, &types)?);
		}

		Ok(claims)
	}
}

fn scope_claim_types(scope: &str) -> &'static [&'static str] {
	match scope {
		"profile" => &["name", "family_name"],
		"email" => &["email"],
		"roles" => &["role"],
		_ => &[],
	}
}

pub fn settings() -> IssuerSettings {
	IssuerSettings::new(ISSUER).expect("Issuer fixture should be valid.")
}

pub fn principal() -> Principal {
	Principal::new(
		SubjectId::new(SUBJECT).expect("Subject fixture should be valid."),
		"password",
		macros::datetime!(2025-01-01 00:00 UTC),
	)
}

pub fn client(identity_lifetime: u32) -> Client {
	Client::builder(ClientId::new(CLIENT_ID).expect("Client id fixture should be valid."))
		.identity_token_lifetime(identity_lifetime)
		.access_token_lifetime(3_600)
		.build()
		.expect("Client fixture should build.")
}

pub fn authorize_request(scopes: &str) -> ValidatedAuthorizeRequest {
	let scopes = scopes.parse::<ScopeList>().expect("Scope fixture should be valid.");

	ValidatedAuthorizeRequest::new(client(300), scopes)
}

pub fn profile_store() -> Arc<MemoryProfileStore> {
	let store = MemoryProfileStore::default();

	store.insert(
		SUBJECT,
		vec![
			Claim::new("name", "Alice Example"),
			Claim::new("family_name", "Example"),
			Claim::new("email", "a@b.com"),
			Claim::new("role", "admin"),
			Claim::new("role", "auditor"),
		],
	);

	Arc::new(store)
}

pub fn factory(provider: Arc<ScopeClaimsProvider>) -> TokenFactory {
	TokenFactory::new(provider, profile_store())
}
