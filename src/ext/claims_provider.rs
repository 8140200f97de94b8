//! Claims enrichment contract consumed by the token factory.

// self
use crate::{
	_prelude::*,
	auth::{Claim, Principal, ScopeList},
	error::BoxError,
	ext::ProfileAccessor,
	request::Client,
	settings::IssuerSettings,
};

/// Failure reported by a [`ClaimsProvider`] or [`ProfileAccessor`].
///
/// The wrapper is transparent: `Display` and [`source`](StdError::source) forward to the
/// original error, which can be recovered with [`downcast_ref`](Self::downcast_ref).
pub struct ClaimsProviderError(BoxError);
impl ClaimsProviderError {
	/// Wraps any provider-side error.
	pub fn new(src: impl 'static + Send + Sync + StdError) -> Self {
		Self(Box::new(src))
	}

	/// Borrows the original error as a concrete type, if it is one.
	pub fn downcast_ref<E>(&self) -> Option<&E>
	where
		E: 'static + StdError,
	{
		self.0.downcast_ref()
	}

	/// Returns the original boxed error.
	pub fn into_inner(self) -> BoxError {
		self.0
	}
}
impl From<BoxError> for ClaimsProviderError {
	fn from(e: BoxError) -> Self {
		Self(e)
	}
}
impl Debug for ClaimsProviderError {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		Debug::fmt(&self.0, f)
	}
}
impl Display for ClaimsProviderError {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		Display::fmt(&self.0, f)
	}
}
impl StdError for ClaimsProviderError {
	fn source(&self) -> Option<&(dyn StdError + 'static)> {
		self.0.source()
	}
}

/// Inputs handed to [`ClaimsProvider::identity_token_claims`].
#[derive(Clone, Copy)]
pub struct IdentityClaimsContext<'a> {
	/// Authenticated end-user.
	pub principal: &'a Principal,
	/// Client the token is issued to.
	pub client: &'a Client,
	/// Requested scopes, in request order.
	pub scopes: &'a ScopeList,
	/// Provider settings.
	pub settings: &'a IssuerSettings,
	/// `true` when no access token accompanies the identity token, so the identity token
	/// must also carry the claims normally deferred to the access token.
	pub include_all_claims: bool,
	/// User store for profile lookups.
	pub profile: &'a dyn ProfileAccessor,
}
impl Debug for IdentityClaimsContext<'_> {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("IdentityClaimsContext")
			.field("principal", self.principal)
			.field("client", self.client)
			.field("scopes", self.scopes)
			.field("settings", self.settings)
			.field("include_all_claims", &self.include_all_claims)
			.finish_non_exhaustive()
	}
}

/// Inputs handed to [`ClaimsProvider::access_token_claims`].
#[derive(Clone, Copy)]
pub struct AccessClaimsContext<'a> {
	/// Authenticated end-user.
	pub principal: &'a Principal,
	/// Client the token is issued to.
	pub client: &'a Client,
	/// Requested scopes, in request order.
	pub scopes: &'a ScopeList,
	/// Provider settings.
	pub settings: &'a IssuerSettings,
	/// User store for profile lookups.
	pub profile: &'a dyn ProfileAccessor,
}
impl Debug for AccessClaimsContext<'_> {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("AccessClaimsContext")
			.field("principal", self.principal)
			.field("client", self.client)
			.field("scopes", self.scopes)
			.field("settings", self.settings)
			.finish_non_exhaustive()
	}
}

/// Scope-to-claim policy plugged into the token factory.
///
/// Implementations own every decision about which additional claims a token carries;
/// the factory appends their output after the mandatory protocol claims. Calls are
/// synchronous and may happen concurrently.
pub trait ClaimsProvider
where
	Self: Send + Sync,
{
	/// Additional claims for an identity token.
	fn identity_token_claims(
		&self,
		ctx: &IdentityClaimsContext<'_>,
	) -> Result<Vec<Claim>, ClaimsProviderError>;

	/// Additional claims for an access token.
	fn access_token_claims(
		&self,
		ctx: &AccessClaimsContext<'_>,
	) -> Result<Vec<Claim>, ClaimsProviderError>;
}
