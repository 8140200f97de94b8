//! Public extension contracts (claims enrichment, profile lookup).
//!
//! The issuer never decides which profile claims a scope unlocks; the host plugs that
//! policy in through [`ClaimsProvider`] and hands its user store over as a
//! [`ProfileAccessor`].

pub mod claims_provider;
pub mod profile;

pub use claims_provider::*;
pub use profile::*;
