//! Auth-domain identifiers, scope lists, claims, and the authenticated principal.

pub mod claim;
pub mod id;
pub mod principal;
pub mod scope;

pub use claim::*;
pub use id::*;
pub use principal::*;
pub use scope::*;
