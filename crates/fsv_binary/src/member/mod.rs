//! Member discovery for the reflective struct strategy.
//!
//! A [`MemberPolicy`] selects the serializable fields of a struct type,
//! the [`MemberCache`] remembers the selection per type as a list of
//! [`SerializableMember`]s.

// -----------------------------------------------------------------------------
// Modules

mod cache;
mod policy;

// -----------------------------------------------------------------------------
// Exports

pub use cache::{MemberCache, SerializableMember};
pub use policy::{AllFields, DefaultMemberPolicy, MemberPolicy};
