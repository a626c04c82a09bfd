//! The type registry: explicit, closed registration of reflected types.
//!
//! ## Menu
//!
//! - [`TypeRegistry`]: `TypeId` → [`TypeMeta`], with lookups by type path
//!   (the persistent type tag) and by short type name.
//! - [`TypeMeta`]: the type info of one type plus its type traits.
//! - [`GetTypeMeta`]: implemented by every registrable type.
//! - [`TypeTrait`] / [`FromType`]: type-specific data attached to a `TypeMeta`.
//! - [`TypeTraitDefault`]: constructs default instances of a registered type.

// -----------------------------------------------------------------------------
// Modules

mod from_type;
mod traits;
mod type_meta;
mod type_registry;
mod type_trait;

// -----------------------------------------------------------------------------
// Exports

pub use from_type::FromType;
pub use traits::TypeTraitDefault;
pub use type_meta::{GetTypeMeta, TypeMeta};
pub use type_registry::TypeRegistry;
pub use type_trait::TypeTrait;
