//! Compile-time type information.
//!
//! ## Menu
//!
//! - [`TypePath`]: stable type names; the path is the persistent identity
//!   of a type.
//!     - [`DynamicTypePath`]: dynamic dispatch for `TypePath`.
//!     - [`Type`]: a `TypeId` that knows its path.
//!
//! - [`TypeInfo`]: the static description of a reflected type, one of:
//!     - [`StructInfo`]: named (or tuple) fields, see [`NamedField`].
//!     - [`ListInfo`]: growable sequences, item type.
//!     - [`ArrayInfo`]: `[T; N]`, item type and capacity.
//!     - [`MapInfo`]: key and value types.
//!     - [`EnumInfo`]: variants, see [`VariantInfo`] and [`VariantKind`].
//!     - [`OptionInfo`]: `Option<T>`, inner type.
//!     - [`SharedInfo`]: `Shared<T>`, declared pointee.
//!     - [`OpaqueInfo`]: leaves such as primitives.
//!
//! - [`ReflectKind`]: the kind tag of a `TypeInfo`.
//!
//! - [`Typed`] / [`DynamicTyped`]: access to the `TypeInfo` of a type.
//!
//! - [`TypeHandle`]: a reflected value naming a type.

// -----------------------------------------------------------------------------
// Modules

mod array_info;
mod enum_info;
mod field_info;
mod list_info;
mod map_info;
mod opaque_info;
mod option_info;
mod shared_info;
mod struct_info;
mod type_handle;
mod type_info;
mod type_path;
mod typed;
mod variant_info;

// -----------------------------------------------------------------------------
// Internal API

pub(crate) use type_path::impl_type_fn;

// -----------------------------------------------------------------------------
// Exports

pub use array_info::ArrayInfo;
pub use enum_info::EnumInfo;
pub use field_info::{FieldVisibility, NamedField};
pub use list_info::ListInfo;
pub use map_info::MapInfo;
pub use opaque_info::OpaqueInfo;
pub use option_info::OptionInfo;
pub use shared_info::SharedInfo;
pub use struct_info::StructInfo;
pub use type_handle::TypeHandle;
pub use type_info::{ReflectKind, ReflectKindError, TypeInfo};
pub use type_path::{DynamicTypePath, Type, TypePath};
pub use typed::{DynamicTyped, Typed};
pub use variant_info::{VariantInfo, VariantKind};
