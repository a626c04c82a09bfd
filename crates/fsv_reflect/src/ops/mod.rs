//! Kind-specific access to reflected values.
//!
//! ## Menu
//!
//! Each trait below is a subtrait of [`Reflect`] giving access to the data
//! of one [`ReflectKind`](crate::info::ReflectKind):
//!
//! - [`Struct`]: named fields (tuple structs use `"0"`, `"1"`, ...).
//! - [`List`]: growable sequences, e.g. `Vec<T>`.
//! - [`Array`]: fixed-size arrays, `[T; N]`.
//! - [`Map`]: key-value containers, e.g. `HashMap<K, V>`.
//! - [`Enum`]: the current variant of an enum.
//! - [`Optional`]: `Option<T>`.
//! - [`SharedRef`]: a [`Shared<T>`] reference handle.
//!
//! [`ReflectRef`] / [`ReflectMut`] wrap these views and are returned by
//! [`Reflect::reflect_ref`] / [`Reflect::reflect_mut`].
//!
//! [`Shared`] and [`ErasedShared`] implement reference semantics with
//! identity for reflected graphs.
//!
//! [`Reflect`]: crate::Reflect
//! [`Reflect::reflect_ref`]: crate::Reflect::reflect_ref
//! [`Reflect::reflect_mut`]: crate::Reflect::reflect_mut

// -----------------------------------------------------------------------------
// Modules

mod array_ops;
mod enum_ops;
mod kind;
mod list_ops;
mod map_ops;
mod option_ops;
mod shared_ops;
mod struct_ops;

// -----------------------------------------------------------------------------
// Exports

pub use array_ops::{Array, ArrayItemIter};
pub use enum_ops::Enum;
pub use kind::{ReflectMut, ReflectRef};
pub use list_ops::{List, ListItemIter};
pub use map_ops::{Map, MapIter};
pub use option_ops::Optional;
pub use shared_ops::{ErasedShared, Shared, SharedPointee, SharedRef};
pub use struct_ops::Struct;
