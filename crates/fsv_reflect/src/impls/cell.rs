//! Static storage for type information.
//!
//! - [`NonGenericTypeInfoCell`]: a `OnceLock<TypeInfo>`, for non-generic types.
//! - [`GenericTypeInfoCell`] / [`GenericTypePathCell`]: for generic types.
//!   A `static` inside a generic function is shared by every instantiation,
//!   so these cells key their content by `TypeId`.

use core::any::{Any, TypeId};
use std::sync::{OnceLock, PoisonError, RwLock};

use fsv_utils::TypeIdMap;

use crate::info::TypeInfo;

mod sealed {
    use super::TypeInfo;

    pub trait TypedProperty: 'static {}

    impl TypedProperty for String {}
    impl TypedProperty for TypeInfo {}
}

use sealed::TypedProperty;

// -----------------------------------------------------------------------------
// NonGenericTypeCell

/// A lazily initialized static value of a non-generic type.
pub struct NonGenericTypeCell<T: TypedProperty>(OnceLock<T>);

/// Stores the [`TypeInfo`] of a non-generic type.
///
/// ```ignore
/// impl Typed for Foo {
///     fn type_info() -> &'static TypeInfo {
///         static CELL: NonGenericTypeInfoCell = NonGenericTypeInfoCell::new();
///         CELL.get_or_init(|| TypeInfo::Opaque(OpaqueInfo::new::<Self>()))
///     }
/// }
/// ```
pub type NonGenericTypeInfoCell = NonGenericTypeCell<TypeInfo>;

impl<T: TypedProperty> NonGenericTypeCell<T> {
    #[inline]
    pub const fn new() -> Self {
        Self(OnceLock::new())
    }

    #[inline]
    pub fn get_or_init(&self, f: impl FnOnce() -> T) -> &T {
        self.0.get_or_init(f)
    }
}

// -----------------------------------------------------------------------------
// GenericTypeCell

/// A static value per instantiation of a generic type.
///
/// Values are leaked once and live for the rest of the program.
pub struct GenericTypeCell<T: TypedProperty>(RwLock<TypeIdMap<&'static T>>);

/// Stores the [`TypeInfo`] of each instantiation of a generic type.
pub type GenericTypeInfoCell = GenericTypeCell<TypeInfo>;

/// Stores the type path (or name) of each instantiation of a generic type.
///
/// ```ignore
/// impl<T: TypePath> TypePath for Wrapper<T> {
///     fn type_path() -> &'static str {
///         static CELL: GenericTypePathCell = GenericTypePathCell::new();
///         CELL.get_or_insert::<Self>(|| concat(&["my::Wrapper<", T::type_path(), ">"]))
///     }
///     // ...
/// }
/// ```
pub type GenericTypePathCell = GenericTypeCell<String>;

impl<T: TypedProperty> GenericTypeCell<T> {
    #[inline]
    pub const fn new() -> Self {
        Self(RwLock::new(TypeIdMap::new()))
    }

    /// Returns the value of `G`, building it with `f` on first access.
    #[inline(always)]
    pub fn get_or_insert<G: Any + ?Sized>(&self, f: impl FnOnce() -> T) -> &T {
        self.get_or_insert_by_type_id(TypeId::of::<G>(), f)
    }

    // Not generic over `G`, keeps the instantiation count down.
    #[inline(never)]
    fn get_or_insert_by_type_id(&self, type_id: TypeId, f: impl FnOnce() -> T) -> &T {
        let cached = self
            .0
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&type_id)
            .copied();

        match cached {
            Some(value) => value,
            // `f` runs without the lock: it may recurse into other cells.
            None => {
                let value = f();
                let leaked: &'static T = *self
                    .0
                    .write()
                    .unwrap_or_else(PoisonError::into_inner)
                    .get_or_insert(type_id, || Box::leak(Box::new(value)));
                leaked
            }
        }
    }
}
