use crate::info::{TypeInfo, TypePath};

// -----------------------------------------------------------------------------
// Typed

/// Static access to the [`TypeInfo`] of a type.
///
/// Implemented by `#[derive(Reflect)]`. Manual implementations cache the
/// info in a [`NonGenericTypeInfoCell`] or, for generic types, a
/// [`GenericTypeInfoCell`].
///
/// ```
/// use fsv_reflect::info::{OpaqueInfo, TypeInfo, TypePath, Typed};
/// use fsv_reflect::impls::NonGenericTypeInfoCell;
///
/// struct Handle(u32);
///
/// impl TypePath for Handle {
///     fn type_path() -> &'static str { "host::Handle" }
///     fn type_name() -> &'static str { "Handle" }
///     fn type_ident() -> &'static str { "Handle" }
/// }
///
/// impl Typed for Handle {
///     fn type_info() -> &'static TypeInfo {
///         static CELL: NonGenericTypeInfoCell = NonGenericTypeInfoCell::new();
///         CELL.get_or_init(|| TypeInfo::Opaque(OpaqueInfo::new::<Self>()))
///     }
/// }
///
/// assert!(Handle::type_info().is::<Handle>());
/// ```
///
/// [`NonGenericTypeInfoCell`]: crate::impls::NonGenericTypeInfoCell
/// [`GenericTypeInfoCell`]: crate::impls::GenericTypeInfoCell
pub trait Typed: TypePath {
    /// Returns the compile-time info of the type.
    fn type_info() -> &'static TypeInfo;
}

// -----------------------------------------------------------------------------
// DynamicTyped

/// Dynamic dispatch for [`Typed`].
pub trait DynamicTyped {
    /// See [`Typed::type_info`].
    fn reflect_type_info(&self) -> &'static TypeInfo;
}

impl<T: Typed> DynamicTyped for T {
    #[inline]
    fn reflect_type_info(&self) -> &'static TypeInfo {
        Self::type_info()
    }
}
