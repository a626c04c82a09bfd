use core::fmt;

use crate::info::{Type, TypePath};

/// A reflected value that names a type, or nothing.
///
/// This is the Rust counterpart of storing a `Type` object in a field.
/// It serializes as a type tag and resolves back through the type registry.
///
/// # Examples
///
/// ```
/// use fsv_reflect::info::TypeHandle;
///
/// let handle = TypeHandle::of::<String>();
/// assert_eq!(handle.ty().unwrap().path(), "alloc::string::String");
/// assert!(TypeHandle::default().is_none());
/// ```
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct TypeHandle(Option<Type>);

impl TypeHandle {
    #[inline]
    pub const fn of<T: TypePath + ?Sized>() -> Self {
        Self(Some(Type::of::<T>()))
    }

    #[inline]
    pub const fn none() -> Self {
        Self(None)
    }

    #[inline]
    pub const fn from_type(ty: Type) -> Self {
        Self(Some(ty))
    }

    #[inline]
    pub const fn ty(&self) -> Option<&Type> {
        self.0.as_ref()
    }

    #[inline]
    pub const fn is_none(&self) -> bool {
        self.0.is_none()
    }
}

impl fmt::Debug for TypeHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.0 {
            Some(ty) => write!(f, "TypeHandle({})", ty.path()),
            None => f.write_str("TypeHandle(None)"),
        }
    }
}
