use core::any::{Any, TypeId};
use core::fmt;

use crate::info::{DynamicTypePath, DynamicTyped, ReflectKind, TypePath};
use crate::ops::{ReflectMut, ReflectRef};

// -----------------------------------------------------------------------------
// Reflect

/// The core trait of runtime reflection.
///
/// A `dyn Reflect` exposes its type identity through the supertraits and its
/// structure through [`reflect_ref`](Reflect::reflect_ref) and
/// [`reflect_mut`](Reflect::reflect_mut), which hand out the kind-specific
/// view (struct, list, map, ...).
///
/// The trait is not `Send`: reflected graphs use [`Shared`](crate::ops::Shared)
/// handles, which are single-threaded.
///
/// Implement it with `#[derive(Reflect)]`.
///
/// # Examples
///
/// ```
/// use fsv_reflect::Reflect;
/// use fsv_reflect::ops::ReflectRef;
///
/// let value: Box<dyn Reflect> = Box::new(vec![1_u8, 2, 3]);
/// let ReflectRef::List(list) = value.reflect_ref() else { unreachable!() };
/// assert_eq!(list.len(), 3);
/// assert_eq!(list.get(1).unwrap().downcast_ref::<u8>(), Some(&2));
/// ```
pub trait Reflect: DynamicTypePath + DynamicTyped + Any {
    /// Casts to `&dyn Reflect`.
    #[inline(always)]
    fn as_reflect(&self) -> &dyn Reflect
    where
        Self: Sized,
    {
        self
    }

    /// Casts to `&mut dyn Reflect`.
    #[inline(always)]
    fn as_reflect_mut(&mut self) -> &mut dyn Reflect
    where
        Self: Sized,
    {
        self
    }

    /// Boxes the value as `Box<dyn Reflect>`.
    #[inline(always)]
    fn into_boxed_reflect(self) -> Box<dyn Reflect>
    where
        Self: Sized,
    {
        Box::new(self)
    }

    /// Returns the [`TypeId`] of the underlying type.
    #[inline]
    fn ty_id(&self) -> TypeId {
        TypeId::of::<Self>()
    }

    /// Replaces `self` with `value`.
    ///
    /// Returns `value` back if it has a different type.
    fn set(&mut self, value: Box<dyn Reflect>) -> Result<(), Box<dyn Reflect>>;

    fn reflect_kind(&self) -> ReflectKind;

    fn reflect_ref(&self) -> ReflectRef<'_>;

    fn reflect_mut(&mut self) -> ReflectMut<'_>;
}

impl dyn Reflect {
    #[inline(always)]
    pub fn is<T: Any>(&self) -> bool {
        self.ty_id() == TypeId::of::<T>()
    }

    #[inline]
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        <dyn Any>::downcast_ref(self)
    }

    #[inline]
    pub fn downcast_mut<T: Any>(&mut self) -> Option<&mut T> {
        <dyn Any>::downcast_mut(self)
    }

    pub fn downcast<T: Any>(self: Box<dyn Reflect>) -> Result<Box<T>, Box<dyn Reflect>> {
        if self.is::<T>() {
            let any: Box<dyn Any> = self;
            Ok(any
                .downcast::<T>()
                .unwrap_or_else(|_| unreachable!("type id checked")))
        } else {
            Err(self)
        }
    }

    #[inline]
    pub fn take<T: Any>(self: Box<dyn Reflect>) -> Result<T, Box<dyn Reflect>> {
        self.downcast::<T>().map(|value| *value)
    }
}

impl fmt::Debug for dyn Reflect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.reflect_kind(), self.reflect_type_path())
    }
}

/// The polymorphic pointee of `Shared<dyn Reflect>`.
impl TypePath for dyn Reflect {
    #[inline]
    fn type_path() -> &'static str {
        "fsv_reflect::Reflect"
    }

    #[inline]
    fn type_name() -> &'static str {
        "dyn Reflect"
    }

    #[inline]
    fn type_ident() -> &'static str {
        "Reflect"
    }

    #[inline]
    fn module_path() -> Option<&'static str> {
        Some("fsv_reflect")
    }
}

// -----------------------------------------------------------------------------
// Auxiliary macro

/// Implements `set`, `reflect_kind`, `reflect_ref` and `reflect_mut` for a
/// type whose kind trait is implemented on itself.
macro_rules! impl_reflect_cast_fn {
    ($kind:ident) => {
        fn set(
            &mut self,
            value: ::std::boxed::Box<dyn $crate::Reflect>,
        ) -> ::core::result::Result<(), ::std::boxed::Box<dyn $crate::Reflect>> {
            *self = value.take::<Self>()?;
            Ok(())
        }

        #[inline]
        fn reflect_kind(&self) -> $crate::info::ReflectKind {
            $crate::info::ReflectKind::$kind
        }

        #[inline]
        fn reflect_ref(&self) -> $crate::ops::ReflectRef<'_> {
            $crate::ops::ReflectRef::$kind(self)
        }

        #[inline]
        fn reflect_mut(&mut self) -> $crate::ops::ReflectMut<'_> {
            $crate::ops::ReflectMut::$kind(self)
        }
    };
}

pub(crate) use impl_reflect_cast_fn;

#[cfg(test)]
mod tests {
    use crate::Reflect;

    #[test]
    fn downcast_and_take() {
        let mut value: Box<dyn Reflect> = Box::new(String::from("hi"));
        assert!(value.is::<String>());
        assert!(value.downcast_ref::<i32>().is_none());
        value.downcast_mut::<String>().unwrap().push('!');

        let value = value.take::<i32>().unwrap_err();
        assert_eq!(value.take::<String>().unwrap(), "hi!");
    }

    #[test]
    fn set_checks_type() {
        let mut x = 1_i32;
        assert!(x.set(Box::new(5_i32)).is_ok());
        assert_eq!(x, 5);
        assert!(x.set(Box::new(5_u8)).is_err());
    }
}
