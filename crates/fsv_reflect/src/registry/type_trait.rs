use core::any::Any;
use core::fmt;

/// Type-specific data stored in a [`TypeMeta`](crate::registry::TypeMeta).
///
/// A type trait is usually a small table of function pointers created with
/// [`FromType`](crate::registry::FromType), such as
/// [`TypeTraitDefault`](crate::registry::TypeTraitDefault).
pub trait TypeTrait: Any + Send + Sync {
    fn clone_type_trait(&self) -> Box<dyn TypeTrait>;
}

impl<T: Clone + Any + Send + Sync> TypeTrait for T {
    #[inline]
    fn clone_type_trait(&self) -> Box<dyn TypeTrait> {
        Box::new(self.clone())
    }
}

impl dyn TypeTrait {
    #[inline]
    pub fn downcast_ref<T: TypeTrait>(&self) -> Option<&T> {
        <dyn Any>::downcast_ref(self)
    }

    #[inline]
    pub fn downcast_mut<T: TypeTrait>(&mut self) -> Option<&mut T> {
        <dyn Any>::downcast_mut(self)
    }
}

impl fmt::Debug for dyn TypeTrait {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("TypeTrait")
    }
}
