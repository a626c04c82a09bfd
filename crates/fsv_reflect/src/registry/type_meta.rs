use core::any::TypeId;
use core::fmt;

use fsv_utils::TypeIdMap;

use crate::info::{Type, TypeInfo, Typed};
use crate::registry::{TypeRegistry, TypeTrait};

// -----------------------------------------------------------------------------
// TypeMeta

/// Runtime metadata of one registered type: its [`TypeInfo`] and a table of
/// [`TypeTrait`]s.
///
/// Usually generated by [`#[derive(Reflect)]`](crate::derive::Reflect)
/// through [`GetTypeMeta`].
///
/// # Example
///
/// ```
/// use fsv_reflect::registry::{FromType, TypeMeta, TypeTraitDefault};
///
/// let mut meta = TypeMeta::of::<String>();
/// meta.insert_trait::<TypeTraitDefault>(FromType::<String>::from_type());
///
/// let f = meta.get_trait::<TypeTraitDefault>().unwrap();
/// assert_eq!(f.default().take::<String>().unwrap(), "");
/// ```
pub struct TypeMeta {
    // Cached, reading it from `TypeInfo` matches on the kind.
    ty: &'static Type,
    type_info: &'static TypeInfo,
    trait_table: TypeIdMap<Box<dyn TypeTrait>>,
}

impl TypeMeta {
    /// Creates a `TypeMeta` of `T` without type traits.
    #[inline]
    pub fn of<T: Typed>() -> Self {
        let type_info = T::type_info();
        Self {
            ty: type_info.ty(),
            type_info,
            trait_table: TypeIdMap::new(),
        }
    }

    #[inline(always)]
    pub const fn type_info(&self) -> &'static TypeInfo {
        self.type_info
    }

    #[inline(always)]
    pub const fn ty(&self) -> &'static Type {
        self.ty
    }

    crate::info::impl_type_fn!();

    /// Inserts a type trait, replacing any previous one of the same type.
    #[inline]
    pub fn insert_trait<T: TypeTrait>(&mut self, data: T) {
        self.trait_table.insert(TypeId::of::<T>(), Box::new(data));
    }

    #[inline]
    pub fn get_trait<T: TypeTrait>(&self) -> Option<&T> {
        self.trait_table
            .get(&TypeId::of::<T>())
            .and_then(|t| t.downcast_ref::<T>())
    }

    #[inline]
    pub fn get_trait_mut<T: TypeTrait>(&mut self) -> Option<&mut T> {
        self.trait_table
            .get_mut(&TypeId::of::<T>())
            .and_then(|t| t.downcast_mut::<T>())
    }

    #[inline]
    pub fn has_trait<T: TypeTrait>(&self) -> bool {
        self.trait_table.contains(&TypeId::of::<T>())
    }

    #[inline]
    pub fn remove_trait<T: TypeTrait>(&mut self) -> bool {
        self.trait_table.remove(&TypeId::of::<T>()).is_some()
    }

    #[inline]
    pub fn trait_len(&self) -> usize {
        self.trait_table.len()
    }
}

impl Clone for TypeMeta {
    fn clone(&self) -> Self {
        let mut trait_table = TypeIdMap::new();
        for (id, data) in self.trait_table.iter() {
            trait_table.insert(*id, (**data).clone_type_trait());
        }
        Self {
            ty: self.ty,
            type_info: self.type_info,
            trait_table,
        }
    }
}

impl fmt::Debug for TypeMeta {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeMeta")
            .field("type_path", &self.type_path())
            .field("kind", &self.type_info.kind())
            .field("trait_len", &self.trait_table.len())
            .finish()
    }
}

// -----------------------------------------------------------------------------
// GetTypeMeta

/// Provides the [`TypeMeta`] of a type and registers the types it depends
/// on.
///
/// Implemented by `#[derive(Reflect)]` and for the std types in
/// [`impls`](crate::impls).
pub trait GetTypeMeta: Typed {
    fn get_type_meta() -> TypeMeta;

    /// Registers the field, item or pointee types. Does nothing by default.
    #[inline(always)]
    fn register_dependencies(_registry: &mut TypeRegistry) {}
}

#[cfg(test)]
mod tests {
    use super::TypeMeta;
    use crate::registry::{FromType, TypeTraitDefault};

    #[test]
    fn clone_keeps_type_traits() {
        let mut meta = TypeMeta::of::<String>();
        meta.insert_trait::<TypeTraitDefault>(FromType::<String>::from_type());

        let copy = meta.clone();
        assert_eq!(copy.type_path(), meta.type_path());
        assert_eq!(copy.trait_len(), 1);
        let f = copy.get_trait::<TypeTraitDefault>().unwrap();
        assert_eq!(f.default().take::<String>().unwrap(), "");
    }
}
