use core::any::TypeId;
use core::fmt;
use std::time::{Duration, SystemTime};

use fsv_utils::TypeIdMap;
use fsv_utils::hash::HashMap;

use crate::info::{TypeHandle, TypeInfo, Typed};
use crate::registry::{FromType, GetTypeMeta, TypeMeta, TypeTrait};

// -----------------------------------------------------------------------------
// TypeRegistry

/// A closed registry of reflected types.
///
/// Types are registered explicitly, there is no global discovery. The
/// registry maps the persistent type path written into a stream back to the
/// runtime type, so every type that can appear behind a polymorphic
/// reference must be registered before decoding.
///
/// # Example
///
/// ```
/// use fsv_reflect::info::DynamicTypePath;
/// use fsv_reflect::registry::{TypeRegistry, TypeTraitDefault};
///
/// let registry = TypeRegistry::new();
///
/// let generator = registry
///     .get_with_type_path("alloc::string::String").unwrap()
///     .get_trait::<TypeTraitDefault>().unwrap();
///
/// let s = generator.default();
/// assert_eq!(s.reflect_type_path(), "alloc::string::String");
/// ```
pub struct TypeRegistry {
    type_meta_table: TypeIdMap<TypeMeta>,
    type_path_to_id: HashMap<&'static str, TypeId>,
}

impl Default for TypeRegistry {
    /// See [`TypeRegistry::new`].
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl TypeRegistry {
    /// Creates an empty registry.
    #[inline]
    pub const fn empty() -> Self {
        Self {
            type_meta_table: TypeIdMap::new(),
            type_path_to_id: HashMap::with_hasher(fsv_utils::hash::FixedHashState),
        }
    }

    /// Creates a registry holding the leaf types.
    ///
    /// - `()` `bool` `char`
    /// - `i8 - i64`, `u8 - u64`, `f32` `f64`
    /// - `String` `Duration` `SystemTime` `TypeHandle`
    pub fn new() -> Self {
        let mut registry = Self::empty();
        registry.register::<()>();
        registry.register::<bool>();
        registry.register::<char>();
        registry.register::<u8>();
        registry.register::<u16>();
        registry.register::<u32>();
        registry.register::<u64>();
        registry.register::<i8>();
        registry.register::<i16>();
        registry.register::<i32>();
        registry.register::<i64>();
        registry.register::<f32>();
        registry.register::<f64>();
        registry.register::<String>();
        registry.register::<Duration>();
        registry.register::<SystemTime>();
        registry.register::<TypeHandle>();
        registry
    }

    // The type must not be in the table yet.
    fn add_new_type_path(
        type_meta: &TypeMeta,
        type_path_to_id: &mut HashMap<&'static str, TypeId>,
    ) {
        let ty = type_meta.ty();

        // Paths are the persistent identity, the first owner keeps it.
        match type_path_to_id.get(ty.path()) {
            Some(owner) if *owner != ty.id() => {
                log::warn!(
                    "type path `{}` is already registered by another type, \
                     it keeps resolving to the first one",
                    ty.path()
                );
            }
            _ => {
                type_path_to_id.insert(ty.path(), ty.id());
            }
        }
    }

    fn register_internal(
        &mut self,
        type_id: TypeId,
        get_type_meta: impl FnOnce() -> TypeMeta,
    ) -> bool {
        self.type_meta_table.try_insert(type_id, || {
            let meta = get_type_meta();
            Self::add_new_type_path(&meta, &mut self.type_path_to_id);
            meta
        })
    }

    /// Inserts `type_meta` unless its type is already registered.
    ///
    /// Returns `true` on insertion. Dependencies are not registered.
    #[inline]
    pub fn try_insert_type_meta(&mut self, type_meta: TypeMeta) -> bool {
        self.register_internal(type_meta.ty_id(), || type_meta)
    }

    /// Inserts or overwrites the meta of a type.
    ///
    /// Dependencies are not registered.
    pub fn insert_type_meta(&mut self, type_meta: TypeMeta) {
        if !self.type_meta_table.contains(&type_meta.ty_id()) {
            Self::add_new_type_path(&type_meta, &mut self.type_path_to_id);
        }
        self.type_meta_table.insert(type_meta.ty_id(), type_meta);
    }

    /// Registers `T` and, recursively, its dependencies.
    ///
    /// Registering a type twice does nothing.
    ///
    /// # Example
    ///
    /// ```
    /// # use core::any::TypeId;
    /// # use fsv_reflect::{derive::Reflect, registry::{TypeRegistry, TypeTraitDefault}};
    /// #[derive(Reflect, Default)]
    /// #[reflect(default)]
    /// struct Foo {
    ///     name: Option<String>,
    ///     value: i32,
    /// }
    ///
    /// let mut registry = TypeRegistry::empty();
    /// registry.register::<Foo>();
    ///
    /// assert!(registry.contains(TypeId::of::<Foo>()));
    /// assert!(registry.contains(TypeId::of::<Option<String>>()));
    /// assert!(registry.contains(TypeId::of::<i32>()));
    /// assert!(registry.get_type_trait::<TypeTraitDefault>(TypeId::of::<Foo>()).is_some());
    /// ```
    pub fn register<T: GetTypeMeta>(&mut self) {
        if self.register_internal(TypeId::of::<T>(), T::get_type_meta) {
            T::register_dependencies(self);
        }
    }

    /// Adds the type trait `D` to the registered type `T`.
    ///
    /// Returns `false` if `T` is not registered.
    pub fn register_type_trait<T: Typed, D: TypeTrait + FromType<T>>(&mut self) -> bool {
        match self.type_meta_table.get_mut(&TypeId::of::<T>()) {
            Some(type_meta) => {
                type_meta.insert_trait(D::from_type());
                true
            }
            None => false,
        }
    }

    #[inline]
    pub fn contains(&self, type_id: TypeId) -> bool {
        self.type_meta_table.contains(&type_id)
    }

    #[inline]
    pub fn get(&self, type_id: TypeId) -> Option<&TypeMeta> {
        self.type_meta_table.get(&type_id)
    }

    #[inline]
    pub fn get_mut(&mut self, type_id: TypeId) -> Option<&mut TypeMeta> {
        self.type_meta_table.get_mut(&type_id)
    }

    /// Looks a type up by its [type path](crate::info::TypePath::type_path).
    pub fn get_with_type_path(&self, type_path: &str) -> Option<&TypeMeta> {
        match self.type_path_to_id.get(type_path) {
            Some(id) => self.get(*id),
            None => None,
        }
    }

    pub fn get_type_trait<T: TypeTrait>(&self, type_id: TypeId) -> Option<&T> {
        match self.get(type_id) {
            Some(type_meta) => type_meta.get_trait::<T>(),
            None => None,
        }
    }

    pub fn get_type_info(&self, type_id: TypeId) -> Option<&'static TypeInfo> {
        self.get(type_id).map(TypeMeta::type_info)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.type_meta_table.len()
    }

    pub fn iter(&self) -> impl ExactSizeIterator<Item = &TypeMeta> {
        self.type_meta_table.values()
    }
}

impl fmt::Debug for TypeRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.type_path_to_id.keys()).finish()
    }
}

#[cfg(test)]
mod tests {
    use core::any::TypeId;

    use super::TypeRegistry;
    use crate::registry::TypeTraitDefault;

    #[test]
    fn new_registers_leaves() {
        let registry = TypeRegistry::new();
        assert!(registry.contains(TypeId::of::<u8>()));
        assert!(registry.contains(TypeId::of::<String>()));
        assert!(registry.get_with_type_path("std::time::SystemTime").is_some());
        assert!(
            registry
                .get_type_trait::<TypeTraitDefault>(TypeId::of::<f64>())
                .is_some()
        );
    }

    #[test]
    fn register_pulls_dependencies() {
        let mut registry = TypeRegistry::empty();
        registry.register::<Vec<Option<u16>>>();
        assert!(registry.contains(TypeId::of::<Option<u16>>()));
        assert!(registry.contains(TypeId::of::<u16>()));
        assert_eq!(registry.len(), 3);

        registry.register::<Vec<Option<u16>>>();
        assert_eq!(registry.len(), 3);
    }

    #[test]
    fn register_type_trait_requires_registration() {
        let mut registry = TypeRegistry::empty();
        assert!(!registry.register_type_trait::<u8, TypeTraitDefault>());
        registry.register::<u8>();
        assert!(registry.register_type_trait::<u8, TypeTraitDefault>());
    }
}
