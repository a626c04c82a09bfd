use core::hash::Hash;
use std::collections::BTreeMap;

use fsv_utils::hash::FixedHashState;

use crate::impls::{self, GenericTypeInfoCell, GenericTypePathCell};
use crate::info::{MapInfo, TypeInfo, TypePath, Typed};
use crate::ops::{Map, MapIter};
use crate::registry::{FromType, GetTypeMeta, TypeMeta, TypeRegistry, TypeTraitDefault};
use crate::Reflect;

type StdHashMap<K, V> = std::collections::HashMap<K, V>;
type FixedHashMap<K, V> = fsv_utils::hash::HashMap<K, V, FixedHashState>;

macro_rules! impl_map {
    ($ty:ident, $module:literal, $ident:literal, $($key_bound:tt)+) => {
        impl<K: TypePath, V: TypePath> TypePath for $ty<K, V> {
            fn type_path() -> &'static str {
                static CELL: GenericTypePathCell = GenericTypePathCell::new();
                CELL.get_or_insert::<Self>(|| {
                    impls::concat(&[
                        $module,
                        "::",
                        $ident,
                        "<",
                        K::type_path(),
                        ", ",
                        V::type_path(),
                        ">",
                    ])
                })
            }

            fn type_name() -> &'static str {
                static CELL: GenericTypePathCell = GenericTypePathCell::new();
                CELL.get_or_insert::<Self>(|| {
                    impls::concat(&[$ident, "<", K::type_name(), ", ", V::type_name(), ">"])
                })
            }

            #[inline]
            fn type_ident() -> &'static str {
                $ident
            }

            #[inline]
            fn module_path() -> Option<&'static str> {
                Some($module)
            }
        }

        impl<K, V> Typed for $ty<K, V>
        where
            K: Reflect + Typed + Default + $($key_bound)+,
            V: Reflect + Typed + Default,
        {
            fn type_info() -> &'static TypeInfo {
                static CELL: GenericTypeInfoCell = GenericTypeInfoCell::new();
                CELL.get_or_insert::<Self>(|| TypeInfo::Map(MapInfo::new::<Self, K, V>()))
            }
        }

        impl<K, V> Reflect for $ty<K, V>
        where
            K: Reflect + Typed + Default + $($key_bound)+,
            V: Reflect + Typed + Default,
        {
            crate::reflection::impl_reflect_cast_fn!(Map);
        }

        impl<K, V> Map for $ty<K, V>
        where
            K: Reflect + Typed + Default + $($key_bound)+,
            V: Reflect + Typed + Default,
        {
            #[inline]
            fn len(&self) -> usize {
                <$ty<K, V>>::len(self)
            }

            fn get(&self, key: &dyn Reflect) -> Option<&dyn Reflect> {
                let key = key.downcast_ref::<K>()?;
                <$ty<K, V>>::get(self, key).map(Reflect::as_reflect)
            }

            fn iter(&self) -> MapIter<'_> {
                Box::new(
                    <$ty<K, V>>::iter(self)
                        .map(|(key, value)| (key.as_reflect(), value.as_reflect())),
                )
            }

            #[inline]
            fn clear(&mut self) {
                <$ty<K, V>>::clear(self);
            }

            #[inline]
            fn new_key(&self) -> Box<dyn Reflect> {
                Box::new(K::default())
            }

            #[inline]
            fn new_value(&self) -> Box<dyn Reflect> {
                Box::new(V::default())
            }

            fn insert_boxed(
                &mut self,
                key: Box<dyn Reflect>,
                value: Box<dyn Reflect>,
            ) -> Result<(), (Box<dyn Reflect>, Box<dyn Reflect>)> {
                if !key.is::<K>() || !value.is::<V>() {
                    return Err((key, value));
                }
                match (key.take::<K>(), value.take::<V>()) {
                    (Ok(key), Ok(value)) => {
                        <$ty<K, V>>::insert(self, key, value);
                        Ok(())
                    }
                    (key, value) => Err((
                        key.map_or_else(|k| k, Reflect::into_boxed_reflect),
                        value.map_or_else(|v| v, Reflect::into_boxed_reflect),
                    )),
                }
            }
        }

        impl<K, V> GetTypeMeta for $ty<K, V>
        where
            K: Reflect + Typed + Default + GetTypeMeta + $($key_bound)+,
            V: Reflect + Typed + Default + GetTypeMeta,
        {
            fn get_type_meta() -> TypeMeta {
                let mut meta = TypeMeta::of::<Self>();
                meta.insert_trait::<TypeTraitDefault>(FromType::<Self>::from_type());
                meta
            }

            fn register_dependencies(registry: &mut TypeRegistry) {
                registry.register::<K>();
                registry.register::<V>();
            }
        }
    };
}

impl_map!(StdHashMap, "std::collections", "HashMap", Eq + Hash);
impl_map!(BTreeMap, "alloc::collections", "BTreeMap", Ord);
impl_map!(FixedHashMap, "fsv_utils::hash", "HashMap", Eq + Hash);

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use crate::Reflect;
    use crate::info::TypePath;
    use crate::ops::{Map, ReflectMut};

    #[test]
    fn map_paths() {
        assert_eq!(
            BTreeMap::<String, i32>::type_path(),
            "alloc::collections::BTreeMap<alloc::string::String, i32>"
        );
        assert_eq!(
            fsv_utils::hash::HashMap::<u8, u8>::type_path(),
            "fsv_utils::hash::HashMap<u8, u8>"
        );
        assert_eq!(
            std::collections::HashMap::<u8, u8>::type_name(),
            "HashMap<u8, u8>"
        );
    }

    #[test]
    fn insert_boxed_checks_types() {
        let mut map: BTreeMap<String, i32> = BTreeMap::new();
        let value: &mut dyn Reflect = &mut map;
        let ReflectMut::Map(map_mut) = value.reflect_mut() else {
            panic!("not a map");
        };

        assert!(
            map_mut
                .insert_boxed(Box::new(String::from("a")), Box::new(1_i32))
                .is_ok()
        );
        let (key, value) = map_mut
            .insert_boxed(Box::new(1_u8), Box::new(2_i32))
            .unwrap_err();
        assert!(key.is::<u8>());
        assert!(value.is::<i32>());

        let probe = String::from("a");
        assert_eq!(map_mut.get(&probe).unwrap().downcast_ref::<i32>(), Some(&1));
        assert_eq!(map_mut.len(), 1);
        assert_eq!(map.get("a"), Some(&1));
    }
}
