use std::collections::VecDeque;

use crate::impls::{self, GenericTypeInfoCell, GenericTypePathCell};
use crate::info::{ListInfo, TypeInfo, TypePath, Typed};
use crate::ops::List;
use crate::registry::{FromType, GetTypeMeta, TypeMeta, TypeRegistry, TypeTraitDefault};
use crate::Reflect;

macro_rules! impl_list {
    ($ty:ident, $module:literal, $push:ident, $get:expr, $get_mut:expr) => {
        impl<T: TypePath> TypePath for $ty<T> {
            fn type_path() -> &'static str {
                static CELL: GenericTypePathCell = GenericTypePathCell::new();
                CELL.get_or_insert::<Self>(|| {
                    impls::concat(&[$module, "::", stringify!($ty), "<", T::type_path(), ">"])
                })
            }

            fn type_name() -> &'static str {
                static CELL: GenericTypePathCell = GenericTypePathCell::new();
                CELL.get_or_insert::<Self>(|| {
                    impls::concat(&[stringify!($ty), "<", T::type_name(), ">"])
                })
            }

            #[inline]
            fn type_ident() -> &'static str {
                stringify!($ty)
            }

            #[inline]
            fn module_path() -> Option<&'static str> {
                Some($module)
            }
        }

        impl<T: Reflect + Typed + Default> Typed for $ty<T> {
            fn type_info() -> &'static TypeInfo {
                static CELL: GenericTypeInfoCell = GenericTypeInfoCell::new();
                CELL.get_or_insert::<Self>(|| TypeInfo::List(ListInfo::new::<Self, T>()))
            }
        }

        impl<T: Reflect + Typed + Default> Reflect for $ty<T> {
            crate::reflection::impl_reflect_cast_fn!(List);
        }

        impl<T: Reflect + Typed + Default> List for $ty<T> {
            #[inline]
            fn get(&self, index: usize) -> Option<&dyn Reflect> {
                ($get)(self, index).map(Reflect::as_reflect)
            }

            #[inline]
            fn get_mut(&mut self, index: usize) -> Option<&mut dyn Reflect> {
                ($get_mut)(self, index).map(Reflect::as_reflect_mut)
            }

            #[inline]
            fn len(&self) -> usize {
                <$ty<T>>::len(self)
            }

            #[inline]
            fn clear(&mut self) {
                <$ty<T>>::clear(self);
            }

            fn push_default(&mut self) -> &mut dyn Reflect {
                self.$push(T::default());
                let last = <$ty<T>>::len(self) - 1;
                &mut self[last]
            }

            #[inline]
            fn as_list(&self) -> &dyn List {
                self
            }
        }

        impl<T: Reflect + Typed + Default + GetTypeMeta> GetTypeMeta for $ty<T> {
            fn get_type_meta() -> TypeMeta {
                let mut meta = TypeMeta::of::<Self>();
                meta.insert_trait::<TypeTraitDefault>(FromType::<Self>::from_type());
                meta
            }

            fn register_dependencies(registry: &mut TypeRegistry) {
                registry.register::<T>();
            }
        }
    };
}

// Path calls, method syntax would pick the `List` methods.
impl_list!(Vec, "alloc::vec", push, <[T]>::get, <[T]>::get_mut);
impl_list!(
    VecDeque,
    "alloc::collections",
    push_back,
    VecDeque::<T>::get,
    VecDeque::<T>::get_mut
);

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;

    use crate::Reflect;
    use crate::info::{TypePath, Typed};
    use crate::ops::{List, ReflectMut};

    #[test]
    fn list_paths() {
        assert_eq!(Vec::<u8>::type_path(), "alloc::vec::Vec<u8>");
        assert_eq!(VecDeque::<String>::type_name(), "VecDeque<String>");
        let info = Vec::<i32>::type_info().as_list().unwrap();
        assert!(info.item_is::<i32>());
    }

    #[test]
    fn push_default_through_reflection() {
        let mut list: Vec<String> = vec!["a".into()];
        let value: &mut dyn Reflect = &mut list;
        let ReflectMut::List(list_mut) = value.reflect_mut() else {
            panic!("not a list");
        };
        list_mut
            .push_default()
            .downcast_mut::<String>()
            .unwrap()
            .push('b');
        assert_eq!(list_mut.len(), 2);
        assert_eq!(list, ["a", "b"]);

        let mut deque: VecDeque<u8> = VecDeque::new();
        List::push_default(&mut deque);
        List::clear(&mut deque);
        assert!(deque.is_empty());
    }
}
