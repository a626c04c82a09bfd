use crate::impls::{self, GenericTypeInfoCell, GenericTypePathCell};
use crate::info::{ArrayInfo, TypeInfo, TypePath, Typed};
use crate::ops::Array;
use crate::registry::{GetTypeMeta, TypeMeta, TypeRegistry};
use crate::Reflect;

impl<T: TypePath, const N: usize> TypePath for [T; N] {
    fn type_path() -> &'static str {
        static CELL: GenericTypePathCell = GenericTypePathCell::new();
        CELL.get_or_insert::<Self>(|| {
            impls::concat(&["[", T::type_path(), "; ", &N.to_string(), "]"])
        })
    }

    fn type_name() -> &'static str {
        static CELL: GenericTypePathCell = GenericTypePathCell::new();
        CELL.get_or_insert::<Self>(|| {
            impls::concat(&["[", T::type_name(), "; ", &N.to_string(), "]"])
        })
    }

    #[inline]
    fn type_ident() -> &'static str {
        "[T; N]"
    }
}

impl<T: Reflect + Typed, const N: usize> Typed for [T; N] {
    fn type_info() -> &'static TypeInfo {
        static CELL: GenericTypeInfoCell = GenericTypeInfoCell::new();
        CELL.get_or_insert::<Self>(|| TypeInfo::Array(ArrayInfo::new::<Self, T>(N)))
    }
}

impl<T: Reflect + Typed, const N: usize> Reflect for [T; N] {
    crate::reflection::impl_reflect_cast_fn!(Array);
}

impl<T: Reflect + Typed, const N: usize> Array for [T; N] {
    #[inline]
    fn get(&self, index: usize) -> Option<&dyn Reflect> {
        <[T]>::get(self, index).map(Reflect::as_reflect)
    }

    #[inline]
    fn get_mut(&mut self, index: usize) -> Option<&mut dyn Reflect> {
        <[T]>::get_mut(self, index).map(Reflect::as_reflect_mut)
    }

    #[inline]
    fn len(&self) -> usize {
        N
    }

    #[inline]
    fn as_array(&self) -> &dyn Array {
        self
    }
}

// No `TypeTraitDefault`: std only implements `Default` for `N <= 32`.
impl<T: Reflect + Typed + GetTypeMeta, const N: usize> GetTypeMeta for [T; N] {
    #[inline]
    fn get_type_meta() -> TypeMeta {
        TypeMeta::of::<Self>()
    }

    fn register_dependencies(registry: &mut TypeRegistry) {
        registry.register::<T>();
    }
}

#[cfg(test)]
mod tests {
    use crate::info::{TypePath, Typed};
    use crate::ops::{Array, ReflectRef};
    use crate::Reflect;

    #[test]
    fn array_info_and_access() {
        assert_eq!(<[f32; 2]>::type_path(), "[f32; 2]");
        assert_eq!(<[f32; 2]>::type_info().as_array().unwrap().capacity(), 2);

        let value: &dyn Reflect = &[1.0_f32, 2.0];
        let ReflectRef::Array(array) = value.reflect_ref() else {
            panic!("not an array");
        };
        assert_eq!(array.len(), 2);
        assert!(array.get(2).is_none());
        let items: Vec<f32> = array
            .iter()
            .map(|item| *item.downcast_ref::<f32>().unwrap())
            .collect();
        assert_eq!(items, [1.0, 2.0]);
    }
}
