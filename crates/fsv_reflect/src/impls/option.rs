use crate::impls::{self, GenericTypeInfoCell, GenericTypePathCell};
use crate::info::{OptionInfo, TypeInfo, TypePath, Typed};
use crate::ops::Optional;
use crate::registry::{FromType, GetTypeMeta, TypeMeta, TypeRegistry, TypeTraitDefault};
use crate::Reflect;

impl<T: TypePath> TypePath for Option<T> {
    fn type_path() -> &'static str {
        static CELL: GenericTypePathCell = GenericTypePathCell::new();
        CELL.get_or_insert::<Self>(|| {
            impls::concat(&["core::option::Option<", T::type_path(), ">"])
        })
    }

    fn type_name() -> &'static str {
        static CELL: GenericTypePathCell = GenericTypePathCell::new();
        CELL.get_or_insert::<Self>(|| impls::concat(&["Option<", T::type_name(), ">"]))
    }

    #[inline]
    fn type_ident() -> &'static str {
        "Option"
    }

    #[inline]
    fn module_path() -> Option<&'static str> {
        Some("core::option")
    }
}

impl<T: Reflect + Typed + Default> Typed for Option<T> {
    fn type_info() -> &'static TypeInfo {
        static CELL: GenericTypeInfoCell = GenericTypeInfoCell::new();
        CELL.get_or_insert::<Self>(|| TypeInfo::Optional(OptionInfo::new::<Self, T>()))
    }
}

impl<T: Reflect + Typed + Default> Reflect for Option<T> {
    crate::reflection::impl_reflect_cast_fn!(Optional);
}

impl<T: Reflect + Typed + Default> Optional for Option<T> {
    #[inline]
    fn value(&self) -> Option<&dyn Reflect> {
        self.as_ref().map(Reflect::as_reflect)
    }

    #[inline]
    fn value_mut(&mut self) -> Option<&mut dyn Reflect> {
        self.as_mut().map(Reflect::as_reflect_mut)
    }

    #[inline]
    fn set_none(&mut self) {
        *self = None;
    }

    #[inline]
    fn insert_default(&mut self) -> &mut dyn Reflect {
        self.insert(T::default())
    }
}

impl<T: Reflect + Typed + Default + GetTypeMeta> GetTypeMeta for Option<T> {
    fn get_type_meta() -> TypeMeta {
        let mut meta = TypeMeta::of::<Self>();
        meta.insert_trait::<TypeTraitDefault>(FromType::<Self>::from_type());
        meta
    }

    fn register_dependencies(registry: &mut TypeRegistry) {
        registry.register::<T>();
    }
}

#[cfg(test)]
mod tests {
    use crate::Reflect;
    use crate::info::{TypePath, Typed};
    use crate::ops::{Optional, ReflectMut};

    #[test]
    fn option_through_reflection() {
        assert_eq!(
            Option::<String>::type_path(),
            "core::option::Option<alloc::string::String>"
        );
        let info = Option::<u8>::type_info().as_optional().unwrap();
        assert_eq!(info.inner_id(), core::any::TypeId::of::<u8>());

        let mut value: Option<i32> = None;
        let reflected: &mut dyn Reflect = &mut value;
        let ReflectMut::Optional(option) = reflected.reflect_mut() else {
            panic!("not an option");
        };
        assert!(option.value().is_none());
        *option.insert_default().downcast_mut::<i32>().unwrap() = 4;
        assert_eq!(option.value().unwrap().downcast_ref::<i32>(), Some(&4));
        option.set_none();
        assert_eq!(value, None);
    }
}
