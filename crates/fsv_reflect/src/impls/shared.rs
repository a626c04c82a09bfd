use crate::impls::{self, GenericTypeInfoCell, GenericTypePathCell};
use crate::info::{SharedInfo, TypeInfo, TypePath, Typed};
use crate::ops::{Shared, SharedPointee};
use crate::registry::{FromType, GetTypeMeta, TypeMeta, TypeRegistry, TypeTraitDefault};
use crate::Reflect;

impl<T: TypePath + ?Sized> TypePath for Shared<T> {
    fn type_path() -> &'static str {
        static CELL: GenericTypePathCell = GenericTypePathCell::new();
        CELL.get_or_insert::<Self>(|| {
            impls::concat(&["fsv_reflect::ops::Shared<", T::type_path(), ">"])
        })
    }

    fn type_name() -> &'static str {
        static CELL: GenericTypePathCell = GenericTypePathCell::new();
        CELL.get_or_insert::<Self>(|| impls::concat(&["Shared<", T::type_name(), ">"]))
    }

    #[inline]
    fn type_ident() -> &'static str {
        "Shared"
    }

    #[inline]
    fn module_path() -> Option<&'static str> {
        Some("fsv_reflect::ops")
    }
}

impl<T: SharedPointee + ?Sized> Typed for Shared<T> {
    fn type_info() -> &'static TypeInfo {
        static CELL: GenericTypeInfoCell = GenericTypeInfoCell::new();
        CELL.get_or_insert::<Self>(|| {
            TypeInfo::Shared(SharedInfo::new::<Self, T>(T::pointee_info()))
        })
    }
}

impl<T: SharedPointee + ?Sized> Reflect for Shared<T> {
    crate::reflection::impl_reflect_cast_fn!(Shared);
}

impl<T: SharedPointee + GetTypeMeta + Default> GetTypeMeta for Shared<T> {
    fn get_type_meta() -> TypeMeta {
        let mut meta = TypeMeta::of::<Self>();
        meta.insert_trait::<TypeTraitDefault>(FromType::<Self>::from_type());
        meta
    }

    fn register_dependencies(registry: &mut TypeRegistry) {
        registry.register::<T>();
    }
}

/// Pointee types are registered one by one, the handle cannot name them.
impl GetTypeMeta for Shared<dyn Reflect> {
    fn get_type_meta() -> TypeMeta {
        let mut meta = TypeMeta::of::<Self>();
        meta.insert_trait::<TypeTraitDefault>(FromType::<Self>::from_type());
        meta
    }
}

#[cfg(test)]
mod tests {
    use crate::Reflect;
    use crate::info::{TypePath, Typed};
    use crate::ops::{ReflectRef, Shared};

    #[test]
    fn shared_info() {
        assert_eq!(
            Shared::<u8>::type_path(),
            "fsv_reflect::ops::Shared<u8>"
        );
        assert_eq!(
            Shared::<dyn Reflect>::type_name(),
            "Shared<dyn Reflect>"
        );

        let info = Shared::<u8>::type_info().as_shared().unwrap();
        assert!(!info.is_polymorphic());
        assert!(info.pointee_info().unwrap().is::<u8>());
        let info = Shared::<dyn Reflect>::type_info().as_shared().unwrap();
        assert!(info.is_polymorphic());
    }

    #[test]
    fn shared_ref_sees_runtime_value() {
        let handle = Shared::new(String::from("x")).into_dyn();
        let value: &dyn Reflect = &handle;
        let ReflectRef::Shared(shared) = value.reflect_ref() else {
            panic!("not shared");
        };
        assert_eq!(shared.addr(), handle.addr());
        let inner = shared.try_borrow_value().unwrap();
        assert_eq!(inner.reflect_type_path(), "alloc::string::String");
    }
}
