use std::time::{Duration, SystemTime};

use crate::Reflect;
use crate::impls::NonGenericTypeInfoCell;
use crate::info::{OpaqueInfo, TypeHandle, TypeInfo, TypePath, Typed};
use crate::registry::{FromType, GetTypeMeta, TypeMeta, TypeTraitDefault};

// Opaque leaves: `TypePath`, `Typed`, `Reflect` and `GetTypeMeta`.
macro_rules! impl_opaque {
    (@path $ty:ty, $path:expr, $name:expr, $module:expr) => {
        impl TypePath for $ty {
            #[inline]
            fn type_path() -> &'static str {
                $path
            }

            #[inline]
            fn type_name() -> &'static str {
                $name
            }

            #[inline]
            fn type_ident() -> &'static str {
                $name
            }

            #[inline]
            fn module_path() -> Option<&'static str> {
                $module
            }
        }

        impl Typed for $ty {
            fn type_info() -> &'static TypeInfo {
                static CELL: NonGenericTypeInfoCell = NonGenericTypeInfoCell::new();
                CELL.get_or_init(|| TypeInfo::Opaque(OpaqueInfo::new::<Self>()))
            }
        }

        impl Reflect for $ty {
            crate::reflection::impl_reflect_cast_fn!(Opaque);
        }
    };
    (no_default $ty:ty, $path:expr, $name:expr, $module:expr) => {
        impl_opaque!(@path $ty, $path, $name, $module);

        impl GetTypeMeta for $ty {
            #[inline]
            fn get_type_meta() -> TypeMeta {
                TypeMeta::of::<Self>()
            }
        }
    };
    (named $ty:ty, $path:expr, $name:expr, $module:expr) => {
        impl_opaque!(@path $ty, $path, $name, $module);

        impl GetTypeMeta for $ty {
            fn get_type_meta() -> TypeMeta {
                let mut meta = TypeMeta::of::<Self>();
                meta.insert_trait::<TypeTraitDefault>(FromType::<Self>::from_type());
                meta
            }
        }
    };
    ($($ty:ident),* $(,)?) => {
        $( impl_opaque!(named $ty, stringify!($ty), stringify!($ty), None); )*
    };
}

impl_opaque!(bool, char, u8, u16, u32, u64, i8, i16, i32, i64, f32, f64);
impl_opaque!(named (), "()", "()", None);
impl_opaque!(named String, "alloc::string::String", "String", Some("alloc::string"));
impl_opaque!(named Duration, "core::time::Duration", "Duration", Some("core::time"));
// No `Default`: it can be a field, but never a list item or a shared pointee.
impl_opaque!(no_default SystemTime, "std::time::SystemTime", "SystemTime", Some("std::time"));
impl_opaque!(
    named TypeHandle,
    "fsv_reflect::info::TypeHandle",
    "TypeHandle",
    Some("fsv_reflect::info")
);

#[cfg(test)]
mod tests {
    use std::time::SystemTime;

    use crate::Reflect;
    use crate::info::{ReflectKind, TypePath, Typed};
    use crate::registry::{FromType, TypeTraitDefault};

    #[test]
    fn leaf_paths() {
        assert_eq!(<i32 as TypePath>::type_path(), "i32");
        assert_eq!(<() as TypePath>::type_path(), "()");
        assert_eq!(<String as TypePath>::type_name(), "String");
        assert_eq!(<SystemTime as TypePath>::module_path(), Some("std::time"));
        assert_eq!(<f64 as Typed>::type_info().kind(), ReflectKind::Opaque);
    }

    #[test]
    fn system_time_has_no_default_trait() {
        use crate::registry::GetTypeMeta;

        assert!(!SystemTime::get_type_meta().has_trait::<TypeTraitDefault>());
        let default = <TypeTraitDefault as FromType<i64>>::from_type();
        let value: Box<dyn Reflect> = default.default();
        assert_eq!(value.take::<i64>().unwrap(), 0);
    }
}
