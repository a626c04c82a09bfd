use crate::info::{Type, TypePath, impl_type_fn};

/// Static information of a type without reflected inner structure.
///
/// Primitives, `String` and host handles are opaque. A serializer needs a
/// dedicated strategy for each opaque type it accepts.
#[derive(Clone, Debug)]
pub struct OpaqueInfo {
    ty: Type,
}

impl OpaqueInfo {
    impl_type_fn!(ty);

    #[inline]
    pub const fn new<T: TypePath + ?Sized>() -> Self {
        Self { ty: Type::of::<T>() }
    }
}
