use core::any::TypeId;

use crate::info::{Type, TypeInfo, TypePath, Typed, impl_type_fn};
use crate::ops::Optional;

/// Static information of a nullable value, `Option<T>`.
#[derive(Clone, Debug)]
pub struct OptionInfo {
    ty: Type,
    inner_id: TypeId,
    inner_info: fn() -> &'static TypeInfo,
}

impl OptionInfo {
    impl_type_fn!(ty);

    #[inline]
    pub const fn new<TOption: Optional + TypePath, TInner: Typed>() -> Self {
        Self {
            ty: Type::of::<TOption>(),
            inner_id: TypeId::of::<TInner>(),
            inner_info: TInner::type_info,
        }
    }

    #[inline]
    pub const fn inner_id(&self) -> TypeId {
        self.inner_id
    }

    /// Info of the `T` in `Option<T>`.
    #[inline]
    pub fn inner_info(&self) -> &'static TypeInfo {
        (self.inner_info)()
    }
}
