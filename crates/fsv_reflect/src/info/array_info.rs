use core::any::{Any, TypeId};

use crate::info::{Type, TypeInfo, TypePath, Typed, impl_type_fn};
use crate::ops::Array;

/// Static information of a fixed-size array `[T; N]`.
#[derive(Clone, Debug)]
pub struct ArrayInfo {
    ty: Type,
    item_id: TypeId,
    // `TypeInfo` is created on first access; using a function pointer delays it.
    item_info: fn() -> &'static TypeInfo,
    capacity: usize,
}

impl ArrayInfo {
    impl_type_fn!(ty);

    #[inline]
    pub const fn new<TArray: Array + TypePath, TItem: Typed>(capacity: usize) -> Self {
        Self {
            ty: Type::of::<TArray>(),
            item_id: TypeId::of::<TItem>(),
            item_info: TItem::type_info,
            capacity,
        }
    }

    /// The `N` of `[T; N]`.
    #[inline]
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    #[inline]
    pub const fn item_id(&self) -> TypeId {
        self.item_id
    }

    #[inline]
    pub fn item_is<T: Any>(&self) -> bool {
        self.item_id == TypeId::of::<T>()
    }

    #[inline]
    pub fn item_info(&self) -> &'static TypeInfo {
        (self.item_info)()
    }
}
