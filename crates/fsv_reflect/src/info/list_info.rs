use core::any::{Any, TypeId};

use crate::info::{Type, TypeInfo, TypePath, Typed, impl_type_fn};
use crate::ops::List;

/// Static information of a growable sequence, such as `Vec<T>`.
#[derive(Clone, Debug)]
pub struct ListInfo {
    ty: Type,
    item_id: TypeId,
    // `TypeInfo` is created on first access; using a function pointer delays it.
    item_info: fn() -> &'static TypeInfo,
}

impl ListInfo {
    impl_type_fn!(ty);

    #[inline]
    pub const fn new<TList: List + TypePath, TItem: Typed>() -> Self {
        Self {
            ty: Type::of::<TList>(),
            item_id: TypeId::of::<TItem>(),
            item_info: TItem::type_info,
        }
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
