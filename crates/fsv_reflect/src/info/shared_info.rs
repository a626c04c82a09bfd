use core::any::TypeId;

use crate::info::{Type, TypeInfo, TypePath, impl_type_fn};

/// Static information of a shared reference handle, `Shared<T>`.
///
/// The pointee is either a concrete reflected type, or the polymorphic
/// `dyn Reflect`, in which case the runtime type of the value can be any
/// reflected type.
#[derive(Clone, Debug)]
pub struct SharedInfo {
    ty: Type,
    pointee: Type,
    pointee_info: Option<fn() -> &'static TypeInfo>,
}

impl SharedInfo {
    impl_type_fn!(ty);

    /// `pointee_info` is `None` for a polymorphic pointee.
    #[inline]
    pub const fn new<TShared: TypePath, TPointee: TypePath + ?Sized>(
        pointee_info: Option<fn() -> &'static TypeInfo>,
    ) -> Self {
        Self {
            ty: Type::of::<TShared>(),
            pointee: Type::of::<TPointee>(),
            pointee_info,
        }
    }

    /// The declared pointee type.
    #[inline]
    pub const fn pointee(&self) -> &Type {
        &self.pointee
    }

    #[inline]
    pub const fn pointee_id(&self) -> TypeId {
        self.pointee.id()
    }

    /// Info of a concrete pointee, `None` when polymorphic.
    #[inline]
    pub fn pointee_info(&self) -> Option<&'static TypeInfo> {
        self.pointee_info.map(|info| info())
    }

    #[inline]
    pub const fn is_polymorphic(&self) -> bool {
        self.pointee_info.is_none()
    }
}
