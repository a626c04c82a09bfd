use crate::Reflect;
use crate::info::Typed;
use crate::ops::ErasedShared;
use crate::registry::FromType;

/// Constructs default instances of a registered type.
///
/// Decoders need it to create the runtime type named by a type tag, which
/// is unknown at compile time.
///
/// `#[derive(Reflect)]` adds it to the type meta when the type carries
/// `#[reflect(default)]`.
#[derive(Clone)]
pub struct TypeTraitDefault {
    boxed: fn() -> Box<dyn Reflect>,
    shared: fn() -> ErasedShared,
}

impl TypeTraitDefault {
    /// A new boxed default value.
    #[inline(always)]
    pub fn default(&self) -> Box<dyn Reflect> {
        (self.boxed)()
    }

    /// A new default value behind a fresh shared handle.
    #[inline(always)]
    pub fn default_shared(&self) -> ErasedShared {
        (self.shared)()
    }
}

impl<T: Default + Typed + Reflect> FromType<T> for TypeTraitDefault {
    fn from_type() -> Self {
        Self {
            boxed: || Box::<T>::default(),
            shared: || ErasedShared::new(T::default()),
        }
    }
}
