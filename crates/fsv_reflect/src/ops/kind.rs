use crate::Reflect;
use crate::info::ReflectKind;
use crate::ops::{Array, Enum, List, Map, Optional, SharedRef, Struct};

// -----------------------------------------------------------------------------
// ReflectRef

/// An immutable, kind-specific view of a reflected value.
pub enum ReflectRef<'a> {
    Struct(&'a dyn Struct),
    List(&'a dyn List),
    Array(&'a dyn Array),
    Map(&'a dyn Map),
    Enum(&'a dyn Enum),
    Optional(&'a dyn Optional),
    Shared(&'a dyn SharedRef),
    Opaque(&'a dyn Reflect),
}

impl ReflectRef<'_> {
    pub fn kind(&self) -> ReflectKind {
        match self {
            Self::Struct(_) => ReflectKind::Struct,
            Self::List(_) => ReflectKind::List,
            Self::Array(_) => ReflectKind::Array,
            Self::Map(_) => ReflectKind::Map,
            Self::Enum(_) => ReflectKind::Enum,
            Self::Optional(_) => ReflectKind::Optional,
            Self::Shared(_) => ReflectKind::Shared,
            Self::Opaque(_) => ReflectKind::Opaque,
        }
    }
}

// -----------------------------------------------------------------------------
// ReflectMut

/// A mutable, kind-specific view of a reflected value.
pub enum ReflectMut<'a> {
    Struct(&'a mut dyn Struct),
    List(&'a mut dyn List),
    Array(&'a mut dyn Array),
    Map(&'a mut dyn Map),
    Enum(&'a mut dyn Enum),
    Optional(&'a mut dyn Optional),
    Shared(&'a mut dyn SharedRef),
    Opaque(&'a mut dyn Reflect),
}

impl ReflectMut<'_> {
    pub fn kind(&self) -> ReflectKind {
        match self {
            Self::Struct(_) => ReflectKind::Struct,
            Self::List(_) => ReflectKind::List,
            Self::Array(_) => ReflectKind::Array,
            Self::Map(_) => ReflectKind::Map,
            Self::Enum(_) => ReflectKind::Enum,
            Self::Optional(_) => ReflectKind::Optional,
            Self::Shared(_) => ReflectKind::Shared,
            Self::Opaque(_) => ReflectKind::Opaque,
        }
    }
}
