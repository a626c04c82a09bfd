use core::{error, fmt};

use crate::info::{ArrayInfo, ListInfo, MapInfo, Type};
use crate::info::{EnumInfo, OpaqueInfo, StructInfo};
use crate::info::{OptionInfo, SharedInfo};

// -----------------------------------------------------------------------------
// ReflectKind

/// The shape of a reflected type, one per [`TypeInfo`] variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReflectKind {
    /// Named fields, see [`Struct`](crate::ops::Struct).
    Struct,
    /// Growable sequence, see [`List`](crate::ops::List).
    List,
    /// Fixed-size sequence, see [`Array`](crate::ops::Array).
    Array,
    /// Key-value pairs, see [`Map`](crate::ops::Map).
    Map,
    /// See [`Enum`](crate::ops::Enum).
    Enum,
    /// A nullable value, see [`Optional`](crate::ops::Optional).
    Optional,
    /// A shared reference with identity, see [`SharedRef`](crate::ops::SharedRef).
    Shared,
    /// A leaf without inner structure, such as `i32` or `String`.
    Opaque,
}

impl fmt::Display for ReflectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Struct => f.pad("Struct"),
            Self::List => f.pad("List"),
            Self::Array => f.pad("Array"),
            Self::Map => f.pad("Map"),
            Self::Enum => f.pad("Enum"),
            Self::Optional => f.pad("Optional"),
            Self::Shared => f.pad("Shared"),
            Self::Opaque => f.pad("Opaque"),
        }
    }
}

/// Returned by the `TypeInfo::as_*` casts on a kind mismatch.
#[derive(Debug)]
pub struct ReflectKindError {
    pub expected: ReflectKind,
    pub received: ReflectKind,
}

impl fmt::Display for ReflectKindError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "reflect kind mismatch: expected {}, received {}",
            self.expected, self.received
        )
    }
}

impl error::Error for ReflectKindError {}

// -----------------------------------------------------------------------------
// TypeInfo

/// Compile-time information of a reflected type.
///
/// Obtained through [`Typed::type_info`](crate::info::Typed::type_info) or
/// [`DynamicTyped::reflect_type_info`](crate::info::DynamicTyped::reflect_type_info),
/// always with a `'static` lifetime.
///
/// # Examples
///
/// ```
/// use fsv_reflect::info::{ReflectKind, Typed};
///
/// let info = <Vec<i32> as Typed>::type_info();
/// assert_eq!(info.kind(), ReflectKind::List);
/// assert!(info.as_list().unwrap().item_info().is::<i32>());
/// ```
#[derive(Debug, Clone)]
pub enum TypeInfo {
    Struct(StructInfo),
    List(ListInfo),
    Array(ArrayInfo),
    Map(MapInfo),
    Enum(EnumInfo),
    Optional(OptionInfo),
    Shared(SharedInfo),
    Opaque(OpaqueInfo),
}

macro_rules! impl_cast_method {
    ($name:ident : $kind:ident => $info:ident) => {
        #[doc = concat!("Casts to [`", stringify!($info), "`] if the kind is `", stringify!($kind), "`.")]
        pub const fn $name(&self) -> Result<&$info, ReflectKindError> {
            match self {
                Self::$kind(info) => Ok(info),
                _ => Err(ReflectKindError {
                    expected: ReflectKind::$kind,
                    received: self.kind(),
                }),
            }
        }
    };
}

impl TypeInfo {
    impl_cast_method!(as_struct: Struct => StructInfo);
    impl_cast_method!(as_list: List => ListInfo);
    impl_cast_method!(as_array: Array => ArrayInfo);
    impl_cast_method!(as_map: Map => MapInfo);
    impl_cast_method!(as_enum: Enum => EnumInfo);
    impl_cast_method!(as_optional: Optional => OptionInfo);
    impl_cast_method!(as_shared: Shared => SharedInfo);
    impl_cast_method!(as_opaque: Opaque => OpaqueInfo);

    /// Returns the underlying `Type`.
    pub const fn ty(&self) -> &Type {
        match self {
            Self::Struct(info) => info.ty(),
            Self::List(info) => info.ty(),
            Self::Array(info) => info.ty(),
            Self::Map(info) => info.ty(),
            Self::Enum(info) => info.ty(),
            Self::Optional(info) => info.ty(),
            Self::Shared(info) => info.ty(),
            Self::Opaque(info) => info.ty(),
        }
    }

    crate::info::impl_type_fn!();

    pub const fn kind(&self) -> ReflectKind {
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
