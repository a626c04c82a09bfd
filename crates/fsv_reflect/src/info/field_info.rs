use core::any::{Any, TypeId};

use crate::info::{TypeInfo, Typed};

// -----------------------------------------------------------------------------
// FieldVisibility

/// Visibility of a field as written in the type definition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FieldVisibility {
    /// `pub`
    Public,
    /// Private or `pub(..)` restricted.
    #[default]
    Restricted,
}

// -----------------------------------------------------------------------------
// NamedField

/// A reflected field of a struct or of a struct-like enum variant.
///
/// Besides the declared type the field carries two markers written as
/// attributes on the definition: `#[reflect(include)]` opts a non-public
/// field into serialization, `#[reflect(exclude)]` opts any field out.
/// What the markers mean is up to the member policy of a serializer.
#[derive(Clone, Debug)]
pub struct NamedField {
    ty_id: TypeId,
    name: &'static str,
    // `TypeInfo` is created on first access; using a function pointer delays it.
    type_info: fn() -> &'static TypeInfo,
    visibility: FieldVisibility,
    include: bool,
    exclude: bool,
}

impl NamedField {
    /// Creates a restricted, unmarked field.
    #[inline]
    pub const fn new<T: Typed>(name: &'static str) -> Self {
        Self {
            ty_id: TypeId::of::<T>(),
            name,
            type_info: T::type_info,
            visibility: FieldVisibility::Restricted,
            include: false,
            exclude: false,
        }
    }

    #[inline]
    pub const fn with_visibility(mut self, visibility: FieldVisibility) -> Self {
        self.visibility = visibility;
        self
    }

    /// Sets the `include` marker.
    #[inline]
    pub const fn with_include(mut self, include: bool) -> Self {
        self.include = include;
        self
    }

    /// Sets the `exclude` marker.
    #[inline]
    pub const fn with_exclude(mut self, exclude: bool) -> Self {
        self.exclude = exclude;
        self
    }

    #[inline]
    pub const fn ty_id(&self) -> TypeId {
        self.ty_id
    }

    #[inline]
    pub fn type_is<T: Any>(&self) -> bool {
        self.ty_id == TypeId::of::<T>()
    }

    #[inline]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Info of the declared field type.
    #[inline]
    pub fn type_info(&self) -> &'static TypeInfo {
        (self.type_info)()
    }

    #[inline]
    pub const fn visibility(&self) -> FieldVisibility {
        self.visibility
    }

    #[inline]
    pub const fn is_public(&self) -> bool {
        matches!(self.visibility, FieldVisibility::Public)
    }

    #[inline]
    pub const fn is_included(&self) -> bool {
        self.include
    }

    #[inline]
    pub const fn is_excluded(&self) -> bool {
        self.exclude
    }
}
