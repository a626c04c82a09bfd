use core::fmt;

use crate::info::NamedField;

// -----------------------------------------------------------------------------
// VariantKind

/// The shape of an enum variant.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum VariantKind {
    /// `A { x: i32 }`
    Struct,
    /// `A(i32)`, fields are named `"0"`, `"1"`, ...
    Tuple,
    /// `A`
    Unit,
}

impl fmt::Display for VariantKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Struct => f.pad("Struct"),
            Self::Tuple => f.pad("Tuple"),
            Self::Unit => f.pad("Unit"),
        }
    }
}

// -----------------------------------------------------------------------------
// VariantInfo

/// Static information of one enum variant.
#[derive(Clone, Debug)]
pub struct VariantInfo {
    name: &'static str,
    kind: VariantKind,
    discriminant: Option<i64>,
    // Variants rarely have many fields, a boxed slice keeps the info small.
    fields: Box<[NamedField]>,
}

impl VariantInfo {
    pub fn new(name: &'static str, kind: VariantKind, fields: &[NamedField]) -> Self {
        Self {
            name,
            kind,
            discriminant: None,
            fields: fields.into(),
        }
    }

    /// Sets the discriminant of a variant of a C-like enum.
    #[inline]
    pub fn with_discriminant(mut self, discriminant: i64) -> Self {
        self.discriminant = Some(discriminant);
        self
    }

    #[inline]
    pub fn unit(name: &'static str) -> Self {
        Self::new(name, VariantKind::Unit, &[])
    }

    #[inline]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    #[inline]
    pub const fn kind(&self) -> VariantKind {
        self.kind
    }

    /// The explicit or implicit discriminant, known for C-like enums only.
    #[inline]
    pub const fn discriminant(&self) -> Option<i64> {
        self.discriminant
    }

    #[inline]
    pub fn field_at(&self, index: usize) -> Option<&NamedField> {
        self.fields.get(index)
    }

    #[inline]
    pub fn iter(&self) -> impl ExactSizeIterator<Item = &NamedField> {
        self.fields.iter()
    }

    #[inline]
    pub fn field_len(&self) -> usize {
        self.fields.len()
    }
}
