use crate::info::{Type, TypePath, VariantInfo, VariantKind, impl_type_fn};
use crate::ops::Enum;

/// Static information of an enum: its variants in declaration order.
///
/// The index of a variant here is the one reported by
/// [`Enum::variant_index`].
#[derive(Clone, Debug)]
pub struct EnumInfo {
    ty: Type,
    variants: Box<[VariantInfo]>,
}

impl EnumInfo {
    impl_type_fn!(ty);

    pub fn new<TEnum: Enum + TypePath>(variants: &[VariantInfo]) -> Self {
        Self {
            ty: Type::of::<TEnum>(),
            variants: variants.into(),
        }
    }

    pub fn variant(&self, name: &str) -> Option<&VariantInfo> {
        self.variants.iter().find(|v| v.name() == name)
    }

    #[inline]
    pub fn variant_at(&self, index: usize) -> Option<&VariantInfo> {
        self.variants.get(index)
    }

    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.variants.iter().position(|v| v.name() == name)
    }

    #[inline]
    pub fn iter(&self) -> impl ExactSizeIterator<Item = &VariantInfo> {
        self.variants.iter()
    }

    #[inline]
    pub fn variant_len(&self) -> usize {
        self.variants.len()
    }

    /// The integer identifying the variant at `index` in a stream.
    ///
    /// That is the discriminant where the variant has one, the index
    /// otherwise.
    pub fn discriminant_at(&self, index: usize) -> Option<i64> {
        let variant = self.variants.get(index)?;
        Some(variant.discriminant().unwrap_or(index as i64))
    }

    /// Inverse of [`discriminant_at`](Self::discriminant_at).
    pub fn index_of_discriminant(&self, discriminant: i64) -> Option<usize> {
        self.variants
            .iter()
            .enumerate()
            .position(|(index, v)| v.discriminant().unwrap_or(index as i64) == discriminant)
    }

    /// Returns `true` if every variant is a unit variant (a C-like enum).
    pub fn is_fieldless(&self) -> bool {
        self.variants.iter().all(|v| v.kind() == VariantKind::Unit)
    }
}
