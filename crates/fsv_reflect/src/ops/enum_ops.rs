use crate::Reflect;
use crate::info::VariantKind;

/// Access to the current variant of an enum and its fields.
///
/// Variant indices follow [`EnumInfo`](crate::info::EnumInfo), that is
/// declaration order.
///
/// # Examples
///
/// ```
/// use fsv_reflect::derive::Reflect;
/// use fsv_reflect::ops::Enum;
///
/// #[derive(Reflect, Default, Debug, PartialEq)]
/// enum Shape {
///     #[default]
///     Empty,
///     Circle(f32),
/// }
///
/// let mut shape = Shape::Empty;
/// assert!(shape.set_variant_default(1));
/// *shape.field_at_mut(0).unwrap().downcast_mut::<f32>().unwrap() = 2.0;
/// assert_eq!(shape, Shape::Circle(2.0));
/// assert!(!shape.set_variant_default(9));
/// ```
pub trait Enum: Reflect {
    fn variant_index(&self) -> usize;

    fn variant_name(&self) -> &str;

    fn variant_kind(&self) -> VariantKind;

    /// Number of fields of the current variant.
    fn field_len(&self) -> usize;

    fn field_at(&self, index: usize) -> Option<&dyn Reflect>;

    fn field_at_mut(&mut self, index: usize) -> Option<&mut dyn Reflect>;

    /// Switches to the variant at `index` with default field values.
    ///
    /// Returns `false`, leaving `self` untouched, if there is no such variant.
    fn set_variant_default(&mut self, index: usize) -> bool;
}
