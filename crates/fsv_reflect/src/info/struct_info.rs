use fsv_utils::hash::HashMap;

use crate::info::{NamedField, Type, TypePath, impl_type_fn};
use crate::ops::Struct;

/// Static information of a struct with named fields.
///
/// Tuple structs are described the same way, their fields are named
/// `"0"`, `"1"`, ... Fields keep declaration order, and the index of a
/// field here is the index used by [`Struct::field_at`].
///
/// # Examples
///
/// ```
/// use fsv_reflect::derive::Reflect;
/// use fsv_reflect::info::Typed;
///
/// #[derive(Reflect, Default)]
/// struct Point {
///     pub x: f32,
///     y: f32,
/// }
///
/// let info = Point::type_info().as_struct().unwrap();
/// assert_eq!(info.field_names(), &["x", "y"]);
/// assert!(info.field("x").unwrap().is_public());
/// assert!(!info.field_at(1).unwrap().is_public());
/// ```
#[derive(Clone, Debug)]
pub struct StructInfo {
    ty: Type,
    fields: Box<[NamedField]>,
    field_names: Box<[&'static str]>,
    field_indices: HashMap<&'static str, usize>,
}

impl StructInfo {
    impl_type_fn!(ty);

    pub fn new<T: Struct + TypePath>(fields: &[NamedField]) -> Self {
        let field_names = fields.iter().map(NamedField::name).collect();
        let field_indices = fields
            .iter()
            .enumerate()
            .map(|(index, field)| (field.name(), index))
            .collect();

        Self {
            ty: Type::of::<T>(),
            fields: fields.into(),
            field_names,
            field_indices,
        }
    }

    pub fn field(&self, name: &str) -> Option<&NamedField> {
        self.fields.get(*self.field_indices.get(name)?)
    }

    #[inline]
    pub fn field_at(&self, index: usize) -> Option<&NamedField> {
        self.fields.get(index)
    }

    /// Iterates over the fields in declaration order.
    #[inline]
    pub fn iter(&self) -> impl ExactSizeIterator<Item = &NamedField> {
        self.fields.iter()
    }

    #[inline]
    pub fn field_names(&self) -> &[&'static str] {
        &self.field_names
    }

    #[inline]
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.field_indices.get(name).copied()
    }

    #[inline]
    pub fn field_len(&self) -> usize {
        self.fields.len()
    }
}
