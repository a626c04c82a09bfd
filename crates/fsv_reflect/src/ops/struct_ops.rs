use crate::Reflect;

/// Access to the fields of a struct.
///
/// Indices follow [`StructInfo`](crate::info::StructInfo): declaration
/// order of the reflected fields.
///
/// # Examples
///
/// ```
/// use fsv_reflect::derive::Reflect;
/// use fsv_reflect::ops::Struct;
///
/// #[derive(Reflect, Default)]
/// struct Foo {
///     pub value: u32,
/// }
///
/// let mut foo = Foo { value: 1 };
/// *foo.field_mut("value").unwrap().downcast_mut::<u32>().unwrap() = 7;
/// assert_eq!(foo.value, 7);
/// assert_eq!(foo.name_at(0), Some("value"));
/// ```
pub trait Struct: Reflect {
    /// Returns the field named `name`.
    fn field(&self, name: &str) -> Option<&dyn Reflect>;

    /// Returns the field named `name` mutably.
    fn field_mut(&mut self, name: &str) -> Option<&mut dyn Reflect>;

    fn field_at(&self, index: usize) -> Option<&dyn Reflect>;

    fn field_at_mut(&mut self, index: usize) -> Option<&mut dyn Reflect>;

    /// Returns the name of the field at `index`.
    fn name_at(&self, index: usize) -> Option<&str>;

    /// Number of reflected fields.
    fn field_len(&self) -> usize;
}
