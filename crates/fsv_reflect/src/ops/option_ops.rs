use crate::Reflect;

/// A nullable value, `Option<T>`.
///
/// # Examples
///
/// ```
/// use fsv_reflect::ops::Optional;
///
/// let mut value: Option<u8> = None;
/// let optional: &mut dyn Optional = &mut value;
/// *optional.insert_default().downcast_mut::<u8>().unwrap() = 3;
/// assert_eq!(value, Some(3));
/// ```
pub trait Optional: Reflect {
    /// Returns the inner value, `None` when null.
    fn value(&self) -> Option<&dyn Reflect>;

    fn value_mut(&mut self) -> Option<&mut dyn Reflect>;

    /// Sets the value to null.
    fn set_none(&mut self);

    /// Replaces the value with a default inner value and returns it.
    fn insert_default(&mut self) -> &mut dyn Reflect;
}
