use crate::info::Typed;

/// Creates a type trait for the concrete type `T`.
///
/// ```
/// use fsv_reflect::registry::{FromType, TypeTraitDefault};
///
/// let default = <TypeTraitDefault as FromType<u32>>::from_type();
/// assert_eq!(default.default().take::<u32>().unwrap(), 0);
/// ```
pub trait FromType<T: Typed> {
    fn from_type() -> Self;
}
