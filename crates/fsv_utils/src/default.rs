/// Shorthand for [`Default::default()`], handy in struct update syntax.
///
/// # Example
///
/// ```
/// use fsv_utils::default;
///
/// #[derive(Default)]
/// struct Settings {
///     depth: usize,
///     strict: bool,
/// }
///
/// let settings = Settings {
///     depth: 64,
///     ..default()
/// };
/// assert!(!settings.strict);
/// ```
#[inline(always)]
pub fn default<T: Default>() -> T {
    T::default()
}
