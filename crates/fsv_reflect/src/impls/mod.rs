//! Reflection implementations of std types, and helpers to write new ones.
//!
//! - [`concat`]: string concatenation for generic type paths.
//! - [`NonGenericTypeInfoCell`], [`GenericTypeInfoCell`],
//!   [`GenericTypePathCell`]: static storage for `Typed` / `TypePath`.
//!
//! ## Implemented Menu
//!
//! - primitives: `bool`, `char`, `i8`-`i64`, `u8`-`u64`, `f32`, `f64`, `()`
//! - `String`, `Duration`, `SystemTime`, [`TypeHandle`](crate::info::TypeHandle)
//! - lists: `Vec<T>`, `VecDeque<T>`
//! - arrays: `[T; N]`
//! - maps: `std::collections::HashMap<K, V, S>`, `BTreeMap<K, V>`,
//!   `fsv_utils::hash::HashMap<K, V>`
//! - `Option<T>`
//! - `Shared<T>`, `Shared<dyn Reflect>`

// -----------------------------------------------------------------------------
// Modules

mod array;
mod cell;
mod list;
mod map;
mod option;
mod primitive;
mod shared;

// -----------------------------------------------------------------------------
// Exports

pub use cell::{GenericTypeInfoCell, GenericTypePathCell, NonGenericTypeInfoCell};

/// Concatenates string slices with a single allocation.
///
/// Used to build the paths of generic types.
///
/// # Example
///
/// ```
/// use fsv_reflect::impls;
///
/// let s = impls::concat(&["module", "::", "name", "<", "T", ">"]);
/// assert_eq!(s, "module::name<T>");
/// assert_eq!(s.capacity(), 15);
/// ```
#[inline(never)]
pub fn concat(arr: &[&str]) -> String {
    let len = arr.iter().map(|item| item.len()).sum();
    let mut res = String::with_capacity(len);
    for &item in arr {
        res.push_str(item);
    }
    res
}
