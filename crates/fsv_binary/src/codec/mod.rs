//! Byte-level codecs.
//!
//! Everything is little-endian and purely sequential, a reader never needs
//! to seek.
//!
//! - [`write_primitive`] / [`read_primitive`]: the fixed primitive set.
//! - [`write_type_tag`] / [`read_type_tag`]: type tags of polymorphic values.
//! - framing helpers for strategies: bools, `i32` lengths, strings.

// -----------------------------------------------------------------------------
// Modules

mod primitive;
mod type_tag;

// -----------------------------------------------------------------------------
// Exports

pub use primitive::{is_primitive, read_primitive, write_primitive};
pub use primitive::{read_bool, read_i32, read_len, read_string};
pub use primitive::{write_bool, write_i32, write_len, write_str};
pub use type_tag::{read_type_tag, write_type_tag};
