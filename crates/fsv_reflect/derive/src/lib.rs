//! See following macros:
//!
//! - [`Reflect`]
//! - [`TypePath`]
#![cfg_attr(docsrs, feature(doc_cfg))]

use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

static REFLECT_ATTRIBUTE_NAME: &str = "reflect";

// -----------------------------------------------------------------------------
// Modules

mod derive_data;
mod impls;
mod path;
mod utils;

// -----------------------------------------------------------------------------
// Macros

/// # Full Reflection Derivation
///
/// `#[derive(Reflect)]` implements:
///
/// - `TypePath`
/// - `Typed`
/// - `Reflect`
/// - `GetTypeMeta`
/// - `Struct` (for `struct T { ... }`, `struct T(...);` and `struct T;`)
/// - `Enum` (for `enum T { ... }`)
///
/// Tuple struct fields are named `"0"`, `"1"`, ...
///
/// ## Custom Type Path
///
/// The type path is the persistent identity of a type: it is written into
/// streams as the type tag of polymorphic values. By default it follows the
/// module of the type. Pin it to keep saved data readable after a move:
///
/// ```rust, ignore
/// #[derive(Reflect)]
/// #[reflect(type_path = "game::save::Player")]
/// struct Player { /* ... */ }
/// ```
///
/// Generic parameters are appended automatically.
///
/// ## Default
///
/// `#[reflect(default)]` declares that the type implements `Default` and
/// adds `TypeTraitDefault` to its type meta. Decoders need it to create the
/// runtime type of a polymorphic value.
///
/// ```rust, ignore
/// #[derive(Reflect, Default)]
/// #[reflect(default)]
/// struct Node { /* ... */ }
/// ```
///
/// ## Opaque
///
/// `#[reflect(opaque)]` reflects the type as a leaf: no fields, kind
/// `Opaque`. Such values are written only by a strategy registered for the
/// type, typically a host-side encoder.
///
/// ```rust, ignore
/// #[derive(Reflect, Default)]
/// #[reflect(opaque, default)]
/// struct MeshHandle(u64);
/// ```
///
/// ## Field Attributes
///
/// - `#[reflect(include)]`: a non-`pub` field that serializers should still
///   treat as a member.
/// - `#[reflect(exclude)]`: a `pub` field that serializers must skip.
/// - `#[reflect(ignore)]`: hides the field from reflection entirely. It
///   must implement `Default` when it lives in an enum variant.
///
/// `include` and `exclude` only record intent in the field info, the member
/// policy of the serializer decides what to do with it.
///
/// ## Enums
///
/// Variant fields must implement `Default`: switching the variant through
/// reflection builds the new variant from defaults.
///
/// Lifetime parameters are not supported.
#[proc_macro_derive(Reflect, attributes(reflect))]
pub fn derive_full_reflect(input: TokenStream) -> TokenStream {
    let ast = parse_macro_input!(input as DeriveInput);

    impls::match_reflect_impls(ast)
}

/// # Derive TypePath Trait
///
/// This macro only implements the `TypePath` trait.
///
/// ## Example
///
/// ```rust, ignore
/// // default implementation
/// #[derive(TypePath)]
/// struct A;
///
/// // custom implementation
/// #[derive(TypePath)]
/// #[reflect(type_path = "crate_name::foo::B")]
/// struct B;
///
/// // generics
/// #[derive(TypePath)]
/// #[reflect(type_path = "crate_name::foo::C")]
/// struct C<T>(T);
/// ```
#[proc_macro_derive(TypePath, attributes(reflect))]
pub fn derive_type_path(input: TokenStream) -> TokenStream {
    use crate::derive_data::{ReflectMeta, TypeAttributes};

    let ast: DeriveInput = parse_macro_input!(input as DeriveInput);

    let type_attributes = match TypeAttributes::parse_attrs(&ast.attrs) {
        Ok(v) => v,
        Err(err) => return err.into_compile_error().into(),
    };

    let meta = match ReflectMeta::new(&ast.ident, &ast.generics, type_attributes) {
        Ok(v) => v,
        Err(err) => return err.into_compile_error().into(),
    };
    impls::impl_trait_type_path(&meta).into()
}
