//! Paths into `fsv_reflect` used by the generated code.
//!
//! Keeping them here limits the changes when the layout of `fsv_reflect`
//! moves.

use proc_macro2::TokenStream;
use quote::quote;

// -----------------------------------------------------------------------------
// Crate Path

/// The access path to the `fsv_reflect` crate, found by scanning the
/// builder's `Cargo.toml`.
///
/// 1. Crates depending on `fsv_reflect` get `::fsv_reflect`.
/// 2. Crates depending on the `fsv_core` facade get `::fsv_core::reflect`.
/// 3. Otherwise `::fsv_reflect`, which may be incorrect.
///
/// The lookup reads files and takes a lock, so the path is computed once
/// per derive and passed around.
pub(crate) fn fsv_reflect() -> syn::Path {
    fsv_macro_utils::Manifest::shared(|manifest| manifest.get_crate_path("fsv_reflect"))
}

macro_rules! define_paths {
    ($($name:ident => $($seg:ident)::+;)*) => {
        $(
            #[inline(always)]
            pub(crate) fn $name(fsv_reflect_path: &syn::Path) -> TokenStream {
                quote! { #fsv_reflect_path::$($seg)::+ }
            }
        )*
    };
}

define_paths! {
    reflect_ => Reflect;
    reflect_kind_ => info::ReflectKind;
    reflect_ref_ => ops::ReflectRef;
    reflect_mut_ => ops::ReflectMut;
    type_path_ => info::TypePath;
    typed_ => info::Typed;
    type_info_ => info::TypeInfo;
    struct_info_ => info::StructInfo;
    enum_info_ => info::EnumInfo;
    variant_info_ => info::VariantInfo;
    variant_kind_ => info::VariantKind;
    named_field_ => info::NamedField;
    opaque_info_ => info::OpaqueInfo;
    field_visibility_ => info::FieldVisibility;
    struct_ => ops::Struct;
    enum_ => ops::Enum;
    type_meta_ => registry::TypeMeta;
    get_type_meta_ => registry::GetTypeMeta;
    type_registry_ => registry::TypeRegistry;
    from_type_ => registry::FromType;
    type_trait_default_ => registry::TypeTraitDefault;
    non_generic_type_info_cell_ => impls::NonGenericTypeInfoCell;
    generic_type_info_cell_ => impls::GenericTypeInfoCell;
    generic_type_path_cell_ => impls::GenericTypePathCell;
    concat_ => impls::concat;
}

/// Fully qualified std items, the derive input may shadow the prelude.
pub(crate) mod fp {
    use proc_macro2::TokenStream;
    use quote::quote;

    pub(crate) fn option_() -> TokenStream {
        quote!(::core::option::Option)
    }

    pub(crate) fn result_() -> TokenStream {
        quote!(::core::result::Result)
    }

    pub(crate) fn box_() -> TokenStream {
        quote!(::std::boxed::Box)
    }

    pub(crate) fn default_() -> TokenStream {
        quote!(::core::default::Default)
    }

    pub(crate) fn to_string_() -> TokenStream {
        quote!(::std::string::ToString)
    }
}
