use proc_macro2::TokenStream;
use quote::quote;

use crate::derive_data::ReflectMeta;

fn static_path_cell(fsv_reflect_path: &syn::Path, generator: TokenStream) -> TokenStream {
    let path_cell_ = crate::path::generic_type_path_cell_(fsv_reflect_path);

    quote! {
        static CELL: #path_cell_ = #path_cell_::new();
        CELL.get_or_insert::<Self>(|| {
            #generator
        })
    }
}

/// Generate implementation code for `TypePath`.
pub(crate) fn impl_trait_type_path(meta: &ReflectMeta) -> TokenStream {
    let fsv_reflect_path = meta.fsv_reflect_path();
    let trait_type_path_ = crate::path::type_path_(fsv_reflect_path);
    let option_ = crate::path::fp::option_();

    let (type_path, type_name, inline_flag) = if meta.impl_with_generic() {
        (
            static_path_cell(fsv_reflect_path, meta.type_path_expr()),
            static_path_cell(fsv_reflect_path, meta.type_name_expr()),
            crate::utils::empty(),
        )
    } else {
        (
            meta.type_path_expr(),
            meta.type_name_expr(),
            quote! { #[inline] },
        )
    };

    let type_ident = meta.type_ident();
    let module_path = match meta.module_path() {
        Some(tokens) => quote!(#option_::Some(#tokens)),
        None => quote!(#option_::None),
    };

    let real_ident = meta.ident();
    let (impl_generics, ty_generics, where_clause) = meta.split_generics([], None);

    quote! {
        impl #impl_generics #trait_type_path_ for #real_ident #ty_generics #where_clause {
            #inline_flag
            fn type_path() -> &'static str {
                #type_path
            }

            #inline_flag
            fn type_name() -> &'static str {
                #type_name
            }

            #[inline]
            fn type_ident() -> &'static str {
                #type_ident
            }

            #[inline]
            fn module_path() -> #option_<&'static str> {
                #module_path
            }
        }
    }
}
