use proc_macro2::TokenStream;
use quote::{ToTokens, quote};
use syn::Type;

use crate::derive_data::ReflectMeta;

/// Generate implementation code for `GetTypeMeta`.
///
/// Every type of `dependencies` is registered along with the type.
pub(crate) fn impl_trait_get_type_meta<'a>(
    meta: &ReflectMeta,
    dependencies: impl IntoIterator<Item = &'a Type>,
    where_clause: &TokenStream,
) -> TokenStream {
    let fsv_reflect_path = meta.fsv_reflect_path();
    let get_type_meta_ = crate::path::get_type_meta_(fsv_reflect_path);
    let type_meta_ = crate::path::type_meta_(fsv_reflect_path);
    let type_registry_ = crate::path::type_registry_(fsv_reflect_path);

    let insert_default = if meta.attrs().default.is_some() {
        let from_type_ = crate::path::from_type_(fsv_reflect_path);
        let type_trait_default_ = crate::path::type_trait_default_(fsv_reflect_path);
        quote! {
            meta.insert_trait::<#type_trait_default_>(
                <#type_trait_default_ as #from_type_<Self>>::from_type()
            );
        }
    } else {
        crate::utils::empty()
    };

    let mut seen: Vec<String> = Vec::new();
    let mut registers = TokenStream::new();
    for ty in dependencies {
        let key = ty.to_token_stream().to_string();
        if !seen.contains(&key) {
            registers.extend(quote!(registry.register::<#ty>();));
            seen.push(key);
        }
    }

    let registry_ident = if registers.is_empty() {
        quote!(_registry)
    } else {
        quote!(registry)
    };

    let real_ident = meta.ident();
    let (impl_generics, ty_generics, _) = meta.split_generics([], None);

    quote! {
        impl #impl_generics #get_type_meta_ for #real_ident #ty_generics #where_clause {
            fn get_type_meta() -> #type_meta_ {
                let mut meta = #type_meta_::of::<Self>();
                #insert_default
                meta
            }

            fn register_dependencies(#registry_ident: &mut #type_registry_) {
                #registers
            }
        }
    }
}
