use proc_macro2::TokenStream;
use quote::quote;

use super::{impl_trait_get_type_meta, impl_trait_reflect, impl_trait_type_path, impl_trait_typed};

use crate::derive_data::ReflectMeta;

/// Implement reflect for a `#[reflect(opaque)]` type.
///
/// Fields are not reflected, values of the type are only handled by a
/// strategy registered for it.
pub(crate) fn impl_opaque(meta: &ReflectMeta) -> TokenStream {
    let fsv_reflect_path = meta.fsv_reflect_path();
    let type_info_ = crate::path::type_info_(fsv_reflect_path);
    let opaque_info_ = crate::path::opaque_info_(fsv_reflect_path);

    let (_, _, where_clause) = meta.split_generics([], None);

    let type_path_trait_tokens = impl_trait_type_path(meta);

    let info_tokens = quote! {
        #type_info_::Opaque(#opaque_info_::new::<Self>())
    };
    let typed_trait_tokens = impl_trait_typed(meta, info_tokens, &where_clause);

    let reflect_trait_tokens = impl_trait_reflect(meta, quote!(Opaque), &where_clause);

    let get_type_meta_tokens = impl_trait_get_type_meta(meta, [], &where_clause);

    quote! {
        #type_path_trait_tokens

        #typed_trait_tokens

        #reflect_trait_tokens

        #get_type_meta_tokens
    }
}
