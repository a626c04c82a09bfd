use proc_macro2::TokenStream;
use quote::quote;

use super::{impl_trait_get_type_meta, impl_trait_reflect, impl_trait_type_path, impl_trait_typed};

use crate::derive_data::ReflectStruct;

/// Implement full reflect for struct type.
pub(crate) fn impl_struct(info: &ReflectStruct) -> TokenStream {
    let meta = info.meta();
    let fsv_reflect_path = meta.fsv_reflect_path();
    let reflect_ = crate::path::reflect_(fsv_reflect_path);
    let typed_ = crate::path::typed_(fsv_reflect_path);
    let get_type_meta_ = crate::path::get_type_meta_(fsv_reflect_path);

    let (_, _, reflect_where) =
        meta.split_generics(info.active_types(), Some(quote!(#reflect_ + #typed_)));
    let (_, _, meta_where) = meta.split_generics(
        info.active_types(),
        Some(quote!(#reflect_ + #typed_ + #get_type_meta_)),
    );

    // trait: TypePath
    let type_path_trait_tokens = impl_trait_type_path(meta);

    // trait: Typed
    let typed_trait_tokens = impl_trait_typed(meta, info.to_info_tokens(), &reflect_where);

    // trait: Struct
    let struct_trait_tokens = impl_trait_struct(info, &reflect_where);

    // trait: Reflect
    let reflect_trait_tokens = impl_trait_reflect(meta, quote!(Struct), &reflect_where);

    // trait: GetTypeMeta
    let get_type_meta_tokens = impl_trait_get_type_meta(meta, info.active_types(), &meta_where);

    quote! {
        #type_path_trait_tokens

        #typed_trait_tokens

        #struct_trait_tokens

        #reflect_trait_tokens

        #get_type_meta_tokens
    }
}

/// Generate `Struct` trait implementation tokens.
fn impl_trait_struct(info: &ReflectStruct, where_clause: &TokenStream) -> TokenStream {
    let meta = info.meta();
    let fsv_reflect_path = meta.fsv_reflect_path();
    let struct_ = crate::path::struct_(fsv_reflect_path);
    let reflect_ = crate::path::reflect_(fsv_reflect_path);
    let option_ = crate::path::fp::option_();

    let (members, names, indices) = info.accessors();
    let field_count = indices.len();

    let real_ident = meta.ident();
    let (impl_generics, ty_generics, _) = meta.split_generics([], None);

    quote! {
        impl #impl_generics #struct_ for #real_ident #ty_generics #where_clause {
            fn field(&self, name: &str) -> #option_<&dyn #reflect_> {
                match name {
                    #(#names => #option_::Some(&self.#members),)*
                    _ => #option_::None,
                }
            }

            fn field_mut(&mut self, name: &str) -> #option_<&mut dyn #reflect_> {
                match name {
                    #(#names => #option_::Some(&mut self.#members),)*
                    _ => #option_::None,
                }
            }

            fn field_at(&self, index: usize) -> #option_<&dyn #reflect_> {
                match index {
                    #(#indices => #option_::Some(&self.#members),)*
                    _ => #option_::None,
                }
            }

            fn field_at_mut(&mut self, index: usize) -> #option_<&mut dyn #reflect_> {
                match index {
                    #(#indices => #option_::Some(&mut self.#members),)*
                    _ => #option_::None,
                }
            }

            fn name_at(&self, index: usize) -> #option_<&str> {
                match index {
                    #(#indices => #option_::Some(#names),)*
                    _ => #option_::None,
                }
            }

            #[inline]
            fn field_len(&self) -> usize {
                #field_count
            }
        }
    }
}
