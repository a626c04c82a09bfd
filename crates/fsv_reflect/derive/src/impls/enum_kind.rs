use proc_macro2::TokenStream;
use quote::quote;

use super::{impl_trait_get_type_meta, impl_trait_reflect, impl_trait_type_path, impl_trait_typed};

use crate::derive_data::{ReflectEnum, StructField, VariantShape};

/// Implement full reflect for enum type.
pub(crate) fn impl_enum(info: &ReflectEnum) -> TokenStream {
    let meta = info.meta();
    let fsv_reflect_path = meta.fsv_reflect_path();
    let reflect_ = crate::path::reflect_(fsv_reflect_path);
    let typed_ = crate::path::typed_(fsv_reflect_path);
    let get_type_meta_ = crate::path::get_type_meta_(fsv_reflect_path);
    let default_ = crate::path::fp::default_();

    // Variant switches default every field, ignored ones included.
    let (_, _, reflect_where) = meta.split_generics(
        info.field_types(),
        Some(quote!(#reflect_ + #typed_ + #default_)),
    );
    let (_, _, meta_where) = meta.split_generics(
        info.field_types(),
        Some(quote!(#reflect_ + #typed_ + #default_ + #get_type_meta_)),
    );

    // trait: TypePath
    let type_path_trait_tokens = impl_trait_type_path(meta);

    // trait: Typed
    let typed_trait_tokens = impl_trait_typed(meta, info.to_info_tokens(), &reflect_where);

    // trait: Enum
    let enum_trait_tokens = impl_trait_enum(info, &reflect_where);

    // trait: Reflect
    let reflect_trait_tokens = impl_trait_reflect(meta, quote!(Enum), &reflect_where);

    // trait: GetTypeMeta
    let get_type_meta_tokens = impl_trait_get_type_meta(meta, info.active_types(), &meta_where);

    quote! {
        #type_path_trait_tokens

        #typed_trait_tokens

        #enum_trait_tokens

        #reflect_trait_tokens

        #get_type_meta_tokens
    }
}

/// Generate `Enum` trait implementation tokens.
fn impl_trait_enum(info: &ReflectEnum, where_clause: &TokenStream) -> TokenStream {
    let meta = info.meta();
    let fsv_reflect_path = meta.fsv_reflect_path();
    let enum_ = crate::path::enum_(fsv_reflect_path);
    let reflect_ = crate::path::reflect_(fsv_reflect_path);
    let variant_kind_ = crate::path::variant_kind_(fsv_reflect_path);
    let option_ = crate::path::fp::option_();

    let variants = info.variants();

    let mut index_arms = TokenStream::new();
    let mut name_arms = TokenStream::new();
    let mut kind_arms = TokenStream::new();
    let mut len_arms = TokenStream::new();
    let mut field_arms = TokenStream::new();
    let mut field_mut_arms = TokenStream::new();
    let mut default_arms = TokenStream::new();

    for (index, variant) in variants.iter().enumerate() {
        let ident = &variant.ident;
        let name = ident.to_string();
        let kind = match variant.shape {
            VariantShape::Struct => quote!(Struct),
            VariantShape::Tuple => quote!(Tuple),
            VariantShape::Unit => quote!(Unit),
        };
        let field_len = variant.active_fields().count();
        let default_expr = variant.default_expr();

        index_arms.extend(quote!(Self::#ident { .. } => #index,));
        name_arms.extend(quote!(Self::#ident { .. } => #name,));
        kind_arms.extend(quote!(Self::#ident { .. } => #variant_kind_::#kind,));
        len_arms.extend(quote!(Self::#ident { .. } => #field_len,));
        default_arms.extend(quote!(#index => #default_expr,));

        if field_len > 0 {
            let pattern = variant.pattern();
            let field_indices = 0..field_len;
            let bindings: Vec<_> = variant.active_fields().map(StructField::binding).collect();
            let field_indices_mut = field_indices.clone();
            field_arms.extend(quote! {
                #pattern => match index {
                    #(#field_indices => #option_::Some(#bindings),)*
                    _ => #option_::None,
                },
            });
            field_mut_arms.extend(quote! {
                #pattern => match index {
                    #(#field_indices_mut => #option_::Some(#bindings),)*
                    _ => #option_::None,
                },
            });
        }
    }

    // Variants without active fields.
    let fallback = if variants.iter().any(|variant| variant.active_fields().count() == 0) {
        quote!(_ => #option_::None,)
    } else {
        crate::utils::empty()
    };

    let real_ident = meta.ident();
    let (impl_generics, ty_generics, _) = meta.split_generics([], None);

    quote! {
        impl #impl_generics #enum_ for #real_ident #ty_generics #where_clause {
            fn variant_index(&self) -> usize {
                match self {
                    #index_arms
                }
            }

            fn variant_name(&self) -> &str {
                match self {
                    #name_arms
                }
            }

            fn variant_kind(&self) -> #variant_kind_ {
                match self {
                    #kind_arms
                }
            }

            fn field_len(&self) -> usize {
                match self {
                    #len_arms
                }
            }

            fn field_at(&self, index: usize) -> #option_<&dyn #reflect_> {
                match self {
                    #field_arms
                    #fallback
                }
            }

            fn field_at_mut(&mut self, index: usize) -> #option_<&mut dyn #reflect_> {
                match self {
                    #field_mut_arms
                    #fallback
                }
            }

            fn set_variant_default(&mut self, index: usize) -> bool {
                *self = match index {
                    #default_arms
                    _ => return false,
                };
                true
            }
        }
    }
}
