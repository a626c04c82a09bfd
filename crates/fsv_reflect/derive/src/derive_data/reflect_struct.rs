use proc_macro2::TokenStream;
use quote::{ToTokens, format_ident, quote};
use syn::{Fields, Ident, Index, Member, Type, Visibility};

use super::{FieldAttributes, ReflectMeta};

// -----------------------------------------------------------------------------
// StructField

/// One field of a struct or of an enum variant.
pub(crate) struct StructField {
    /// `self.#member`, `x` or `0`.
    pub(crate) member: Member,
    /// The reflected name, `"x"` or `"0"`.
    pub(crate) name: String,
    pub(crate) ty: Type,
    pub(crate) attrs: FieldAttributes,
    pub(crate) is_pub: bool,
}

impl StructField {
    pub(crate) fn parse_fields(fields: &Fields) -> syn::Result<Vec<StructField>> {
        fields
            .iter()
            .enumerate()
            .map(|(index, field)| {
                let member = match &field.ident {
                    Some(ident) => Member::Named(ident.clone()),
                    None => Member::Unnamed(Index::from(index)),
                };
                let name = match &field.ident {
                    Some(ident) => ident.to_string(),
                    None => index.to_string(),
                };
                Ok(StructField {
                    member,
                    name,
                    ty: field.ty.clone(),
                    attrs: FieldAttributes::parse_attrs(&field.attrs)?,
                    is_pub: matches!(field.vis, Visibility::Public(_)),
                })
            })
            .collect()
    }

    /// A local binding for pattern matching, `__field_x`.
    pub(crate) fn binding(&self) -> Ident {
        format_ident!("__field_{}", self.name)
    }

    /// `NamedField::new::<Ty>("name").with_visibility(..)...`
    pub(crate) fn to_info_tokens(&self, fsv_reflect_path: &syn::Path) -> TokenStream {
        let named_field_ = crate::path::named_field_(fsv_reflect_path);
        let visibility_ = crate::path::field_visibility_(fsv_reflect_path);

        let ty = &self.ty;
        let name = &self.name;
        let visibility = if self.is_pub {
            quote!(Public)
        } else {
            quote!(Restricted)
        };
        let include = self.attrs.include;
        let exclude = self.attrs.exclude;

        quote! {
            #named_field_::new::<#ty>(#name)
                .with_visibility(#visibility_::#visibility)
                .with_include(#include)
                .with_exclude(#exclude)
        }
    }
}

// -----------------------------------------------------------------------------
// ReflectStruct

/// A struct with named, tuple or no fields.
pub(crate) struct ReflectStruct<'a> {
    meta: ReflectMeta<'a>,
    fields: Vec<StructField>,
}

impl<'a> ReflectStruct<'a> {
    pub(crate) fn new(meta: ReflectMeta<'a>, fields: Vec<StructField>) -> Self {
        Self { meta, fields }
    }

    #[inline]
    pub(crate) fn meta(&self) -> &ReflectMeta<'a> {
        &self.meta
    }

    /// Fields visible to reflection.
    pub(crate) fn active_fields(&self) -> impl Iterator<Item = &StructField> {
        self.fields.iter().filter(|field| !field.attrs.ignore)
    }

    pub(crate) fn active_types(&self) -> impl Iterator<Item = &Type> {
        self.active_fields().map(|field| &field.ty)
    }

    /// `TypeInfo::Struct(StructInfo::new::<Self>(&[...]))`
    pub(crate) fn to_info_tokens(&self) -> TokenStream {
        let fsv_reflect_path = self.meta.fsv_reflect_path();
        let type_info_ = crate::path::type_info_(fsv_reflect_path);
        let struct_info_ = crate::path::struct_info_(fsv_reflect_path);

        let fields = self
            .active_fields()
            .map(|field| field.to_info_tokens(fsv_reflect_path));

        quote! {
            #type_info_::Struct(#struct_info_::new::<Self>(&[ #(#fields),* ]))
        }
    }

    /// Members, names and indices of the active fields, for `match` arms.
    pub(crate) fn accessors(&self) -> (Vec<TokenStream>, Vec<String>, Vec<usize>) {
        let members = self
            .active_fields()
            .map(|field| field.member.to_token_stream())
            .collect();
        let names = self.active_fields().map(|field| field.name.clone()).collect();
        let indices = (0..self.active_fields().count()).collect();
        (members, names, indices)
    }
}
