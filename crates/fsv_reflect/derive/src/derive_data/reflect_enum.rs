use proc_macro2::TokenStream;
use quote::quote;
use syn::{Fields, Ident, Type};

use super::{ReflectMeta, StructField};

// -----------------------------------------------------------------------------
// EnumVariant

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum VariantShape {
    Struct,
    Tuple,
    Unit,
}

pub(crate) struct EnumVariant {
    pub(crate) ident: Ident,
    pub(crate) shape: VariantShape,
    pub(crate) fields: Vec<StructField>,
}

impl EnumVariant {
    pub(crate) fn parse(variant: &syn::Variant) -> syn::Result<Self> {
        let shape = match &variant.fields {
            Fields::Named(_) => VariantShape::Struct,
            Fields::Unnamed(_) => VariantShape::Tuple,
            Fields::Unit => VariantShape::Unit,
        };
        Ok(Self {
            ident: variant.ident.clone(),
            shape,
            fields: StructField::parse_fields(&variant.fields)?,
        })
    }

    pub(crate) fn active_fields(&self) -> impl Iterator<Item = &StructField> {
        self.fields.iter().filter(|field| !field.attrs.ignore)
    }

    /// `Self::V { 0: __field_0, x: __field_x, .. }`, binding active fields.
    pub(crate) fn pattern(&self) -> TokenStream {
        let ident = &self.ident;
        let members = self.active_fields().map(|field| &field.member);
        let bindings = self.active_fields().map(StructField::binding);
        quote!(Self::#ident { #(#members: #bindings,)* .. })
    }

    /// `Self::V { 0: Default::default(), .. }`, with every field defaulted.
    pub(crate) fn default_expr(&self) -> TokenStream {
        let ident = &self.ident;
        let default_ = crate::path::fp::default_();
        let members = self.fields.iter().map(|field| &field.member);
        quote!(Self::#ident { #(#members: #default_::default(),)* })
    }
}

// -----------------------------------------------------------------------------
// ReflectEnum

pub(crate) struct ReflectEnum<'a> {
    meta: ReflectMeta<'a>,
    variants: Vec<EnumVariant>,
}

impl<'a> ReflectEnum<'a> {
    pub(crate) fn new(meta: ReflectMeta<'a>, variants: Vec<EnumVariant>) -> Self {
        Self { meta, variants }
    }

    #[inline]
    pub(crate) fn meta(&self) -> &ReflectMeta<'a> {
        &self.meta
    }

    #[inline]
    pub(crate) fn variants(&self) -> &[EnumVariant] {
        &self.variants
    }

    /// Types of all fields, ignored ones included: they are defaulted.
    pub(crate) fn field_types(&self) -> impl Iterator<Item = &Type> {
        self.variants
            .iter()
            .flat_map(|variant| variant.fields.iter().map(|field| &field.ty))
    }

    pub(crate) fn active_types(&self) -> impl Iterator<Item = &Type> {
        self.variants
            .iter()
            .flat_map(|variant| variant.active_fields().map(|field| &field.ty))
    }

    /// `TypeInfo::Enum(EnumInfo::new::<Self>(&[...]))`
    pub(crate) fn to_info_tokens(&self) -> TokenStream {
        let fsv_reflect_path = self.meta.fsv_reflect_path();
        let type_info_ = crate::path::type_info_(fsv_reflect_path);
        let enum_info_ = crate::path::enum_info_(fsv_reflect_path);
        let variant_info_ = crate::path::variant_info_(fsv_reflect_path);
        let variant_kind_ = crate::path::variant_kind_(fsv_reflect_path);

        // Only unit-only enums can be cast to their discriminant.
        let c_like = self
            .variants
            .iter()
            .all(|variant| matches!(variant.shape, VariantShape::Unit));

        let variants = self.variants.iter().map(|variant| {
            let ident = &variant.ident;
            let name = ident.to_string();
            let kind = match variant.shape {
                VariantShape::Struct => quote!(Struct),
                VariantShape::Tuple => quote!(Tuple),
                VariantShape::Unit => quote!(Unit),
            };
            let fields = variant
                .active_fields()
                .map(|field| field.to_info_tokens(fsv_reflect_path));
            let info = quote! {
                #variant_info_::new(#name, #variant_kind_::#kind, &[ #(#fields),* ])
            };
            if c_like {
                quote!(#info.with_discriminant(Self::#ident as i64))
            } else {
                info
            }
        });

        quote! {
            #type_info_::Enum(#enum_info_::new::<Self>(&[ #(#variants),* ]))
        }
    }
}
