use syn::{Data, DeriveInput};

use super::{EnumVariant, ReflectEnum, ReflectMeta, ReflectStruct, StructField, TypeAttributes};

/// The parsed derive input.
pub(crate) enum ReflectDerive<'a> {
    Struct(ReflectStruct<'a>),
    Enum(ReflectEnum<'a>),
    Opaque(ReflectMeta<'a>),
}

impl<'a> ReflectDerive<'a> {
    pub(crate) fn from_input(input: &'a DeriveInput) -> syn::Result<Self> {
        let attrs = TypeAttributes::parse_attrs(&input.attrs)?;
        let is_opaque = attrs.opaque.is_some();
        let meta = ReflectMeta::new(&input.ident, &input.generics, attrs)?;

        if is_opaque {
            return Ok(Self::Opaque(meta));
        }

        match &input.data {
            Data::Struct(data) => {
                let fields = StructField::parse_fields(&data.fields)?;
                Ok(Self::Struct(ReflectStruct::new(meta, fields)))
            }
            Data::Enum(data) if data.variants.is_empty() => Err(syn::Error::new(
                data.enum_token.span,
                "reflection requires at least one variant",
            )),
            Data::Enum(data) => {
                let variants = data
                    .variants
                    .iter()
                    .map(EnumVariant::parse)
                    .collect::<syn::Result<Vec<_>>>()?;
                Ok(Self::Enum(ReflectEnum::new(meta, variants)))
            }
            Data::Union(data) => Err(syn::Error::new(
                data.union_token.span,
                "reflection is not supported for unions",
            )),
        }
    }
}
