use proc_macro2::Span;
use syn::{Attribute, LitStr};

use crate::REFLECT_ATTRIBUTE_NAME;

// -----------------------------------------------------------------------------
// TypeAttributes

/// `#[reflect(...)]` on the type.
#[derive(Default, Debug)]
pub(crate) struct TypeAttributes {
    /// `type_path = "a::b::C"`, pins the persistent path.
    pub(crate) type_path: Option<LitStr>,
    /// `default`, the type implements `Default`.
    pub(crate) default: Option<Span>,
    /// `opaque`, the type is a leaf without reflected fields.
    pub(crate) opaque: Option<Span>,
}

impl TypeAttributes {
    pub(crate) fn parse_attrs(attrs: &[Attribute]) -> syn::Result<Self> {
        let mut this = Self::default();

        for attr in attrs {
            if !attr.path().is_ident(REFLECT_ATTRIBUTE_NAME) {
                continue;
            }
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("type_path") {
                    let lit: LitStr = meta.value()?.parse()?;
                    let value = lit.value();
                    if value.is_empty() || value.starts_with("::") || value.contains('<') {
                        return Err(meta.error(
                            "`type_path` must be a path such as \"my_crate::module::Type\" \
                             without leading `::` or generics",
                        ));
                    }
                    if this.type_path.replace(lit).is_some() {
                        return Err(meta.error("duplicate `type_path`"));
                    }
                    Ok(())
                } else if meta.path.is_ident("default") {
                    this.default = Some(meta.input.span());
                    Ok(())
                } else if meta.path.is_ident("opaque") {
                    this.opaque = Some(meta.input.span());
                    Ok(())
                } else {
                    Err(meta.error(
                        "unknown attribute, expected `type_path`, `default` or `opaque`",
                    ))
                }
            })?;
        }

        Ok(this)
    }
}

// -----------------------------------------------------------------------------
// FieldAttributes

/// `#[reflect(...)]` on a field.
#[derive(Default, Debug, Clone, Copy)]
pub(crate) struct FieldAttributes {
    pub(crate) include: bool,
    pub(crate) exclude: bool,
    pub(crate) ignore: bool,
}

impl FieldAttributes {
    pub(crate) fn parse_attrs(attrs: &[Attribute]) -> syn::Result<Self> {
        let mut this = Self::default();

        for attr in attrs {
            if !attr.path().is_ident(REFLECT_ATTRIBUTE_NAME) {
                continue;
            }
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("include") {
                    this.include = true;
                } else if meta.path.is_ident("exclude") {
                    this.exclude = true;
                } else if meta.path.is_ident("ignore") {
                    this.ignore = true;
                } else {
                    return Err(meta.error(
                        "unknown field attribute, expected `include`, `exclude` or `ignore`",
                    ));
                }
                Ok(())
            })?;
        }

        if this.include && this.exclude {
            return Err(syn::Error::new(
                Span::call_site(),
                "a field cannot be both `include` and `exclude`",
            ));
        }

        Ok(this)
    }
}
