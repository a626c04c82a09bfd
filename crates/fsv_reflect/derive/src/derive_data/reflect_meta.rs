use proc_macro2::TokenStream;
use quote::{ToTokens, quote};
use syn::spanned::Spanned;
use syn::{GenericParam, Generics, Ident, ImplGenerics, Path, Type, TypeGenerics};

use super::TypeAttributes;

// -----------------------------------------------------------------------------
// ReflectMeta

/// Type-level data shared by every generated impl.
pub(crate) struct ReflectMeta<'a> {
    fsv_reflect_path: Path,
    ident: &'a Ident,
    generics: &'a Generics,
    attrs: TypeAttributes,
}

impl<'a> ReflectMeta<'a> {
    pub(crate) fn new(
        ident: &'a Ident,
        generics: &'a Generics,
        attrs: TypeAttributes,
    ) -> syn::Result<Self> {
        if let Some(lifetime) = generics.lifetimes().next() {
            return Err(syn::Error::new(
                lifetime.span(),
                "reflected types cannot have lifetime parameters",
            ));
        }

        Ok(Self {
            fsv_reflect_path: crate::path::fsv_reflect(),
            ident,
            generics,
            attrs,
        })
    }

    #[inline]
    pub(crate) fn fsv_reflect_path(&self) -> &Path {
        &self.fsv_reflect_path
    }

    #[inline]
    pub(crate) fn attrs(&self) -> &TypeAttributes {
        &self.attrs
    }

    #[inline]
    pub(crate) fn ident(&self) -> &Ident {
        self.ident
    }

    /// Whether `TypePath` and `Typed` need per-instantiation cells.
    #[inline]
    pub(crate) fn impl_with_generic(&self) -> bool {
        !self.generics.params.is_empty()
    }

    pub(crate) fn type_param_idents(&self) -> Vec<Ident> {
        self.generics
            .type_params()
            .map(|param| param.ident.clone())
            .collect()
    }

    // -------------------------------------------------------------------------
    // Paths

    /// `type_ident`: the pinned path's last segment, or the ident.
    pub(crate) fn type_ident(&self) -> String {
        match &self.attrs.type_path {
            Some(lit) => {
                let value = lit.value();
                match value.rsplit_once("::") {
                    Some((_, ident)) => ident.to_owned(),
                    None => value,
                }
            }
            None => self.ident.to_string(),
        }
    }

    /// Tokens of a `&'static str` expression, or `None` for types pinned
    /// without a module.
    pub(crate) fn module_path(&self) -> Option<TokenStream> {
        match &self.attrs.type_path {
            Some(lit) => {
                let value = lit.value();
                value
                    .rsplit_once("::")
                    .map(|(module, _)| module.to_token_stream())
            }
            None => Some(quote!(::core::module_path!())),
        }
    }

    /// The non-generic part of the path, a constant string expression.
    fn base_path(&self) -> TokenStream {
        match &self.attrs.type_path {
            Some(lit) => lit.to_token_stream(),
            None => {
                let ident = self.ident.to_string();
                quote!(::core::concat!(::core::module_path!(), "::", #ident))
            }
        }
    }

    /// A `&'static str` expression for `TypePath::type_path`.
    ///
    /// For generic types, an expression building a `String`.
    pub(crate) fn type_path_expr(&self) -> TokenStream {
        let base = self.base_path();
        if !self.impl_with_generic() {
            return base;
        }
        let args = self.generic_args(quote!(type_path));
        let concat_ = crate::path::concat_(&self.fsv_reflect_path);
        quote!(#concat_(&[#base, "<", #args ">"]))
    }

    /// Same as [`type_path_expr`](Self::type_path_expr), for `TypePath::type_name`.
    pub(crate) fn type_name_expr(&self) -> TokenStream {
        let base = self.type_ident();
        if !self.impl_with_generic() {
            return base.to_token_stream();
        }
        let args = self.generic_args(quote!(type_name));
        let concat_ = crate::path::concat_(&self.fsv_reflect_path);
        quote!(#concat_(&[#base, "<", #args ">"]))
    }

    // `T::type_path(), ", ", &N.to_string(), `
    fn generic_args(&self, method: TokenStream) -> TokenStream {
        let type_path_ = crate::path::type_path_(&self.fsv_reflect_path);
        let to_string_ = crate::path::fp::to_string_();

        let args: Vec<TokenStream> = self
            .generics
            .params
            .iter()
            .filter_map(|param| match param {
                GenericParam::Type(param) => {
                    let ident = &param.ident;
                    Some(quote!(<#ident as #type_path_>::#method()))
                }
                GenericParam::Const(param) => {
                    let ident = &param.ident;
                    Some(quote!(&#to_string_::to_string(&#ident)))
                }
                GenericParam::Lifetime(_) => None,
            })
            .collect();

        let mut tokens = TokenStream::new();
        for (index, arg) in args.iter().enumerate() {
            if index > 0 {
                tokens.extend(quote!(", ",));
            }
            tokens.extend(quote!(#arg,));
        }
        tokens
    }

    // -------------------------------------------------------------------------
    // Generics

    /// Splits the generics for an impl block.
    ///
    /// Every type parameter gets a `TypePath` bound. Each of `field_types`
    /// that mentions a type parameter gets `field_bounds`.
    pub(crate) fn split_generics<'b>(
        &'b self,
        field_types: impl IntoIterator<Item = &'b Type>,
        field_bounds: Option<TokenStream>,
    ) -> (ImplGenerics<'b>, TypeGenerics<'b>, TokenStream) {
        let (impl_generics, ty_generics, where_clause) = self.generics.split_for_impl();

        let mut predicates = TokenStream::new();
        if let Some(where_clause) = where_clause {
            for predicate in where_clause.predicates.iter() {
                predicates.extend(quote!(#predicate,));
            }
        }

        let type_path_ = crate::path::type_path_(&self.fsv_reflect_path);
        for param in self.generics.type_params() {
            let ident = &param.ident;
            predicates.extend(quote!(#ident: #type_path_,));
        }

        if let Some(bounds) = field_bounds {
            let idents = self.type_param_idents();
            if !idents.is_empty() {
                let mut seen: Vec<String> = Vec::new();
                for ty in field_types {
                    let key = ty.to_token_stream().to_string();
                    if seen.contains(&key) {
                        continue;
                    }
                    if crate::utils::contains_any_ident(&idents, ty.to_token_stream()) {
                        predicates.extend(quote!(#ty: #bounds,));
                    }
                    seen.push(key);
                }
            }
        }

        let where_tokens = if predicates.is_empty() {
            crate::utils::empty()
        } else {
            quote!(where #predicates)
        };

        (impl_generics, ty_generics, where_tokens)
    }
}
