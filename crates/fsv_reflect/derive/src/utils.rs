use proc_macro2::TokenStream;

#[inline(always)]
pub(crate) fn empty() -> TokenStream {
    TokenStream::new()
}

/// Does any of `idents` appear in `tokens`?
pub(crate) fn contains_any_ident(idents: &[syn::Ident], tokens: TokenStream) -> bool {
    tokens.into_iter().any(|tree| match tree {
        proc_macro2::TokenTree::Ident(ident) => idents.contains(&ident),
        proc_macro2::TokenTree::Group(group) => contains_any_ident(idents, group.stream()),
        _ => false,
    })
}
