use proc_macro2::TokenStream;
use quote::quote;

use crate::derive_data::ReflectMeta;

/// Generate implementation code for `Reflect`, `kind` is `Struct` or `Enum`.
pub(crate) fn impl_trait_reflect(
    meta: &ReflectMeta,
    kind: TokenStream,
    where_clause: &TokenStream,
) -> TokenStream {
    let fsv_reflect_path = meta.fsv_reflect_path();
    let reflect_ = crate::path::reflect_(fsv_reflect_path);
    let reflect_kind_ = crate::path::reflect_kind_(fsv_reflect_path);
    let reflect_ref_ = crate::path::reflect_ref_(fsv_reflect_path);
    let reflect_mut_ = crate::path::reflect_mut_(fsv_reflect_path);
    let box_ = crate::path::fp::box_();
    let result_ = crate::path::fp::result_();

    let real_ident = meta.ident();
    let (impl_generics, ty_generics, _) = meta.split_generics([], None);

    quote! {
        impl #impl_generics #reflect_ for #real_ident #ty_generics #where_clause {
            fn set(
                &mut self,
                value: #box_<dyn #reflect_>,
            ) -> #result_<(), #box_<dyn #reflect_>> {
                *self = value.take::<Self>()?;
                #result_::Ok(())
            }

            #[inline]
            fn reflect_kind(&self) -> #reflect_kind_ {
                #reflect_kind_::#kind
            }

            #[inline]
            fn reflect_ref(&self) -> #reflect_ref_<'_> {
                #reflect_ref_::#kind(self)
            }

            #[inline]
            fn reflect_mut(&mut self) -> #reflect_mut_<'_> {
                #reflect_mut_::#kind(self)
            }
        }
    }
}
