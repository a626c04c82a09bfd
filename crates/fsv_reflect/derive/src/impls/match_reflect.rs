use proc_macro::TokenStream;
use syn::DeriveInput;

use crate::derive_data::ReflectDerive;

pub(crate) fn match_reflect_impls(ast: DeriveInput) -> TokenStream {
    let reflect_derive = match ReflectDerive::from_input(&ast) {
        Ok(data) => data,
        Err(err) => return err.into_compile_error().into(),
    };

    let tokens = match reflect_derive {
        ReflectDerive::Struct(info) => super::impl_struct(&info),
        ReflectDerive::Enum(info) => super::impl_enum(&info),
        ReflectDerive::Opaque(meta) => super::impl_opaque(&meta),
    };

    TokenStream::from(tokens)
}
