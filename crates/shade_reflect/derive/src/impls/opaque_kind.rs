use proc_macro2::TokenStream;
use quote::quote;

use super::{impl_trait_reflect, impl_trait_type_path, impl_trait_typed};

use crate::derive_data::ReflectMeta;

/// Implement reflect for a type whose fields stay hidden.
///
/// With `serde`, the type info carries a custom codec.
pub(crate) fn impl_opaque(meta: &ReflectMeta) -> TokenStream {
    let shade_reflect_path = meta.shade_reflect_path();
    let type_info_ = crate::path::type_info_(shade_reflect_path);
    let opaque_info_ = crate::path::opaque_info_(shade_reflect_path);

    let with_codec = if meta.attrs().serde.is_some() {
        let custom_codec_ = crate::path::custom_codec_(shade_reflect_path);
        quote! { .with_codec(#custom_codec_::of::<Self>()) }
    } else {
        crate::utils::empty()
    };

    let with_zero = if meta.attrs().default.is_some() {
        let default_zero_ = crate::path::default_zero_(shade_reflect_path);
        quote! { .with_zero(#default_zero_::<Self>) }
    } else {
        crate::utils::empty()
    };

    let type_info_tokens = quote! {
        #type_info_::Opaque(
            #opaque_info_::new::<Self>()
                #with_codec
                #with_zero
        )
    };

    let type_path_trait_tokens = impl_trait_type_path(meta);
    let typed_trait_tokens = impl_trait_typed(meta, type_info_tokens);
    let reflect_trait_tokens = impl_trait_reflect(meta, quote!(Opaque));

    quote! {
        #type_path_trait_tokens

        #typed_trait_tokens

        #reflect_trait_tokens
    }
}
