use proc_macro2::TokenStream;
use quote::quote;

use crate::derive_data::ReflectMeta;

/// Generate implementation code for `Reflect` trait.
pub(crate) fn impl_trait_reflect(meta: &ReflectMeta, reflect_kind_token: TokenStream) -> TokenStream {
    let shade_reflect_path = meta.shade_reflect_path();

    let reflect_ = crate::path::reflect_(shade_reflect_path);
    let macro_exports_ = crate::path::macro_exports_(shade_reflect_path);
    let reflect_kind_ = crate::path::reflect_kind_(shade_reflect_path);
    let reflect_ref_ = crate::path::reflect_ref_(shade_reflect_path);
    let reflect_mut_ = crate::path::reflect_mut_(shade_reflect_path);
    let result_ = crate::path::fp::result_();

    let reflect_debug_tokens = match meta.attrs().debug {
        Some(span) => quote::quote_spanned! { span =>
            #[inline]
            fn reflect_debug(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                ::core::fmt::Debug::fmt(self, f)
            }
        },
        None => crate::utils::empty(),
    };

    let real_ident = meta.real_ident();
    let (impl_generics, ty_generics, where_clause) = meta.split_generics(false);

    quote! {
        impl #impl_generics #reflect_ for #real_ident #ty_generics #where_clause {
            fn set(
                &mut self,
                value: #macro_exports_::Box<dyn #reflect_>,
            ) -> #result_<(), #macro_exports_::Box<dyn #reflect_>> {
                *self = value.take::<Self>()?;
                #result_::Ok(())
            }

            #[inline]
            fn reflect_kind(&self) -> #reflect_kind_ {
                #reflect_kind_::#reflect_kind_token
            }

            #[inline]
            fn reflect_ref(&self) -> #reflect_ref_<'_> {
                #reflect_ref_::#reflect_kind_token(self)
            }

            #[inline]
            fn reflect_mut(&mut self) -> #reflect_mut_<'_> {
                #reflect_mut_::#reflect_kind_token(self)
            }

            #reflect_debug_tokens
        }
    }
}
