//! Paths of `shade_reflect` items used by generated code.
//!
//! The only special one is the path of `shade_reflect` itself, see
//! [`shade_reflect`].

use proc_macro2::TokenStream;
use quote::quote;

// -----------------------------------------------------------------------------
// Crate Path

/// Get the access path to the `shade_reflect` crate as seen by the caller.
///
/// 1. For crates that depend on `shade_reflect`, `::shade_reflect` is returned.
/// 2. For crates that depend on `shade`, `::shade::reflect` is returned.
/// 3. Otherwise `::shade_reflect` is returned, which may be incorrect.
///
/// Reading the manifest is not free, so the path is computed once per derive
/// and passed around.
pub(crate) fn shade_reflect() -> syn::Path {
    shade_macro_utils::Manifest::shared(|manifest| manifest.get_crate_path("shade_reflect"))
}

// -----------------------------------------------------------------------------
// Items

macro_rules! define_path {
    ($($name:ident => $($segment:ident)::+;)*) => {
        $(
            #[inline(always)]
            pub(crate) fn $name(shade_reflect_path: &syn::Path) -> TokenStream {
                quote! { #shade_reflect_path $(:: $segment)+ }
            }
        )*
    };
}

define_path! {
    macro_exports_ => __macro_exports;
    reflect_ => Reflect;
    concat_ => impls::concat;
    zero_of_ => impls::zero_of;
    non_generic_type_info_cell_ => impls::NonGenericTypeInfoCell;
    generic_type_info_cell_ => impls::GenericTypeInfoCell;
    generic_type_path_cell_ => impls::GenericTypePathCell;
    type_path_ => info::TypePath;
    typed_ => info::Typed;
    type_info_ => info::TypeInfo;
    reflect_kind_ => info::ReflectKind;
    struct_info_ => info::StructInfo;
    opaque_info_ => info::OpaqueInfo;
    named_field_ => info::NamedField;
    custom_codec_ => info::CustomCodec;
    default_zero_ => info::default_zero;
    reflect_ref_ => ops::ReflectRef;
    reflect_mut_ => ops::ReflectMut;
    struct_ => ops::Struct;
}

/// Fully qualified paths of `core` items.
pub(crate) mod fp {
    use proc_macro2::TokenStream;
    use quote::quote;

    #[inline(always)]
    pub(crate) fn option_() -> TokenStream {
        quote! { ::core::option::Option }
    }

    #[inline(always)]
    pub(crate) fn result_() -> TokenStream {
        quote! { ::core::result::Result }
    }
}
