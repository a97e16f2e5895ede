use proc_macro2::TokenStream;
use quote::{ToTokens, quote};
use syn::{Field, Fields, Ident, Type};

use super::{FieldAttributes, ReflectMeta};

/// A named struct field.
pub(crate) struct StructField<'a> {
    pub data: &'a Field,
    pub attrs: FieldAttributes,
}

impl StructField<'_> {
    #[inline]
    pub fn ident(&self) -> Option<&Ident> {
        self.data.ident.as_ref()
    }

    #[inline]
    pub fn ty(&self) -> &Type {
        &self.data.ty
    }

    /// The field name as written in the struct, raw prefix removed.
    pub fn name(&self) -> String {
        self.ident()
            .map(|ident| {
                let name = ident.to_string();
                match name.strip_prefix("r#") {
                    Some(stripped) => stripped.to_string(),
                    None => name,
                }
            })
            .unwrap_or_default()
    }
}

/// A struct with named fields, or a unit struct.
pub(crate) struct ReflectStruct<'a> {
    meta: ReflectMeta<'a>,
    fields: Vec<StructField<'a>>,
}

impl<'a> ReflectStruct<'a> {
    pub fn new(mut meta: ReflectMeta<'a>, fields: &'a Fields) -> syn::Result<Self> {
        let fields = match fields {
            Fields::Named(named) => named
                .named
                .iter()
                .map(|data| {
                    Ok(StructField {
                        data,
                        attrs: FieldAttributes::parse_attrs(&data.attrs)?,
                    })
                })
                .collect::<syn::Result<Vec<_>>>()?,
            Fields::Unit => Vec::new(),
            Fields::Unnamed(unnamed) => {
                return Err(syn::Error::new_spanned(
                    unnamed,
                    "tuple structs are only supported with `#[reflect(opaque)]` or `#[reflect(serde)]`",
                ));
            }
        };

        meta.set_active_types(fields.iter().map(|field| field.ty().clone()).collect());

        Ok(Self { meta, fields })
    }

    #[inline]
    pub fn meta(&self) -> &ReflectMeta<'a> {
        &self.meta
    }

    #[inline]
    pub fn fields(&self) -> &[StructField<'a>] {
        &self.fields
    }

    /// `StructInfo` construction tokens.
    pub fn to_info_tokens(&self) -> TokenStream {
        let shade_reflect_path = self.meta.shade_reflect_path();
        let type_info_ = crate::path::type_info_(shade_reflect_path);
        let struct_info_ = crate::path::struct_info_(shade_reflect_path);
        let named_field_ = crate::path::named_field_(shade_reflect_path);

        let fields = self.fields.iter().map(|field| {
            let name = field.name();
            let ty = field.ty();
            let with_tags = if field.attrs.tags.is_empty() {
                crate::utils::empty()
            } else {
                let tags = field.attrs.tags.iter().map(|(key, value)| {
                    quote! { (#key, #value) }
                });
                quote! { .with_tags(&[ #(#tags),* ]) }
            };
            quote! {
                #named_field_::new::<#ty>(#name) #with_tags
            }
        });

        let zero = self.zero_tokens();

        quote! {
            #type_info_::Struct(
                #struct_info_::new::<Self>(&[ #(#fields),* ])
                    .with_zero(#zero)
            )
        }
    }

    /// The zero constructor: `Default`, or the zero value of every field.
    fn zero_tokens(&self) -> TokenStream {
        let shade_reflect_path = self.meta.shade_reflect_path();
        let reflect_ = crate::path::reflect_(shade_reflect_path);

        if self.meta.attrs().default.is_some() {
            let default_zero_ = crate::path::default_zero_(shade_reflect_path);
            return quote! { #default_zero_::<Self> };
        }

        let macro_exports_ = crate::path::macro_exports_(shade_reflect_path);
        let zero_of_ = crate::path::zero_of_(shade_reflect_path);
        let option_ = crate::path::fp::option_();

        let inits = self.fields.iter().map(|field| {
            let member = field.data.ident.to_token_stream();
            let ty = field.ty();
            quote! { #member: #zero_of_::<#ty>()? }
        });

        // `Self {}` also builds unit structs.
        quote! {
            || -> #option_<#macro_exports_::Box<dyn #reflect_>> {
                #option_::Some(<Self as #reflect_>::into_boxed_reflect(Self { #(#inits,)* }))
            }
        }
    }
}
