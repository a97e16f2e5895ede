use proc_macro2::TokenStream;
use quote::{ToTokens, quote};
use syn::{GenericParam, Generics, Ident, LitStr, Path, Type, TypeParam, spanned::Spanned};

use super::TypeAttributes;
use crate::utils::StringExpr;

/// The type-level data shared by every generated impl.
pub(crate) struct ReflectMeta<'a> {
    shade_reflect_path: Path,
    attrs: TypeAttributes,
    ident: &'a Ident,
    generics: &'a Generics,
    // Field types bounded by `Reflect + Typed` in generic impls.
    active_types: Vec<Type>,
}

impl core::fmt::Debug for ReflectMeta<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ReflectMeta")
            .field("shade_reflect_path", &self.shade_reflect_path.to_token_stream())
            .field("ident", &self.ident)
            .field("attrs", &self.attrs)
            .finish()
    }
}

impl<'a> ReflectMeta<'a> {
    #[inline]
    pub fn new(attrs: TypeAttributes, ident: &'a Ident, generics: &'a Generics) -> Self {
        Self {
            shade_reflect_path: crate::path::shade_reflect(),
            attrs,
            ident,
            generics,
            active_types: Vec::new(),
        }
    }

    #[inline]
    pub(super) fn set_active_types(&mut self, active_types: Vec<Type>) {
        self.active_types = active_types;
    }

    #[inline]
    pub fn shade_reflect_path(&self) -> &Path {
        &self.shade_reflect_path
    }

    #[inline]
    pub fn attrs(&self) -> &TypeAttributes {
        &self.attrs
    }

    #[inline]
    pub fn real_ident(&self) -> &Ident {
        self.ident
    }

    /// Whether `TypePath` and `Typed` need per-instantiation cells.
    pub fn impl_with_generic(&self) -> bool {
        !self.generics.params.is_empty()
    }

    // -------------------------------------------------------------------------
    // Names

    pub fn type_ident(&self) -> StringExpr {
        match &self.attrs.type_path {
            Some(path) => match path.segments.last() {
                Some(segment) => StringExpr::from(&segment.ident),
                None => StringExpr::from(self.ident),
            },
            None => StringExpr::from(self.ident),
        }
    }

    pub fn module_path(&self) -> StringExpr {
        match &self.attrs.type_path {
            Some(path) => {
                let module = path
                    .segments
                    .iter()
                    .take(path.segments.len() - 1)
                    .map(|segment| segment.ident.to_string())
                    .collect::<Vec<_>>()
                    .join("::");
                StringExpr::from_lit(&LitStr::new(&module, path.span()))
            }
            None => StringExpr::Const(quote! { ::core::module_path!() }),
        }
    }

    /// The generic arguments as one string, e.g. `alloc::string::String, 4`.
    fn reduce_generics(&self, mut ty_generic_fn: impl FnMut(&TypeParam) -> StringExpr) -> StringExpr {
        let macro_exports_ = crate::path::macro_exports_(&self.shade_reflect_path);

        let mut params = self.generics.params.iter().filter_map(|param| match param {
            GenericParam::Type(type_param) => Some(ty_generic_fn(type_param)),
            GenericParam::Const(const_param) => {
                let ident = &const_param.ident;
                let ty = &const_param.ty;
                Some(StringExpr::Owned(quote! {
                    <#ty as #macro_exports_::ToString>::to_string(&#ident)
                }))
            }
            GenericParam::Lifetime(_) => None,
        });

        let first = params.next().into_iter();

        StringExpr::from_iter(
            first.chain(params.flat_map(|x| [StringExpr::from_str(", "), x])),
            &self.shade_reflect_path,
        )
    }

    /// For `my_crate::Wrapper<u8>`, this is `"Wrapper<u8>"`.
    pub fn type_name(&self) -> StringExpr {
        let type_ident = self.type_ident();
        if !self.impl_with_generic() {
            return type_ident;
        }

        let type_path_ = crate::path::type_path_(&self.shade_reflect_path);
        let generics = self.reduce_generics(|TypeParam { ident, .. }| {
            StringExpr::Borrowed(quote! {
                <#ident as #type_path_>::type_name()
            })
        });

        StringExpr::from_iter(
            [
                type_ident,
                StringExpr::from_str("<"),
                generics,
                StringExpr::from_str(">"),
            ],
            &self.shade_reflect_path,
        )
    }

    /// For `my_crate::Wrapper<u8>`, this is `"my_crate::Wrapper<u8>"`.
    pub fn type_path(&self) -> StringExpr {
        let mut pieces = vec![
            self.module_path(),
            StringExpr::from_str("::"),
            self.type_ident(),
        ];

        if self.impl_with_generic() {
            let type_path_ = crate::path::type_path_(&self.shade_reflect_path);
            let generics = self.reduce_generics(|TypeParam { ident, .. }| {
                StringExpr::Borrowed(quote! {
                    <#ident as #type_path_>::type_path()
                })
            });
            pieces.extend([StringExpr::from_str("<"), generics, StringExpr::from_str(">")]);
        }

        StringExpr::from_iter(pieces, &self.shade_reflect_path)
    }

    // -------------------------------------------------------------------------
    // Generics

    /// Returns `impl_generics`, `ty_generics` and the where clause.
    ///
    /// - Type params always get `TypePath`.
    /// - Unless `only_type_path`, every field type additionally gets
    ///   `Reflect + Typed` (generic types only).
    pub fn split_generics(&self, only_type_path: bool) -> (TokenStream, TokenStream, TokenStream) {
        let (impl_generics, ty_generics, where_clause) = self.generics.split_for_impl();

        let mut predicates: Vec<TokenStream> = where_clause
            .map(|clause| {
                clause
                    .predicates
                    .iter()
                    .map(ToTokens::to_token_stream)
                    .collect()
            })
            .unwrap_or_default();

        let type_path_ = crate::path::type_path_(&self.shade_reflect_path);
        for param in self.generics.type_params() {
            let ident = &param.ident;
            predicates.push(quote! { #ident: #type_path_ });
        }

        if !only_type_path && self.impl_with_generic() {
            let reflect_ = crate::path::reflect_(&self.shade_reflect_path);
            let typed_ = crate::path::typed_(&self.shade_reflect_path);
            for ty in &self.active_types {
                predicates.push(quote! { #ty: #reflect_ + #typed_ });
            }
        }

        let where_clause = if predicates.is_empty() {
            crate::utils::empty()
        } else {
            quote! { where #(#predicates,)* }
        };

        (
            impl_generics.to_token_stream(),
            ty_generics.to_token_stream(),
            where_clause,
        )
    }
}
