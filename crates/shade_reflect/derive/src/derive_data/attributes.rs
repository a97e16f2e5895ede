//! Parsing of `#[reflect(...)]` attributes.

use proc_macro2::Span;
use syn::meta::ParseNestedMeta;
use syn::spanned::Spanned;
use syn::{Attribute, LitStr, Path};

use crate::REFLECT_ATTRIBUTE_NAME;

fn set_flag(flag: &mut Option<Span>, meta: &ParseNestedMeta) -> syn::Result<()> {
    if flag.is_some() {
        return Err(meta.error("duplicate reflect attribute"));
    }
    *flag = Some(meta.path.span());
    Ok(())
}

// -----------------------------------------------------------------------------
// TypeAttributes

/// Attributes placed on the type.
#[derive(Default, Debug)]
pub(crate) struct TypeAttributes {
    /// `#[reflect(type_path = "my_crate::foo::Bar")]`
    pub type_path: Option<Path>,
    /// `#[reflect(default)]`: use `Default` as the zero value.
    pub default: Option<Span>,
    /// `#[reflect(debug)]`: use `Debug` in `reflect_debug`.
    pub debug: Option<Span>,
    /// `#[reflect(opaque)]`: do not inspect fields.
    pub opaque: Option<Span>,
    /// `#[reflect(serde)]`: opaque, coded through serde.
    pub serde: Option<Span>,
}

impl TypeAttributes {
    pub fn parse_attrs(attrs: &[Attribute]) -> syn::Result<Self> {
        let mut res = Self::default();
        for attr in attrs {
            if attr.path().is_ident(REFLECT_ATTRIBUTE_NAME) {
                attr.parse_nested_meta(|meta| res.parse_meta(meta))?;
            }
        }
        Ok(res)
    }

    fn parse_meta(&mut self, meta: ParseNestedMeta) -> syn::Result<()> {
        if meta.path.is_ident("type_path") {
            if self.type_path.is_some() {
                return Err(meta.error("duplicate `type_path`"));
            }
            let lit: LitStr = meta.value()?.parse()?;
            let path = lit.parse_with(Path::parse_mod_style)?;
            if path.leading_colon.is_some() || path.segments.len() < 2 {
                return Err(syn::Error::new(
                    lit.span(),
                    "`type_path` expects a module and an ident, e.g. `my_crate::Foo`",
                ));
            }
            self.type_path = Some(path);
            Ok(())
        } else if meta.path.is_ident("default") {
            set_flag(&mut self.default, &meta)
        } else if meta.path.is_ident("debug") {
            set_flag(&mut self.debug, &meta)
        } else if meta.path.is_ident("opaque") {
            set_flag(&mut self.opaque, &meta)
        } else if meta.path.is_ident("serde") {
            set_flag(&mut self.serde, &meta)
        } else if meta.path.is_ident("tag") {
            Err(meta.error("`tag` can only be applied to fields"))
        } else {
            Err(meta.error(
                "unknown reflect attribute, expected `type_path`, `default`, `debug`, `opaque` or `serde`",
            ))
        }
    }

    /// Whether fields are hidden from reflection.
    #[inline]
    pub fn is_opaque(&self) -> bool {
        self.opaque.is_some() || self.serde.is_some()
    }
}

// -----------------------------------------------------------------------------
// FieldAttributes

/// Attributes placed on a field.
#[derive(Default, Debug)]
pub(crate) struct FieldAttributes {
    /// `#[reflect(tag(json = "name,omitempty"))]`, in written order.
    pub tags: Vec<(String, LitStr)>,
}

impl FieldAttributes {
    pub fn parse_attrs(attrs: &[Attribute]) -> syn::Result<Self> {
        let mut res = Self::default();
        for attr in attrs {
            if attr.path().is_ident(REFLECT_ATTRIBUTE_NAME) {
                attr.parse_nested_meta(|meta| res.parse_meta(meta))?;
            }
        }
        Ok(res)
    }

    fn parse_meta(&mut self, meta: ParseNestedMeta) -> syn::Result<()> {
        if !meta.path.is_ident("tag") {
            return Err(meta.error("unknown field attribute, expected `tag(key = \"value\")`"));
        }
        meta.parse_nested_meta(|tag| {
            let Some(key) = tag.path.get_ident().map(ToString::to_string) else {
                return Err(tag.error("tag keys must be identifiers"));
            };
            if self.tags.iter().any(|(k, _)| *k == key) {
                return Err(tag.error(format!("duplicate tag `{key}`")));
            }
            let value: LitStr = tag.value()?.parse()?;
            self.tags.push((key, value));
            Ok(())
        })
    }
}
