use syn::{Data, DeriveInput, GenericParam};

use super::{ReflectMeta, ReflectStruct, TypeAttributes};

/// The parsed input of `#[derive(Reflect)]`.
pub(crate) enum ReflectDerive<'a> {
    Struct(ReflectStruct<'a>),
    Opaque(ReflectMeta<'a>),
}

impl<'a> ReflectDerive<'a> {
    pub fn from_input(input: &'a DeriveInput) -> syn::Result<Self> {
        if let Some(GenericParam::Lifetime(lifetime)) = input
            .generics
            .params
            .iter()
            .find(|param| matches!(param, GenericParam::Lifetime(_)))
        {
            return Err(syn::Error::new_spanned(
                lifetime,
                "reflected types must be `'static`, lifetime parameters are not supported",
            ));
        }

        let attrs = TypeAttributes::parse_attrs(&input.attrs)?;
        let opaque = attrs.is_opaque();
        let meta = ReflectMeta::new(attrs, &input.ident, &input.generics);

        if opaque {
            return Ok(Self::Opaque(meta));
        }

        match &input.data {
            Data::Struct(data) => Ok(Self::Struct(ReflectStruct::new(meta, &data.fields)?)),
            Data::Enum(data) => Err(syn::Error::new(
                data.enum_token.span,
                "enums are only supported with `#[reflect(opaque)]` or `#[reflect(serde)]`",
            )),
            Data::Union(data) => Err(syn::Error::new(
                data.union_token.span,
                "unions are only supported with `#[reflect(opaque)]` or `#[reflect(serde)]`",
            )),
        }
    }
}
