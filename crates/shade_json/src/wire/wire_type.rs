use alloc::boxed::Box;
use alloc::string::String;

use shade_reflect::info::{PrimitiveKind, TypeInfo};

use crate::wire::field_mapper::has_option;

// -----------------------------------------------------------------------------
// WireField

/// A struct field that survived tag mapping.
#[derive(Debug)]
pub struct WireField {
    wire_name: String,
    name: &'static str,
    index: usize,
    options: &'static str,
    info: &'static TypeInfo,
}

impl WireField {
    pub(crate) fn new(
        wire_name: String,
        name: &'static str,
        index: usize,
        options: &'static str,
        info: &'static TypeInfo,
    ) -> Self {
        Self {
            wire_name,
            name,
            index,
            options,
            info,
        }
    }

    #[inline]
    pub fn wire_name(&self) -> &str {
        &self.wire_name
    }

    /// The declared field name.
    #[inline]
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// The declaration index, used with `Struct::field_at`.
    #[inline]
    pub fn index(&self) -> usize {
        self.index
    }

    /// Tag options, verbatim.
    #[inline]
    pub fn options(&self) -> &'static str {
        self.options
    }

    #[inline]
    pub fn type_info(&self) -> &'static TypeInfo {
        self.info
    }

    #[inline]
    pub fn omit_empty(&self) -> bool {
        has_option(self.options, "omitempty")
    }

    #[inline]
    pub fn quoted(&self) -> bool {
        has_option(self.options, "string")
    }
}

// -----------------------------------------------------------------------------
// WireType

/// The structural mirror of a runtime type.
///
/// Children are kept as [`TypeInfo`] references and looked up in the
/// mirror cache on use, so recursive types need no back-edges here.
#[derive(Debug)]
pub enum WireType {
    Primitive(PrimitiveKind),
    Array {
        elem: &'static TypeInfo,
        len: usize,
    },
    Slice {
        elem: &'static TypeInfo,
    },
    Map {
        key: &'static TypeInfo,
        value: &'static TypeInfo,
        /// Keys are encoded and printed to a string.
        textual_key: bool,
    },
    Struct(Box<[WireField]>),
    PointerBox,
    InterfaceBox,
    ComplexBox,
    /// Produced and consumed by a serde codec.
    RawPayload,
}

impl WireType {
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Primitive(_) => "primitive",
            Self::Array { .. } => "array",
            Self::Slice { .. } => "slice",
            Self::Map { .. } => "map",
            Self::Struct(_) => "struct",
            Self::PointerBox => "pointer box",
            Self::InterfaceBox => "interface box",
            Self::ComplexBox => "complex box",
            Self::RawPayload => "raw payload",
        }
    }

    /// Whether `omitempty` may drop a field of this wire type.
    ///
    /// Boxes and structs are objects on the wire and are never empty.
    #[inline]
    pub(crate) fn can_be_empty(&self) -> bool {
        matches!(
            self,
            Self::Primitive(_) | Self::Array { .. } | Self::Slice { .. } | Self::Map { .. }
        )
    }
}
