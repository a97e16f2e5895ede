use core::fmt;

use crate::info::{Type, TypePath, ZeroFn, impl_type_fn};

/// The concrete scalar behind a [`PrimitiveInfo`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrimitiveKind {
    Bool,
    I8,
    I16,
    I32,
    I64,
    Isize,
    U8,
    U16,
    U32,
    U64,
    Usize,
    F32,
    F64,
    Char,
    String,
}

impl PrimitiveKind {
    #[inline]
    pub const fn is_integer(self) -> bool {
        matches!(
            self,
            Self::I8
                | Self::I16
                | Self::I32
                | Self::I64
                | Self::Isize
                | Self::U8
                | Self::U16
                | Self::U32
                | Self::U64
                | Self::Usize
        )
    }

    #[inline]
    pub const fn is_float(self) -> bool {
        matches!(self, Self::F32 | Self::F64)
    }

    #[inline]
    pub const fn is_textual(self) -> bool {
        matches!(self, Self::Char | Self::String)
    }
}

impl fmt::Display for PrimitiveKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// Type info for scalars and `String`.
#[derive(Clone, Debug)]
pub struct PrimitiveInfo {
    ty: Type,
    kind: PrimitiveKind,
    zero: ZeroFn,
}

impl PrimitiveInfo {
    impl_type_fn!(ty);

    #[inline]
    pub const fn new<T: TypePath>(kind: PrimitiveKind, zero: ZeroFn) -> Self {
        Self {
            ty: Type::of::<T>(),
            kind,
            zero,
        }
    }

    #[inline]
    pub const fn primitive_kind(&self) -> PrimitiveKind {
        self.kind
    }

    #[inline]
    pub(crate) const fn zero_fn(&self) -> ZeroFn {
        self.zero
    }
}
