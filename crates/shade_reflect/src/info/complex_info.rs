use crate::info::{Type, TypePath, ZeroFn, impl_type_fn};
use crate::ops::Complex;

/// The width of each part of a complex number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComplexWidth {
    F32,
    F64,
}

/// Type info for complex numbers.
#[derive(Clone, Debug)]
pub struct ComplexInfo {
    ty: Type,
    width: ComplexWidth,
    zero: ZeroFn,
}

impl ComplexInfo {
    impl_type_fn!(ty);

    #[inline]
    pub const fn new<T: Complex + TypePath>(width: ComplexWidth, zero: ZeroFn) -> Self {
        Self {
            ty: Type::of::<T>(),
            width,
            zero,
        }
    }

    #[inline]
    pub const fn width(&self) -> ComplexWidth {
        self.width
    }

    #[inline]
    pub(crate) const fn zero_fn(&self) -> ZeroFn {
        self.zero
    }
}
