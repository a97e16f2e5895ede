use crate::info::{Type, TypePath, ZeroFn, impl_type_fn};
use crate::ops::Interface;

/// Type info for dynamically typed slots, `Option<Box<dyn Reflect>>`.
#[derive(Clone, Debug)]
pub struct InterfaceInfo {
    ty: Type,
    zero: ZeroFn,
}

impl InterfaceInfo {
    impl_type_fn!(ty);

    #[inline]
    pub const fn new<T: Interface + TypePath>(zero: ZeroFn) -> Self {
        Self {
            ty: Type::of::<T>(),
            zero,
        }
    }

    #[inline]
    pub(crate) const fn zero_fn(&self) -> ZeroFn {
        self.zero
    }
}
