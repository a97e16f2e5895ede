use alloc::boxed::Box;
use core::fmt;

use crate::Reflect;
use crate::impls::NonGenericTypeInfoCell;
use crate::info::{InterfaceInfo, TypeInfo, Typed, default_zero};
use crate::ops::Interface;
use crate::reflection::impl_reflect_cast_fn;

impl Typed for Option<Box<dyn Reflect>> {
    fn type_info() -> &'static TypeInfo {
        static CELL: NonGenericTypeInfoCell = NonGenericTypeInfoCell::new();
        CELL.get_or_init(|| TypeInfo::Interface(InterfaceInfo::new::<Self>(default_zero::<Self>)))
    }
}

impl Reflect for Option<Box<dyn Reflect>> {
    impl_reflect_cast_fn!(Interface);

    fn reflect_debug(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Some(value) => f.debug_tuple("Some").field(value).finish(),
            None => f.write_str("None"),
        }
    }
}

impl Interface for Option<Box<dyn Reflect>> {
    #[inline]
    fn value(&self) -> Option<&dyn Reflect> {
        self.as_deref()
    }

    #[inline]
    fn value_mut(&mut self) -> Option<&mut dyn Reflect> {
        self.as_deref_mut()
    }

    #[inline]
    fn set_value(&mut self, value: Option<Box<dyn Reflect>>) {
        *self = value;
    }
}
