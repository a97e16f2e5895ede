use alloc::boxed::Box;

use crate::Reflect;

/// A slot holding a value of any reflected type.
pub trait Interface: Reflect {
    fn value(&self) -> Option<&dyn Reflect>;

    fn value_mut(&mut self) -> Option<&mut dyn Reflect>;

    fn set_value(&mut self, value: Option<Box<dyn Reflect>>);
}
