use alloc::boxed::Box;
use core::any::Any;

use thiserror::Error;

use crate::Reflect;

/// Failure to re-point a [`Pointer`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PointerError {
    #[error("`{type_path}` cannot be null")]
    NotNullable { type_path: &'static str },
    #[error("`{type_path}` cannot share a handle of another type")]
    HandleMismatch { type_path: &'static str },
    #[error("`{type_path}` cannot point to a `{found}`")]
    PointeeMismatch {
        type_path: &'static str,
        found: &'static str,
    },
}

// -----------------------------------------------------------------------------
// Pointer

/// A slot holding a shared handle (`Rc<T>`, `Arc<T>`) to a pointee.
///
/// The address of the allocation is the pointer's identity: two slots with
/// the same [`address`](Pointer::address) alias one value.
///
/// Handles move between slots as `Box<dyn Any>` holding the concrete `Rc<T>`
/// or `Arc<T>`, so slots of different shapes (for example `Rc<T>` and
/// `Option<Rc<T>>`) can share one allocation.
pub trait Pointer: Reflect {
    /// Returns the pointee, `None` if the slot is empty.
    fn pointee(&self) -> Option<&dyn Reflect>;

    /// Returns the address of the pointee allocation.
    fn address(&self) -> Option<usize>;

    /// Returns a clone of the handle, `None` if the slot is empty.
    fn handle(&self) -> Option<Box<dyn Any>>;

    /// Points the slot at the allocation behind `handle`.
    fn set_handle(&mut self, handle: &dyn Any) -> Result<(), PointerError>;

    /// Moves `value` into a fresh allocation and points the slot at it.
    fn set_pointee(&mut self, value: Box<dyn Reflect>) -> Result<(), PointerError>;

    /// Empties the slot.
    fn set_null(&mut self) -> Result<(), PointerError>;

    #[inline]
    fn is_null(&self) -> bool {
        self.pointee().is_none()
    }
}
