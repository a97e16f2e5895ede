use alloc::boxed::Box;
use alloc::rc::Rc;
use alloc::sync::Arc;
use core::any::Any;
use core::cell::OnceCell;
use std::sync::OnceLock;

use crate::Reflect;
use crate::impls::{GenericTypeInfoCell, zero_of};
use crate::info::{PointerFamily, PointerInfo, TypeInfo, TypePath, Typed};
use crate::ops::{Pointer, PointerError};
use crate::reflection::impl_reflect_cast_fn;

// -----------------------------------------------------------------------------
// Handles

/// A shared allocation handle.
trait Handle: Clone + 'static {
    type Pointee: Reflect + Typed;

    const FAMILY: PointerFamily;

    fn share(value: Self::Pointee) -> Self;

    fn pointee(&self) -> &Self::Pointee;

    fn address(&self) -> usize;
}

impl<T: Reflect + Typed> Handle for Rc<T> {
    type Pointee = T;

    const FAMILY: PointerFamily = PointerFamily::Rc;

    #[inline]
    fn share(value: T) -> Self {
        Rc::new(value)
    }

    #[inline]
    fn pointee(&self) -> &T {
        self
    }

    #[inline]
    fn address(&self) -> usize {
        Rc::as_ptr(self).addr()
    }
}

impl<T: Reflect + Typed> Handle for Arc<T> {
    type Pointee = T;

    const FAMILY: PointerFamily = PointerFamily::Arc;

    #[inline]
    fn share(value: T) -> Self {
        Arc::new(value)
    }

    #[inline]
    fn pointee(&self) -> &T {
        self
    }

    #[inline]
    fn address(&self) -> usize {
        Arc::as_ptr(self).addr()
    }
}

// -----------------------------------------------------------------------------
// Slots

/// A place that may hold a [`Handle`].
trait Slot: TypePath + Sized {
    type Handle: Handle;

    const NULLABLE: bool;

    fn zero() -> Option<Self>;

    fn slot(&self) -> Option<&Self::Handle>;

    fn fill(&mut self, handle: Self::Handle);

    /// Empties the slot, `false` if this kind of slot cannot be empty.
    fn empty(&mut self) -> bool;
}

impl<T: Reflect + Typed> Slot for Rc<T> {
    type Handle = Self;

    const NULLABLE: bool = false;

    #[inline]
    fn zero() -> Option<Self> {
        zero_of::<T>().map(Rc::new)
    }

    #[inline]
    fn slot(&self) -> Option<&Self> {
        Some(self)
    }

    #[inline]
    fn fill(&mut self, handle: Self) {
        *self = handle;
    }

    #[inline]
    fn empty(&mut self) -> bool {
        false
    }
}

impl<T: Reflect + Typed> Slot for Arc<T> {
    type Handle = Self;

    const NULLABLE: bool = false;

    #[inline]
    fn zero() -> Option<Self> {
        zero_of::<T>().map(Arc::new)
    }

    #[inline]
    fn slot(&self) -> Option<&Self> {
        Some(self)
    }

    #[inline]
    fn fill(&mut self, handle: Self) {
        *self = handle;
    }

    #[inline]
    fn empty(&mut self) -> bool {
        false
    }
}

impl<H: Handle + TypePath> Slot for Option<H> {
    type Handle = H;

    const NULLABLE: bool = true;

    #[inline]
    fn zero() -> Option<Self> {
        Some(None)
    }

    #[inline]
    fn slot(&self) -> Option<&H> {
        self.as_ref()
    }

    #[inline]
    fn fill(&mut self, handle: H) {
        *self = Some(handle);
    }

    #[inline]
    fn empty(&mut self) -> bool {
        *self = None;
        true
    }
}

impl<H: Handle + TypePath> Slot for OnceCell<H> {
    type Handle = H;

    const NULLABLE: bool = true;

    #[inline]
    fn zero() -> Option<Self> {
        Some(OnceCell::new())
    }

    #[inline]
    fn slot(&self) -> Option<&H> {
        self.get()
    }

    #[inline]
    fn fill(&mut self, handle: H) {
        *self = OnceCell::from(handle);
    }

    #[inline]
    fn empty(&mut self) -> bool {
        self.take();
        true
    }
}

impl<H: Handle + TypePath> Slot for OnceLock<H> {
    type Handle = H;

    const NULLABLE: bool = true;

    #[inline]
    fn zero() -> Option<Self> {
        Some(OnceLock::new())
    }

    #[inline]
    fn slot(&self) -> Option<&H> {
        self.get()
    }

    #[inline]
    fn fill(&mut self, handle: H) {
        *self = OnceLock::from(handle);
    }

    #[inline]
    fn empty(&mut self) -> bool {
        self.take();
        true
    }
}

fn slot_zero<S: Slot + Reflect>() -> Option<Box<dyn Reflect>> {
    S::zero().map(Reflect::into_boxed_reflect)
}

// -----------------------------------------------------------------------------
// Reflect impls

macro_rules! impl_reflect_pointer {
    ($slot:ty) => {
        impl<T: Reflect + Typed> Typed for $slot {
            fn type_info() -> &'static TypeInfo {
                static CELL: GenericTypeInfoCell = GenericTypeInfoCell::new();
                CELL.get_or_insert::<Self>(|| {
                    TypeInfo::Pointer(PointerInfo::new::<Self, T>(
                        <<Self as Slot>::Handle as Handle>::FAMILY,
                        <Self as Slot>::NULLABLE,
                        slot_zero::<Self>,
                    ))
                })
            }
        }

        impl<T: Reflect + Typed> Reflect for $slot {
            impl_reflect_cast_fn!(Pointer);
        }

        impl<T: Reflect + Typed> Pointer for $slot {
            #[inline]
            fn pointee(&self) -> Option<&dyn Reflect> {
                Slot::slot(self).map(|handle| Handle::pointee(handle).as_reflect())
            }

            #[inline]
            fn address(&self) -> Option<usize> {
                Slot::slot(self).map(Handle::address)
            }

            fn handle(&self) -> Option<Box<dyn Any>> {
                Slot::slot(self).map(|handle| Box::new(handle.clone()) as Box<dyn Any>)
            }

            fn set_handle(&mut self, handle: &dyn Any) -> Result<(), PointerError> {
                match handle.downcast_ref::<<Self as Slot>::Handle>() {
                    Some(handle) => {
                        Slot::fill(self, handle.clone());
                        Ok(())
                    }
                    None => Err(PointerError::HandleMismatch {
                        type_path: Self::type_path(),
                    }),
                }
            }

            fn set_pointee(&mut self, value: Box<dyn Reflect>) -> Result<(), PointerError> {
                match value.take::<T>() {
                    Ok(value) => {
                        Slot::fill(self, Handle::share(value));
                        Ok(())
                    }
                    Err(value) => Err(PointerError::PointeeMismatch {
                        type_path: Self::type_path(),
                        found: value.reflect_type_path(),
                    }),
                }
            }

            fn set_null(&mut self) -> Result<(), PointerError> {
                if Slot::empty(self) {
                    Ok(())
                } else {
                    Err(PointerError::NotNullable {
                        type_path: Self::type_path(),
                    })
                }
            }
        }
    };
}

impl_reflect_pointer!(Rc<T>);
impl_reflect_pointer!(Arc<T>);
impl_reflect_pointer!(Option<Rc<T>>);
impl_reflect_pointer!(Option<Arc<T>>);
impl_reflect_pointer!(OnceCell<Rc<T>>);
impl_reflect_pointer!(OnceLock<Arc<T>>);

#[cfg(test)]
mod tests {
    use alloc::boxed::Box;
    use alloc::rc::Rc;
    use alloc::sync::Arc;
    use core::cell::OnceCell;

    use crate::Reflect;
    use crate::info::{PointerFamily, Typed};
    use crate::ops::{Pointer, PointerError};

    #[test]
    fn pointer_info() {
        let info = Option::<Rc<i32>>::type_info().as_pointer().unwrap();
        assert_eq!(info.family(), PointerFamily::Rc);
        assert!(info.is_nullable());
        assert!(info.pointee_is::<i32>());

        let info = Arc::<i32>::type_info().as_pointer().unwrap();
        assert_eq!(info.family(), PointerFamily::Arc);
        assert!(!info.is_nullable());
    }

    #[test]
    fn share_handle_between_shapes() {
        let shared = Rc::new(5_i32);
        let mut plain = Rc::new(0_i32);
        let mut nullable: Option<Rc<i32>> = None;
        let mut late: OnceCell<Rc<i32>> = OnceCell::new();

        let handle = Pointer::handle(&shared).unwrap();
        plain.set_handle(handle.as_ref()).unwrap();
        nullable.set_handle(handle.as_ref()).unwrap();
        late.set_handle(handle.as_ref()).unwrap();

        assert!(Rc::ptr_eq(&plain, &shared));
        assert_eq!(Pointer::address(&nullable), Pointer::address(&shared));
        assert!(Rc::ptr_eq(late.get().unwrap(), &shared));

        let mut other: Option<Arc<i32>> = None;
        assert!(matches!(
            other.set_handle(handle.as_ref()),
            Err(PointerError::HandleMismatch { .. })
        ));
    }

    #[test]
    fn null_and_pointee() {
        let mut plain = Rc::new(1_u8);
        assert!(matches!(plain.set_null(), Err(PointerError::NotNullable { .. })));

        let mut nullable = Some(Rc::new(1_u8));
        nullable.set_null().unwrap();
        assert!(Pointer::is_null(&nullable));

        nullable.set_pointee(Box::new(4_u8)).unwrap();
        assert_eq!(Pointer::pointee(&nullable).and_then(|v| v.downcast_ref::<u8>()), Some(&4));
        assert!(nullable.set_pointee(4_i8.into_boxed_reflect()).is_err());
    }
}
