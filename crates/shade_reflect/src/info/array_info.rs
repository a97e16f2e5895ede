use core::any::{Any, TypeId};

use crate::Reflect;
use crate::info::{Type, TypeInfo, TypePath, Typed, ZeroFn, impl_type_fn};
use crate::ops::Array;

/// Type info for fixed-size arrays.
#[derive(Clone, Debug)]
pub struct ArrayInfo {
    ty: Type,
    item_id: TypeId,
    item_info: fn() -> &'static TypeInfo,
    capacity: usize,
    zero: ZeroFn,
}

impl ArrayInfo {
    impl_type_fn!(ty);

    #[inline]
    pub const fn new<TArray, TItem>(capacity: usize, zero: ZeroFn) -> Self
    where
        TArray: Array + TypePath,
        TItem: Reflect + Typed,
    {
        Self {
            ty: Type::of::<TArray>(),
            item_id: TypeId::of::<TItem>(),
            item_info: TItem::type_info,
            capacity,
            zero,
        }
    }

    #[inline]
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    #[inline]
    pub const fn item_id(&self) -> TypeId {
        self.item_id
    }

    #[inline]
    pub fn item_is<T: Any>(&self) -> bool {
        self.item_id == TypeId::of::<T>()
    }

    #[inline]
    pub fn item_info(&self) -> &'static TypeInfo {
        (self.item_info)()
    }

    #[inline]
    pub(crate) const fn zero_fn(&self) -> ZeroFn {
        self.zero
    }
}
