use core::any::{Any, TypeId};

use crate::Reflect;
use crate::info::{Type, TypeInfo, TypePath, Typed, ZeroFn, default_zero, impl_type_fn};
use crate::ops::List;

/// Type info for growable sequences.
///
/// A *nullable* list (`Option<Vec<T>>`) distinguishes an absent list from an
/// empty one.
#[derive(Clone, Debug)]
pub struct ListInfo {
    ty: Type,
    item_id: TypeId,
    // `TypeInfo` is created on the first visit, use function pointers to delay it.
    item_info: fn() -> &'static TypeInfo,
    nullable: bool,
    zero: ZeroFn,
}

impl ListInfo {
    impl_type_fn!(ty);

    #[inline]
    pub const fn new<TList, TItem>(nullable: bool) -> Self
    where
        TList: List + TypePath + Default,
        TItem: Reflect + Typed,
    {
        Self {
            ty: Type::of::<TList>(),
            item_id: TypeId::of::<TItem>(),
            item_info: TItem::type_info,
            nullable,
            zero: default_zero::<TList>,
        }
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
    pub const fn is_nullable(&self) -> bool {
        self.nullable
    }

    #[inline]
    pub(crate) const fn zero_fn(&self) -> ZeroFn {
        self.zero
    }
}
