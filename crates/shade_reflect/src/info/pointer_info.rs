use core::any::{Any, TypeId};
use core::fmt;

use crate::info::{Type, TypeInfo, TypePath, Typed, ZeroFn, impl_type_fn};
use crate::ops::Pointer;

/// The shared-handle family of a pointer type.
///
/// Two pointer slots can share one allocation only if their families match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointerFamily {
    Rc,
    Arc,
}

impl fmt::Display for PointerFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Rc => f.pad("Rc"),
            Self::Arc => f.pad("Arc"),
        }
    }
}

/// Type info for pointer slots such as `Rc<T>`, `Option<Arc<T>>` or
/// `OnceCell<Rc<T>>`.
#[derive(Clone, Debug)]
pub struct PointerInfo {
    ty: Type,
    pointee_id: TypeId,
    pointee_info: fn() -> &'static TypeInfo,
    family: PointerFamily,
    nullable: bool,
    zero: ZeroFn,
}

impl PointerInfo {
    impl_type_fn!(ty);

    #[inline]
    pub const fn new<TPointer, TPointee>(
        family: PointerFamily,
        nullable: bool,
        zero: ZeroFn,
    ) -> Self
    where
        TPointer: Pointer + TypePath,
        TPointee: Typed,
    {
        Self {
            ty: Type::of::<TPointer>(),
            pointee_id: TypeId::of::<TPointee>(),
            pointee_info: TPointee::type_info,
            family,
            nullable,
            zero,
        }
    }

    #[inline]
    pub const fn pointee_id(&self) -> TypeId {
        self.pointee_id
    }

    #[inline]
    pub fn pointee_is<T: Any>(&self) -> bool {
        self.pointee_id == TypeId::of::<T>()
    }

    #[inline]
    pub fn pointee_info(&self) -> &'static TypeInfo {
        (self.pointee_info)()
    }

    #[inline]
    pub const fn family(&self) -> PointerFamily {
        self.family
    }

    /// Returns `true` if the slot can hold no pointee.
    #[inline]
    pub const fn is_nullable(&self) -> bool {
        self.nullable
    }

    #[inline]
    pub(crate) const fn zero_fn(&self) -> ZeroFn {
        self.zero
    }
}
