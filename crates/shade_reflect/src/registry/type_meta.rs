use crate::info::{Type, TypeInfo, Typed};

// -----------------------------------------------------------------------------
// TypeMeta

/// A registered type.
#[derive(Clone, Copy, Debug)]
pub struct TypeMeta {
    // Cached to skip the kind dispatch in `TypeInfo::ty`.
    ty: &'static Type,
    type_info: &'static TypeInfo,
}

impl TypeMeta {
    #[inline]
    pub fn of<T: Typed>() -> Self {
        Self::from_info(T::type_info())
    }

    #[inline]
    pub const fn from_info(type_info: &'static TypeInfo) -> Self {
        Self {
            ty: type_info.ty(),
            type_info,
        }
    }

    #[inline(always)]
    pub const fn type_info(&self) -> &'static TypeInfo {
        self.type_info
    }

    #[inline(always)]
    pub const fn ty(&self) -> &'static Type {
        self.ty
    }

    crate::info::impl_type_fn!();
}
