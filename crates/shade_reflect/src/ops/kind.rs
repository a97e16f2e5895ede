use crate::Reflect;
use crate::info::{ReflectKind, ReflectKindError};
use crate::ops::{Array, Complex, Interface, List, Map, Pointer, Struct};

// -----------------------------------------------------------------------------
// ReflectRef

/// An immutable, kind-specific view of a reflected value.
pub enum ReflectRef<'a> {
    Primitive(&'a dyn Reflect),
    Struct(&'a dyn Struct),
    List(&'a dyn List),
    Array(&'a dyn Array),
    Map(&'a dyn Map),
    Pointer(&'a dyn Pointer),
    Interface(&'a dyn Interface),
    Complex(&'a dyn Complex),
    Opaque(&'a dyn Reflect),
}

// -----------------------------------------------------------------------------
// ReflectMut

/// A mutable, kind-specific view of a reflected value.
pub enum ReflectMut<'a> {
    Primitive(&'a mut dyn Reflect),
    Struct(&'a mut dyn Struct),
    List(&'a mut dyn List),
    Array(&'a mut dyn Array),
    Map(&'a mut dyn Map),
    Pointer(&'a mut dyn Pointer),
    Interface(&'a mut dyn Interface),
    Complex(&'a mut dyn Complex),
    Opaque(&'a mut dyn Reflect),
}

macro_rules! impl_kind_fn {
    () => {
        pub fn kind(&self) -> ReflectKind {
            match self {
                Self::Primitive(_) => ReflectKind::Primitive,
                Self::Struct(_) => ReflectKind::Struct,
                Self::List(_) => ReflectKind::List,
                Self::Array(_) => ReflectKind::Array,
                Self::Map(_) => ReflectKind::Map,
                Self::Pointer(_) => ReflectKind::Pointer,
                Self::Interface(_) => ReflectKind::Interface,
                Self::Complex(_) => ReflectKind::Complex,
                Self::Opaque(_) => ReflectKind::Opaque,
            }
        }
    };
}

macro_rules! impl_cast_method {
    ($name:ident : $kind:ident => $($target:tt)+) => {
        pub fn $name(self) -> Result<$($target)+, ReflectKindError> {
            match self {
                Self::$kind(value) => Ok(value),
                _ => Err(ReflectKindError {
                    expected: ReflectKind::$kind,
                    received: self.kind(),
                }),
            }
        }
    };
}

impl<'a> ReflectRef<'a> {
    impl_kind_fn!();

    impl_cast_method!(as_struct: Struct => &'a dyn Struct);
    impl_cast_method!(as_list: List => &'a dyn List);
    impl_cast_method!(as_array: Array => &'a dyn Array);
    impl_cast_method!(as_map: Map => &'a dyn Map);
    impl_cast_method!(as_pointer: Pointer => &'a dyn Pointer);
    impl_cast_method!(as_interface: Interface => &'a dyn Interface);
    impl_cast_method!(as_complex: Complex => &'a dyn Complex);
}

impl<'a> ReflectMut<'a> {
    impl_kind_fn!();

    impl_cast_method!(as_struct: Struct => &'a mut dyn Struct);
    impl_cast_method!(as_list: List => &'a mut dyn List);
    impl_cast_method!(as_array: Array => &'a mut dyn Array);
    impl_cast_method!(as_map: Map => &'a mut dyn Map);
    impl_cast_method!(as_pointer: Pointer => &'a mut dyn Pointer);
    impl_cast_method!(as_interface: Interface => &'a mut dyn Interface);
    impl_cast_method!(as_complex: Complex => &'a mut dyn Complex);
}
