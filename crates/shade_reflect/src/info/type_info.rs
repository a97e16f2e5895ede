use alloc::boxed::Box;
use core::fmt;

use thiserror::Error;

use crate::Reflect;
use crate::info::{ArrayInfo, ComplexInfo, InterfaceInfo, ListInfo, MapInfo};
use crate::info::{OpaqueInfo, PointerInfo, PrimitiveInfo, StructInfo, Type};

// -----------------------------------------------------------------------------
// ReflectKind

/// The structural category of a reflected type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReflectKind {
    Primitive,
    Struct,
    List,
    Array,
    Map,
    Pointer,
    Interface,
    Complex,
    Opaque,
}

impl fmt::Display for ReflectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Primitive => f.pad("Primitive"),
            Self::Struct => f.pad("Struct"),
            Self::List => f.pad("List"),
            Self::Array => f.pad("Array"),
            Self::Map => f.pad("Map"),
            Self::Pointer => f.pad("Pointer"),
            Self::Interface => f.pad("Interface"),
            Self::Complex => f.pad("Complex"),
            Self::Opaque => f.pad("Opaque"),
        }
    }
}

/// A kind-specific accessor was used on a value of another kind.
#[derive(Debug, Error)]
#[error("reflect kind mismatch: expected {expected}, received {received}")]
pub struct ReflectKindError {
    pub expected: ReflectKind,
    pub received: ReflectKind,
}

// -----------------------------------------------------------------------------
// TypeInfo

/// Compile-time information about a reflected type.
///
/// Obtained through [`Typed::type_info`](crate::info::Typed::type_info) or
/// [`DynamicTyped::reflect_type_info`](crate::info::DynamicTyped::reflect_type_info).
/// Child types (fields, items, pointees) are reached through function
/// pointers, so self-referential types are described without recursion.
#[derive(Debug, Clone)]
pub enum TypeInfo {
    Primitive(PrimitiveInfo),
    Struct(StructInfo),
    List(ListInfo),
    Array(ArrayInfo),
    Map(MapInfo),
    Pointer(PointerInfo),
    Interface(InterfaceInfo),
    Complex(ComplexInfo),
    Opaque(OpaqueInfo),
}

// Helper macro that implements type-safe accessor methods like `as_struct`.
macro_rules! impl_cast_method {
    ($name:ident : $kind:ident => $info:ident) => {
        pub const fn $name(&self) -> Result<&$info, ReflectKindError> {
            match self {
                Self::$kind(info) => Ok(info),
                _ => Err(ReflectKindError {
                    expected: ReflectKind::$kind,
                    received: self.kind(),
                }),
            }
        }
    };
}

impl TypeInfo {
    impl_cast_method!(as_primitive: Primitive => PrimitiveInfo);
    impl_cast_method!(as_struct: Struct => StructInfo);
    impl_cast_method!(as_list: List => ListInfo);
    impl_cast_method!(as_array: Array => ArrayInfo);
    impl_cast_method!(as_map: Map => MapInfo);
    impl_cast_method!(as_pointer: Pointer => PointerInfo);
    impl_cast_method!(as_interface: Interface => InterfaceInfo);
    impl_cast_method!(as_complex: Complex => ComplexInfo);
    impl_cast_method!(as_opaque: Opaque => OpaqueInfo);

    pub const fn ty(&self) -> &Type {
        match self {
            Self::Primitive(info) => info.ty(),
            Self::Struct(info) => info.ty(),
            Self::List(info) => info.ty(),
            Self::Array(info) => info.ty(),
            Self::Map(info) => info.ty(),
            Self::Pointer(info) => info.ty(),
            Self::Interface(info) => info.ty(),
            Self::Complex(info) => info.ty(),
            Self::Opaque(info) => info.ty(),
        }
    }

    crate::info::impl_type_fn!();

    pub const fn kind(&self) -> ReflectKind {
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

    /// Builds the zero value of this type.
    ///
    /// Returns `None` for types without one, such as a non-nullable `Rc<T>`
    /// whose pointee has no zero value, a function pointer or a channel.
    pub fn zero(&self) -> Option<Box<dyn Reflect>> {
        let zero = match self {
            Self::Primitive(info) => info.zero_fn(),
            Self::Struct(info) => info.zero_fn(),
            Self::List(info) => info.zero_fn(),
            Self::Array(info) => info.zero_fn(),
            Self::Map(info) => info.zero_fn(),
            Self::Pointer(info) => info.zero_fn(),
            Self::Interface(info) => info.zero_fn(),
            Self::Complex(info) => info.zero_fn(),
            Self::Opaque(info) => info.zero_fn(),
        };
        zero()
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use alloc::string::String;
    use alloc::vec::Vec;

    use crate::info::{ReflectKind, Typed};

    #[test]
    fn kinds_and_casts() {
        assert_eq!(i32::type_info().kind(), ReflectKind::Primitive);
        assert_eq!(Vec::<u8>::type_info().kind(), ReflectKind::List);
        assert_eq!(<[u8; 4]>::type_info().kind(), ReflectKind::Array);

        let err = String::type_info().as_struct().unwrap_err();
        assert_eq!(err.expected, ReflectKind::Struct);
        assert_eq!(err.received, ReflectKind::Primitive);
        assert_eq!(
            err.to_string(),
            "reflect kind mismatch: expected Struct, received Primitive"
        );
    }

    #[test]
    fn zero_values() {
        let zero = i64::type_info().zero().unwrap();
        assert_eq!(zero.downcast_ref::<i64>(), Some(&0));

        let zero = <[u16; 3]>::type_info().zero().unwrap();
        assert_eq!(zero.downcast_ref::<[u16; 3]>(), Some(&[0, 0, 0]));
    }
}
