use alloc::string::String;
use core::fmt;

use crate::Reflect;
use crate::impls::NonGenericTypeInfoCell;
use crate::info::{PrimitiveInfo, PrimitiveKind, TypeInfo, TypePath, Typed, default_zero};
use crate::reflection::impl_reflect_cast_fn;

macro_rules! impl_reflect_primitive {
    ($ty:ty, $kind:ident, $name:literal $(, $module:literal)?) => {
        impl TypePath for $ty {
            #[inline]
            fn type_path() -> &'static str {
                concat!($($module, "::",)? $name)
            }

            #[inline]
            fn type_name() -> &'static str {
                $name
            }

            #[inline]
            fn type_ident() -> &'static str {
                $name
            }

            $(
                #[inline]
                fn module_path() -> Option<&'static str> {
                    Some($module)
                }
            )?
        }

        impl Typed for $ty {
            fn type_info() -> &'static TypeInfo {
                static CELL: NonGenericTypeInfoCell = NonGenericTypeInfoCell::new();
                CELL.get_or_init(|| {
                    TypeInfo::Primitive(PrimitiveInfo::new::<Self>(
                        PrimitiveKind::$kind,
                        default_zero::<Self>,
                    ))
                })
            }
        }

        impl Reflect for $ty {
            impl_reflect_cast_fn!(Primitive);

            #[inline]
            fn reflect_debug(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                fmt::Debug::fmt(self, f)
            }
        }
    };
}

impl_reflect_primitive!(bool, Bool, "bool");
impl_reflect_primitive!(i8, I8, "i8");
impl_reflect_primitive!(i16, I16, "i16");
impl_reflect_primitive!(i32, I32, "i32");
impl_reflect_primitive!(i64, I64, "i64");
impl_reflect_primitive!(isize, Isize, "isize");
impl_reflect_primitive!(u8, U8, "u8");
impl_reflect_primitive!(u16, U16, "u16");
impl_reflect_primitive!(u32, U32, "u32");
impl_reflect_primitive!(u64, U64, "u64");
impl_reflect_primitive!(usize, Usize, "usize");
impl_reflect_primitive!(f32, F32, "f32");
impl_reflect_primitive!(f64, F64, "f64");
impl_reflect_primitive!(char, Char, "char");
impl_reflect_primitive!(String, String, "String", "alloc::string");

/// Returns the type info of the built-in primitive whose
/// [`type_ident`](TypePath::type_ident) is `name`.
pub(crate) fn builtin(name: &str) -> Option<&'static TypeInfo> {
    let info = match name {
        "bool" => bool::type_info(),
        "i8" => i8::type_info(),
        "i16" => i16::type_info(),
        "i32" => i32::type_info(),
        "i64" => i64::type_info(),
        "isize" => isize::type_info(),
        "u8" => u8::type_info(),
        "u16" => u16::type_info(),
        "u32" => u32::type_info(),
        "u64" => u64::type_info(),
        "usize" => usize::type_info(),
        "f32" => f32::type_info(),
        "f64" => f64::type_info(),
        "char" => char::type_info(),
        "String" => String::type_info(),
        _ => return None,
    };
    Some(info)
}
