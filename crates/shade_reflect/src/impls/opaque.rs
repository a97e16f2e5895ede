use core::ptr;
use core::time::Duration;
use std::sync::mpsc::{Receiver, Sender};

use crate::Reflect;
use crate::impls::{GenericTypeInfoCell, GenericTypePathCell, NonGenericTypeInfoCell, concat};
use crate::info::{CustomCodec, OpaqueInfo, TypeInfo, TypePath, Typed, default_zero};
use crate::reflection::impl_reflect_cast_fn;

// -----------------------------------------------------------------------------
// Channels

macro_rules! impl_reflect_channel {
    ($ty:ident) => {
        impl<T: TypePath> Typed for $ty<T> {
            fn type_info() -> &'static TypeInfo {
                static CELL: GenericTypeInfoCell = GenericTypeInfoCell::new();
                CELL.get_or_insert::<Self>(|| TypeInfo::Opaque(OpaqueInfo::new::<Self>()))
            }
        }

        impl<T: TypePath> Reflect for $ty<T> {
            impl_reflect_cast_fn!(Opaque);
        }
    };
}

impl_reflect_channel!(Sender);
impl_reflect_channel!(Receiver);

// -----------------------------------------------------------------------------
// Raw pointers

macro_rules! impl_reflect_raw_pointer {
    ($prefix:literal, $ty:ty, $null:ident) => {
        impl<T: TypePath> TypePath for $ty {
            fn type_path() -> &'static str {
                static CELL: GenericTypePathCell = GenericTypePathCell::new();
                CELL.get_or_insert::<Self>(|| concat(&[$prefix, T::type_path()]))
            }

            fn type_name() -> &'static str {
                static CELL: GenericTypePathCell = GenericTypePathCell::new();
                CELL.get_or_insert::<Self>(|| concat(&[$prefix, T::type_name()]))
            }

            fn type_ident() -> &'static str {
                Self::type_name()
            }
        }

        impl<T: TypePath> Typed for $ty {
            fn type_info() -> &'static TypeInfo {
                static CELL: GenericTypeInfoCell = GenericTypeInfoCell::new();
                CELL.get_or_insert::<Self>(|| {
                    TypeInfo::Opaque(
                        OpaqueInfo::new::<Self>()
                            .with_zero(|| Some(ptr::$null::<T>().into_boxed_reflect())),
                    )
                })
            }
        }

        impl<T: TypePath> Reflect for $ty {
            impl_reflect_cast_fn!(Opaque);
        }
    };
}

impl_reflect_raw_pointer!("*const ", *const T, null);
impl_reflect_raw_pointer!("*mut ", *mut T, null_mut);

// -----------------------------------------------------------------------------
// Function pointers

macro_rules! impl_reflect_fn_pointer {
    ($($arg:ident),*) => {
        impl<$($arg: TypePath,)* R: TypePath> TypePath for fn($($arg),*) -> R {
            fn type_path() -> &'static str {
                static CELL: GenericTypePathCell = GenericTypePathCell::new();
                CELL.get_or_insert::<Self>(|| {
                    let args: &[&str] = &[$(<$arg as TypePath>::type_path()),*];
                    concat(&["fn(", &args.join(", "), ") -> ", R::type_path()])
                })
            }

            fn type_name() -> &'static str {
                static CELL: GenericTypePathCell = GenericTypePathCell::new();
                CELL.get_or_insert::<Self>(|| {
                    let args: &[&str] = &[$(<$arg as TypePath>::type_name()),*];
                    concat(&["fn(", &args.join(", "), ") -> ", R::type_name()])
                })
            }

            fn type_ident() -> &'static str {
                Self::type_name()
            }
        }

        impl<$($arg: TypePath,)* R: TypePath> Typed for fn($($arg),*) -> R {
            fn type_info() -> &'static TypeInfo {
                static CELL: GenericTypeInfoCell = GenericTypeInfoCell::new();
                CELL.get_or_insert::<Self>(|| TypeInfo::Opaque(OpaqueInfo::new::<Self>()))
            }
        }

        impl<$($arg: TypePath,)* R: TypePath> Reflect for fn($($arg),*) -> R {
            impl_reflect_cast_fn!(Opaque);
        }
    };
}

impl_reflect_fn_pointer!();
impl_reflect_fn_pointer!(A);
impl_reflect_fn_pointer!(A, B);
impl_reflect_fn_pointer!(A, B, C);

impl TypePath for () {
    #[inline]
    fn type_path() -> &'static str {
        "()"
    }

    #[inline]
    fn type_name() -> &'static str {
        "()"
    }

    #[inline]
    fn type_ident() -> &'static str {
        "()"
    }
}

// -----------------------------------------------------------------------------
// Custom-coded

impl TypePath for Duration {
    #[inline]
    fn type_path() -> &'static str {
        "core::time::Duration"
    }

    #[inline]
    fn type_name() -> &'static str {
        "Duration"
    }

    #[inline]
    fn type_ident() -> &'static str {
        "Duration"
    }

    #[inline]
    fn module_path() -> Option<&'static str> {
        Some("core::time")
    }
}

impl Typed for Duration {
    fn type_info() -> &'static TypeInfo {
        static CELL: NonGenericTypeInfoCell = NonGenericTypeInfoCell::new();
        CELL.get_or_init(|| {
            TypeInfo::Opaque(
                OpaqueInfo::new::<Self>()
                    .with_codec(CustomCodec::of::<Self>())
                    .with_zero(default_zero::<Self>),
            )
        })
    }
}

impl Reflect for Duration {
    impl_reflect_cast_fn!(Opaque);

    fn reflect_debug(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Debug::fmt(self, f)
    }
}

#[cfg(test)]
mod tests {
    use core::time::Duration;

    use crate::info::{TypePath, Typed};

    #[test]
    fn opaque_paths() {
        assert_eq!(<fn()>::type_path(), "fn() -> ()");
        assert_eq!(<fn(i32, bool) -> u8>::type_name(), "fn(i32, bool) -> u8");
        assert_eq!(<*const u8>::type_path(), "*const u8");
    }

    #[test]
    fn duration_is_custom_coded() {
        let info = Duration::type_info().as_opaque().unwrap();
        assert!(info.codec().is_some());
        assert!(<fn()>::type_info().as_opaque().unwrap().codec().is_none());
    }
}
