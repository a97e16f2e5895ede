//! Complex number types.
//!
//! Both types encode as `{"real": .., "imag": ..}`; `Complex32` narrows the
//! parts to `f32` when decoded.

use core::fmt;

use crate::impls::NonGenericTypeInfoCell;
use crate::info::{ComplexInfo, ComplexWidth, TypeInfo, TypePath, Typed, default_zero};
use crate::ops::Complex;
use crate::reflection::impl_reflect_cast_fn;
use crate::Reflect;

macro_rules! define_complex {
    ($name:ident, $float:ty, $width:ident) => {
        #[doc = concat!("A complex number with `", stringify!($float), "` parts.")]
        #[derive(Debug, Clone, Copy, PartialEq, Default)]
        pub struct $name {
            pub re: $float,
            pub im: $float,
        }

        impl $name {
            #[inline]
            pub const fn new(re: $float, im: $float) -> Self {
                Self { re, im }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "({}{:+}i)", self.re, self.im)
            }
        }

        impl TypePath for $name {
            #[inline]
            fn type_path() -> &'static str {
                concat!("shade_reflect::num::", stringify!($name))
            }

            #[inline]
            fn type_name() -> &'static str {
                stringify!($name)
            }

            #[inline]
            fn type_ident() -> &'static str {
                stringify!($name)
            }

            #[inline]
            fn module_path() -> Option<&'static str> {
                Some("shade_reflect::num")
            }
        }

        impl Typed for $name {
            fn type_info() -> &'static TypeInfo {
                static CELL: NonGenericTypeInfoCell = NonGenericTypeInfoCell::new();
                CELL.get_or_init(|| {
                    TypeInfo::Complex(ComplexInfo::new::<Self>(
                        ComplexWidth::$width,
                        default_zero::<Self>,
                    ))
                })
            }
        }

        impl Reflect for $name {
            impl_reflect_cast_fn!(Complex);

            fn reflect_debug(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                fmt::Display::fmt(self, f)
            }
        }

        impl Complex for $name {
            #[inline]
            fn parts(&self) -> (f64, f64) {
                (f64::from(self.re), f64::from(self.im))
            }

            #[inline]
            fn set_parts(&mut self, real: f64, imag: f64) {
                self.re = real as $float;
                self.im = imag as $float;
            }
        }
    };
}

define_complex!(Complex32, f32, F32);
define_complex!(Complex64, f64, F64);

#[cfg(test)]
mod tests {
    use super::{Complex32, Complex64};
    use crate::Reflect;
    use crate::info::{ComplexWidth, Typed};
    use crate::ops::ReflectMut;

    #[test]
    fn narrowing() {
        let mut value = Complex32::default();
        let ReflectMut::Complex(complex) = value.reflect_mut() else {
            panic!("expected a complex value");
        };
        complex.set_parts(1.5, -2.25);
        assert_eq!(value, Complex32::new(1.5, -2.25));
        assert_eq!(format!("{value}"), "(1.5-2.25i)");
    }

    #[test]
    fn widths() {
        let info = Complex64::type_info().as_complex().unwrap();
        assert_eq!(info.width(), ComplexWidth::F64);
        let info = Complex32::type_info().as_complex().unwrap();
        assert_eq!(info.width(), ComplexWidth::F32);
    }
}
