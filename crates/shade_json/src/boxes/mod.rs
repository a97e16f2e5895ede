//! Wire nodes for constructs JSON has no shape for.
//!
//! - [`PointerBox`]: `{"pointer": id, "value": payload}`.
//! - [`InterfaceBox`]: a type descriptor next to the payload.
//! - [`ComplexBox`]: `{"real": re, "imag": im}`.
//!
//! Boxes only know their own shape; the pointer table and type resolution
//! live in the encoder and decoder.

mod complex_box;
mod interface_box;
mod pointer_box;

pub(crate) use complex_box::ComplexBox;
pub(crate) use interface_box::InterfaceBox;
pub(crate) use pointer_box::PointerBox;

use alloc::string::String;

use crate::error::ErrorKind;
use crate::wire::{Number, WireValue};

fn expect_object<'a>(
    wire: &'a WireValue,
    expected: &'static str,
) -> Result<&'a [(String, WireValue)], ErrorKind> {
    match wire {
        WireValue::Object(entries) => Ok(entries),
        other => Err(ErrorKind::mismatch(expected, other.kind_name())),
    }
}

fn read_count(wire: &WireValue, field: &str) -> Result<u64, ErrorKind> {
    match wire {
        WireValue::Number(Number::Int(v)) => {
            u64::try_from(*v).map_err(|_| ErrorKind::malformed(format_args!("negative `{field}`")))
        }
        WireValue::Number(Number::Uint(v)) => Ok(*v),
        other => Err(ErrorKind::malformed(format_args!(
            "`{field}` must be an integer, found {}",
            other.kind_name()
        ))),
    }
}
