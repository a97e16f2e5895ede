//! The final print of a [`WireValue`] tree.
//!
//! `serde_json` does the escaping, [`Layout`] decides where whitespace goes
//! and how floats are spelled.

use alloc::string::{String, ToString};
use alloc::vec::Vec;
use std::io;

use serde::Serialize;
use serde_json::ser::Formatter;

use crate::error::{Error, ErrorKind};
use crate::options::EncoderOptions;
use crate::wire::WireValue;

// -----------------------------------------------------------------------------
// Floats

/// Spells a float the way the text layer has always done: shortest
/// round-trip digits, no trailing `.0`, and exponent form outside
/// `[1e-6, 1e21)`.
pub fn format_f64(value: f64) -> String {
    let abs = value.abs();
    if abs != 0.0 && !(1e-6..1e21).contains(&abs) {
        with_signed_exponent(format!("{value:e}"))
    } else {
        value.to_string()
    }
}

/// [`format_f64`] at `f32` precision.
pub fn format_f32(value: f32) -> String {
    let abs = value.abs();
    if abs != 0.0 && !(1e-6..1e21).contains(&abs) {
        with_signed_exponent(format!("{value:e}"))
    } else {
        value.to_string()
    }
}

fn with_signed_exponent(text: String) -> String {
    match text.split_once('e') {
        Some((mantissa, exp)) if !exp.starts_with('-') => format!("{mantissa}e+{exp}"),
        _ => text,
    }
}

// -----------------------------------------------------------------------------
// Layout

/// A `serde_json` formatter for compact or prefix/indent output.
struct Layout<'a> {
    prefix: &'a [u8],
    indent: &'a [u8],
    pretty: bool,
    depth: usize,
    has_value: bool,
}

impl<'a> Layout<'a> {
    fn new(options: &'a EncoderOptions) -> Self {
        Self {
            prefix: options.prefix().as_bytes(),
            indent: options.indent().as_bytes(),
            pretty: !options.is_compact(),
            depth: 0,
            has_value: false,
        }
    }

    fn newline<W: ?Sized + io::Write>(&self, writer: &mut W) -> io::Result<()> {
        writer.write_all(b"\n")?;
        writer.write_all(self.prefix)?;
        for _ in 0..self.depth {
            writer.write_all(self.indent)?;
        }
        Ok(())
    }

    fn open<W: ?Sized + io::Write>(&mut self, writer: &mut W, token: &[u8]) -> io::Result<()> {
        if self.pretty {
            self.depth += 1;
            self.has_value = false;
        }
        writer.write_all(token)
    }

    fn close<W: ?Sized + io::Write>(&mut self, writer: &mut W, token: &[u8]) -> io::Result<()> {
        if self.pretty {
            self.depth -= 1;
            if self.has_value {
                self.newline(writer)?;
            }
        }
        writer.write_all(token)
    }

    fn item<W: ?Sized + io::Write>(&mut self, writer: &mut W, first: bool) -> io::Result<()> {
        if !first {
            writer.write_all(b",")?;
        }
        if self.pretty {
            self.newline(writer)?;
        }
        Ok(())
    }
}

impl Formatter for Layout<'_> {
    #[inline]
    fn write_f32<W: ?Sized + io::Write>(&mut self, writer: &mut W, value: f32) -> io::Result<()> {
        writer.write_all(format_f32(value).as_bytes())
    }

    #[inline]
    fn write_f64<W: ?Sized + io::Write>(&mut self, writer: &mut W, value: f64) -> io::Result<()> {
        writer.write_all(format_f64(value).as_bytes())
    }

    #[inline]
    fn begin_array<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.open(writer, b"[")
    }

    #[inline]
    fn end_array<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.close(writer, b"]")
    }

    #[inline]
    fn begin_array_value<W: ?Sized + io::Write>(
        &mut self,
        writer: &mut W,
        first: bool,
    ) -> io::Result<()> {
        self.item(writer, first)
    }

    #[inline]
    fn end_array_value<W: ?Sized + io::Write>(&mut self, _writer: &mut W) -> io::Result<()> {
        self.has_value = true;
        Ok(())
    }

    #[inline]
    fn begin_object<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.open(writer, b"{")
    }

    #[inline]
    fn end_object<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.close(writer, b"}")
    }

    #[inline]
    fn begin_object_key<W: ?Sized + io::Write>(
        &mut self,
        writer: &mut W,
        first: bool,
    ) -> io::Result<()> {
        self.item(writer, first)
    }

    #[inline]
    fn begin_object_value<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        writer.write_all(if self.pretty { b": " } else { b":" })
    }

    #[inline]
    fn end_object_value<W: ?Sized + io::Write>(&mut self, _writer: &mut W) -> io::Result<()> {
        self.has_value = true;
        Ok(())
    }
}

// -----------------------------------------------------------------------------
// Render

/// Prints `value` with the layout chosen by `options`.
pub fn render(value: &WireValue, options: &EncoderOptions) -> Result<String, Error> {
    let mut out = Vec::with_capacity(128);
    let mut serializer = serde_json::Serializer::with_formatter(&mut out, Layout::new(options));
    value.serialize(&mut serializer)?;
    String::from_utf8(out).map_err(|err| ErrorKind::malformed(err).into())
}

/// Prints `value` on a single line.
#[inline]
pub fn render_compact(value: &WireValue) -> Result<String, Error> {
    render(value, &EncoderOptions::new())
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use alloc::vec;

    use super::{format_f32, format_f64, render, render_compact};
    use crate::options::EncoderOptions;
    use crate::wire::{Number, WireValue};

    fn sample() -> WireValue {
        WireValue::object([
            ("a", WireValue::Number(Number::Int(1))),
            ("b", WireValue::Array(vec![])),
            (
                "c",
                WireValue::Array(vec![WireValue::Bool(true), WireValue::Null]),
            ),
        ])
    }

    #[test]
    fn floats() {
        assert_eq!(format_f64(1.0), "1");
        assert_eq!(format_f64(-0.5), "-0.5");
        assert_eq!(format_f64(1e21), "1e+21");
        assert_eq!(format_f64(1e20), "100000000000000000000");
        assert_eq!(format_f64(1.5e-7), "1.5e-7");
        assert_eq!(format_f64(0.0), "0");
        assert_eq!(format_f32(3.14), "3.14");
        assert_eq!(format_f32(2.5e25), "2.5e+25");
    }

    #[test]
    fn compact() {
        assert_eq!(
            render_compact(&sample()).unwrap(),
            r#"{"a":1,"b":[],"c":[true,null]}"#
        );
    }

    #[test]
    fn prefix_and_indent() {
        let options = EncoderOptions::new().with_prefix("//").with_indent("\t");
        assert_eq!(
            render(&sample(), &options).unwrap(),
            "{\n//\t\"a\": 1,\n//\t\"b\": [],\n//\t\"c\": [\n//\t\ttrue,\n//\t\tnull\n//\t]\n//}"
        );
    }

    #[test]
    fn prefix_only_still_breaks_lines() {
        let options = EncoderOptions::new().with_prefix("> ");
        let value = WireValue::object([("a", WireValue::Number(Number::F64(2.5)))]);
        assert_eq!(render(&value, &options).unwrap(), "{\n> \"a\": 2.5\n> }");
    }
}
