//! Structural JSON for reflected values.
//!
//! Any type implementing [`Reflect`] can be encoded, private fields
//! included. The output keeps what plain JSON loses:
//!
//! - shared pointers become `{"pointer": id, "value": ...}` boxes, and a
//!   [`Decoder`] fed the same documents restores the sharing;
//! - interface slots (`Option<Box<dyn Reflect>>`) record the concrete type
//!   next to the payload, resolved again through a
//!   [`TypeResolver`](shade_reflect::resolver::TypeResolver);
//! - complex numbers become `{"real": .., "imag": ..}`.
//!
//! Every document is wrapped in a `{"value": ...}` envelope.
//!
//! ```
//! use shade_reflect::derive::Reflect;
//!
//! #[derive(Reflect, Debug, PartialEq)]
//! struct Point {
//!     x: i32,
//!     #[reflect(tag(json = "Y"))]
//!     y: i32,
//! }
//!
//! let text = shade_json::to_string(&Point { x: 1, y: 2 }).unwrap();
//! assert_eq!(text, r#"{"value":{"x":1,"Y":2}}"#);
//!
//! let point: Point = shade_json::from_str(&text).unwrap();
//! assert_eq!(point, Point { x: 1, y: 2 });
//! ```

extern crate alloc;

// -----------------------------------------------------------------------------
// Modules

mod boxes;
mod decoder;
mod encoder;
mod error;
mod options;

pub mod wire;

// -----------------------------------------------------------------------------
// Exports

pub use decoder::Decoder;
pub use encoder::Encoder;
pub use error::{Error, ErrorKind, PathSegment};
pub use options::EncoderOptions;

use alloc::string::String;

use shade_reflect::Reflect;
use shade_reflect::info::Typed;

/// Encodes `value` with a fresh [`Encoder`] and compact output.
#[inline]
pub fn to_string(value: &dyn Reflect) -> Result<String, Error> {
    Encoder::new().encode(value)
}

/// Encodes `value` with a fresh [`Encoder`] and the given layout.
#[inline]
pub fn to_string_with(value: &dyn Reflect, options: EncoderOptions) -> Result<String, Error> {
    Encoder::with_options(options).encode(value)
}

/// Decodes a `T` with a fresh [`Decoder`] that has no type resolver.
#[inline]
pub fn from_str<T: Reflect + Typed>(text: &str) -> Result<T, Error> {
    Decoder::new().decode(text)
}
