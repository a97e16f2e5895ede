//! Runtime type descriptions for the `shade` serialization engine.
//!
//! A type takes part in encoding by implementing [`Reflect`], usually through
//! [`#[derive(Reflect)]`](derive::Reflect). The derive exposes the ordered
//! field list (including private fields), their raw tags and a zero
//! constructor, so a codec never needs to bypass visibility itself.
//!
//! - [`info`]: static descriptions, [`TypeInfo`](info::TypeInfo) and friends.
//! - [`ops`]: per-kind views (`Struct`, `List`, `Map`, `Pointer`, ...).
//! - [`impls`]: built-in implementations and helper cells.
//! - [`num`]: complex number types.
//! - [`registry`]: [`TypeRegistry`](registry::TypeRegistry), a table of known types.
//! - [`resolver`]: the [`TypeResolver`](resolver::TypeResolver) contract.

// -----------------------------------------------------------------------------
// Extern Self

// The derive emits `::shade_reflect::...` paths, this alias makes them valid
// inside the crate's own tests.
extern crate self as shade_reflect;

extern crate alloc;

// -----------------------------------------------------------------------------
// Modules

mod reflection;

pub mod impls;
pub mod info;
pub mod num;
pub mod ops;
pub mod registry;
pub mod resolver;

// -----------------------------------------------------------------------------
// Top-Level exports

pub mod __macro_exports;

pub use reflection::Reflect;
pub use shade_reflect_derive as derive;
