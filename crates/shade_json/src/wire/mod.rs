//! The wire side of the engine.
//!
//! - [`wire_type_for`]: derives and caches the [`WireType`] of a runtime type.
//! - [`map_field`]: resolves a struct field's wire name from its tags.
//! - [`WireValue`]: the in-memory document, printed once at the end.

// -----------------------------------------------------------------------------
// Modules

mod field_mapper;
mod mirror;
mod value;
mod wire_type;

pub(crate) mod printer;

// -----------------------------------------------------------------------------
// Exports

pub use field_mapper::{FieldMapping, GENERIC_TAG, OVERRIDE_TAG, map_field};
pub use mirror::wire_type_for;
pub use value::{Number, WireValue};
pub use wire_type::{WireField, WireType};
