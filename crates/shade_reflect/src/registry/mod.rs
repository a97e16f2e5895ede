//! A table of known types, queried by `TypeId`, full path or short name.
//!
//! - [`TypeMeta`]: a registered type and its [`TypeInfo`](crate::info::TypeInfo).
//! - [`TypeRegistry`]: the container. Registering a type also registers every
//!   type reachable from it (fields, items, keys, values and pointees), and
//!   remembers which pointer type wraps each pointee.

// -----------------------------------------------------------------------------
// Modules

mod type_meta;
mod type_registry;

// -----------------------------------------------------------------------------
// Exports

pub use type_meta::TypeMeta;
pub use type_registry::TypeRegistry;
