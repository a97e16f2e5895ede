//! Kind-specific views of reflected values.
//!
//! Each trait is a subtrait of [`Reflect`] and is reached through
//! [`Reflect::reflect_ref`] or [`Reflect::reflect_mut`].
//!
//! - [`Struct`]: named fields in declaration order.
//! - [`List`]: growable sequences, optionally nullable.
//! - [`Array`]: fixed-size sequences.
//! - [`Map`]: key-value maps, optionally nullable.
//! - [`Pointer`]: shared handles with observable identity.
//! - [`Interface`]: a slot holding any reflected value.
//! - [`Complex`]: complex numbers.
//!
//! [`Reflect`]: crate::Reflect
//! [`Reflect::reflect_ref`]: crate::Reflect::reflect_ref
//! [`Reflect::reflect_mut`]: crate::Reflect::reflect_mut

// -----------------------------------------------------------------------------
// Modules

mod array_ops;
mod complex_ops;
mod interface_ops;
mod kind;
mod list_ops;
mod map_ops;
mod pointer_ops;
mod struct_ops;

// -----------------------------------------------------------------------------
// Exports

pub use kind::{ReflectMut, ReflectRef};

pub use array_ops::{Array, ArrayItemIter};
pub use complex_ops::Complex;
pub use interface_ops::Interface;
pub use list_ops::{List, ListItemIter};
pub use map_ops::{Map, MapIter};
pub use pointer_ops::{Pointer, PointerError};
pub use struct_ops::{Struct, StructFieldIter};
