//! Items used by code generated from `shade_reflect_derive`. Not public API.

pub use alloc::boxed::Box;
pub use alloc::string::ToString;
