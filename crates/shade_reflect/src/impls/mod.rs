//! Built-in implementations and helpers for writing new ones.
//!
//! - [`concat`]: joins string pieces, used to build generic type paths.
//! - [`NonGenericTypeInfoCell`]: storage for `Typed` on non-generic types.
//! - [`GenericTypePathCell`] / [`GenericTypeInfoCell`]: the same for generic types.
//! - [`zero_of`]: the zero value of a type as a concrete value.
//!
//! ## Implemented Menu
//!
//! - primitives: `bool`, `i8`-`i64`, `u8`-`u64`, `isize`, `usize`, `f32`, `f64`, `char`, `String`
//! - lists: `Vec<T>`, `Option<Vec<T>>`
//! - arrays: `[T; N]`
//! - maps: `HashMap<K, V>`, `BTreeMap<K, V>` and their `Option` forms
//! - pointers: `Rc<T>`, `Arc<T>`, `Option<Rc<T>>`, `Option<Arc<T>>`,
//!   `OnceCell<Rc<T>>`, `OnceLock<Arc<T>>`
//! - interface: `Option<Box<dyn Reflect>>`
//! - opaque: function pointers, raw pointers, `mpsc::Sender<T>`, `mpsc::Receiver<T>`
//! - custom-coded: `core::time::Duration`

// -----------------------------------------------------------------------------
// Modules

mod array;
mod cell;
mod interface;
mod list;
mod map;
mod opaque;
mod pointer;
mod primitive;
mod type_path;

// -----------------------------------------------------------------------------
// Exports

use alloc::string::String;

use crate::Reflect;
use crate::info::Typed;

pub use cell::{GenericTypeInfoCell, GenericTypePathCell, NonGenericTypeInfoCell};

pub(crate) use primitive::builtin as builtin_primitive;

/// Concatenates `arr` into one `String` with a single allocation.
#[inline(never)]
pub fn concat(arr: &[&str]) -> String {
    let len = arr.iter().map(|item| item.len()).sum();
    let mut res = String::with_capacity(len);
    for &item in arr {
        res.push_str(item);
    }
    res
}

/// Returns the zero value of `T`, see [`TypeInfo::zero`](crate::info::TypeInfo::zero).
#[inline]
pub fn zero_of<T: Reflect + Typed>() -> Option<T> {
    T::type_info().zero()?.take::<T>().ok()
}
