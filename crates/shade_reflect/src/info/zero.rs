use alloc::boxed::Box;

use crate::Reflect;

/// Builds the zero value of a type, `None` if the type has no zero value.
///
/// The zero value is where decoding starts: fields are overwritten one by
/// one, so any value that the decoder can fully overwrite is acceptable.
pub type ZeroFn = fn() -> Option<Box<dyn Reflect>>;

/// A [`ZeroFn`] backed by [`Default`].
#[inline]
pub fn default_zero<T: Reflect + Default>() -> Option<Box<dyn Reflect>> {
    Some(Box::new(T::default()))
}

/// A [`ZeroFn`] for types that cannot be built from nothing.
#[inline]
pub fn no_zero() -> Option<Box<dyn Reflect>> {
    None
}
