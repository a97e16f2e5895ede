//! Mapping recorded type descriptors back to types.
//!
//! A value stored behind an interface (`Option<Box<dyn Reflect>>`) is written
//! with a [`TypeDescriptor`] naming its concrete type. Reading it back needs a
//! [`TypeResolver`] that maps the descriptor to a [`TypeInfo`].
//!
//! - [`StaticResolver`]: answers from an explicit [`TypeRegistry`](crate::registry::TypeRegistry).
//! - [`ChainResolver`]: tries several resolvers in order.
//! - [`builtin`] and [`builtin_pointer_to`]: primitives and complex numbers,
//!   known without any resolver.

// -----------------------------------------------------------------------------
// Modules

mod chain_resolver;
mod descriptor;
mod static_resolver;

// -----------------------------------------------------------------------------
// Exports

use alloc::boxed::Box;
use alloc::string::{String, ToString};

use thiserror::Error;

use crate::info::TypeInfo;

pub use chain_resolver::ChainResolver;
pub use descriptor::TypeDescriptor;
pub use static_resolver::StaticResolver;

/// No type matches a descriptor.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("could not find type for pkgPath: {namespace}, typeName: {name}, typeString: {fallback}")]
pub struct ResolveError {
    pub namespace: String,
    pub name: String,
    pub fallback: String,
}

impl ResolveError {
    pub fn new(namespace: &str, name: &str, fallback: &str) -> Self {
        Self {
            namespace: namespace.to_string(),
            name: name.to_string(),
            fallback: fallback.to_string(),
        }
    }
}

// -----------------------------------------------------------------------------
// TypeResolver

/// Maps a recorded descriptor back to a type.
///
/// The arguments are the fields of a [`TypeDescriptor`]: `namespace` and
/// `name` for plain named types (`name` alone for primitives), `fallback`
/// holding the full type path when both are empty.
pub trait TypeResolver {
    fn resolve(
        &self,
        namespace: &str,
        name: &str,
        fallback: &str,
    ) -> Result<&'static TypeInfo, ResolveError>;

    /// Returns the pointer type whose pointee is `pointee`.
    ///
    /// Used to re-apply the pointer layers recorded with an interface value.
    fn pointer_to(&self, pointee: &'static TypeInfo) -> Option<&'static TypeInfo> {
        let _ = pointee;
        None
    }
}

impl<R: TypeResolver + ?Sized> TypeResolver for &R {
    #[inline]
    fn resolve(
        &self,
        namespace: &str,
        name: &str,
        fallback: &str,
    ) -> Result<&'static TypeInfo, ResolveError> {
        (**self).resolve(namespace, name, fallback)
    }

    #[inline]
    fn pointer_to(&self, pointee: &'static TypeInfo) -> Option<&'static TypeInfo> {
        (**self).pointer_to(pointee)
    }
}

impl<R: TypeResolver + ?Sized> TypeResolver for Box<R> {
    #[inline]
    fn resolve(
        &self,
        namespace: &str,
        name: &str,
        fallback: &str,
    ) -> Result<&'static TypeInfo, ResolveError> {
        (**self).resolve(namespace, name, fallback)
    }

    #[inline]
    fn pointer_to(&self, pointee: &'static TypeInfo) -> Option<&'static TypeInfo> {
        (**self).pointer_to(pointee)
    }
}

/// Resolves the built-in primitives (`bool`, `i64`, `String`, ...) and the
/// complex numbers of [`num`](crate::num).
///
/// Primitives are recorded with an empty namespace.
pub fn builtin(namespace: &str, name: &str) -> Option<&'static TypeInfo> {
    use crate::info::Typed;
    use crate::num::{Complex32, Complex64};

    match (namespace, name) {
        ("", name) => crate::impls::builtin_primitive(name),
        ("shade_reflect::num", "Complex64") => Some(Complex64::type_info()),
        ("shade_reflect::num", "Complex32") => Some(Complex32::type_info()),
        _ => None,
    }
}

/// Returns `Rc<T>` for a built-in `T`, the pointer counterpart of [`builtin`].
pub fn builtin_pointer_to(pointee: &'static TypeInfo) -> Option<&'static TypeInfo> {
    use alloc::rc::Rc;

    use crate::info::Typed;
    use crate::num::{Complex32, Complex64};

    macro_rules! rc_of {
        ($($ty:ty),* $(,)?) => {
            $(
                if pointee.type_is::<$ty>() {
                    return Some(<Rc<$ty>>::type_info());
                }
            )*
        };
    }

    rc_of!(
        bool, i8, i16, i32, i64, isize, u8, u16, u32, u64, usize, f32, f64, char, String,
        Complex64, Complex32,
    );
    None
}
