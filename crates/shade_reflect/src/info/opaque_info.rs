use alloc::boxed::Box;
use core::fmt;

use serde_core::de::{DeserializeOwned, Error as _};
use serde_core::ser::Error as _;
use serde_core::{Deserializer, Serializer};

use crate::Reflect;
use crate::info::{DynamicTypePath, Type, TypePath, ZeroFn, impl_type_fn, no_zero};

// -----------------------------------------------------------------------------
// CustomCodec

/// A type-erased serde codec for one type.
///
/// Types carrying a codec bypass structural mirroring: their payload is
/// whatever their `Serialize`/`Deserialize` impls produce.
#[derive(Clone, Copy)]
pub struct CustomCodec {
    type_path: fn() -> &'static str,
    serialize: fn(&dyn Reflect) -> Option<&dyn erased_serde::Serialize>,
    deserialize: fn(
        &mut dyn erased_serde::Deserializer,
    ) -> Result<Box<dyn Reflect>, erased_serde::Error>,
}

impl CustomCodec {
    pub fn of<T>() -> Self
    where
        T: Reflect + TypePath + serde_core::Serialize + DeserializeOwned,
    {
        Self {
            type_path: T::type_path,
            serialize: |value| {
                value
                    .downcast_ref::<T>()
                    .map(|val| val as &dyn erased_serde::Serialize)
            },
            deserialize: |deserializer| {
                Ok(Box::new(erased_serde::deserialize::<T>(deserializer)?))
            },
        }
    }

    /// Serializes `value`, which must be of the codec's type.
    pub fn serialize<S: Serializer>(
        &self,
        value: &dyn Reflect,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match (self.serialize)(value) {
            Some(erased) => erased_serde::serialize(erased, serializer),
            None => Err(S::Error::custom(format_args!(
                "codec for `{}` received a `{}`",
                (self.type_path)(),
                value.reflect_type_path(),
            ))),
        }
    }

    /// Deserializes a fresh value of the codec's type.
    pub fn deserialize<'de, D: Deserializer<'de>>(
        &self,
        deserializer: D,
    ) -> Result<Box<dyn Reflect>, D::Error> {
        let mut erased = <dyn erased_serde::Deserializer>::erase(deserializer);
        (self.deserialize)(&mut erased).map_err(D::Error::custom)
    }
}

impl fmt::Debug for CustomCodec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("CustomCodec")
            .field(&(self.type_path)())
            .finish()
    }
}

// -----------------------------------------------------------------------------
// OpaqueInfo

/// Type info for types without visible structure.
///
/// Opaque types are unsupported by structural codecs unless they carry a
/// [`CustomCodec`].
#[derive(Debug, Clone)]
pub struct OpaqueInfo {
    ty: Type,
    codec: Option<CustomCodec>,
    zero: ZeroFn,
}

impl OpaqueInfo {
    impl_type_fn!(ty);

    #[inline]
    pub const fn new<T: Reflect + TypePath + ?Sized>() -> Self {
        Self {
            ty: Type::of::<T>(),
            codec: None,
            zero: no_zero,
        }
    }

    #[inline]
    pub fn with_codec(mut self, codec: CustomCodec) -> Self {
        self.codec = Some(codec);
        self
    }

    #[inline]
    pub fn with_zero(mut self, zero: ZeroFn) -> Self {
        self.zero = zero;
        self
    }

    #[inline]
    pub const fn codec(&self) -> Option<&CustomCodec> {
        self.codec.as_ref()
    }

    #[inline]
    pub(crate) const fn zero_fn(&self) -> ZeroFn {
        self.zero
    }
}
