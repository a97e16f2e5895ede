use alloc::boxed::Box;
use core::any::{Any, TypeId};
use core::fmt;

use crate::info::{DynamicTypePath, DynamicTyped, ReflectKind};
use crate::ops::{ReflectMut, ReflectRef};

// -----------------------------------------------------------------------------
// Reflect

/// The foundational trait for runtime reflection in [`shade_reflect`].
///
/// A `Reflect` value can report its [`TypeInfo`](crate::info::TypeInfo) and
/// be viewed through one of the kind traits ([`Struct`], [`List`],
/// [`Pointer`], ...) with [`reflect_ref`] and [`reflect_mut`].
///
/// The trait is not `Send + Sync`: `Rc` handles are first-class pointer
/// values.
///
/// # Type Identification
///
/// [`Any::type_id`] on `Box<dyn Reflect>` returns the id of the box. Use
/// [`Reflect::ty_id`] instead:
///
/// ```rust
/// # use shade_reflect::Reflect;
/// # use core::any::{Any, TypeId};
/// let x: Box<dyn Reflect> = 32_i32.into_boxed_reflect();
///
/// assert!(x.type_id() != TypeId::of::<i32>());
/// assert!(x.ty_id() == TypeId::of::<i32>());
/// ```
///
/// # Implementation
///
/// Use [the derive macro](crate::derive::Reflect) for structs. Manual
/// implementations follow this pattern:
///
/// ```rust, ignore
/// fn set(&mut self, value: Box<dyn Reflect>) -> Result<(), Box<dyn Reflect>> {
///     *self = value.take::<Self>()?;
///     Ok(())
/// }
///
/// fn reflect_kind(&self) -> ReflectKind {
///     ReflectKind::Struct
/// }
///
/// fn reflect_ref(&self) -> ReflectRef<'_> {
///     ReflectRef::Struct(self)
/// }
///
/// fn reflect_mut(&mut self) -> ReflectMut<'_> {
///     ReflectMut::Struct(self)
/// }
/// ```
///
/// [`shade_reflect`]: crate
/// [`Struct`]: crate::ops::Struct
/// [`List`]: crate::ops::List
/// [`Pointer`]: crate::ops::Pointer
/// [`reflect_ref`]: Reflect::reflect_ref
/// [`reflect_mut`]: Reflect::reflect_mut
pub trait Reflect: DynamicTypePath + DynamicTyped + Any {
    #[inline(always)]
    fn as_reflect(&self) -> &dyn Reflect
    where
        Self: Sized,
    {
        self
    }

    #[inline(always)]
    fn as_reflect_mut(&mut self) -> &mut dyn Reflect
    where
        Self: Sized,
    {
        self
    }

    #[inline(always)]
    fn into_reflect(self: Box<Self>) -> Box<dyn Reflect>
    where
        Self: Sized,
    {
        self
    }

    #[inline(always)]
    fn into_boxed_reflect(self) -> Box<dyn Reflect>
    where
        Self: Sized,
    {
        Box::new(self)
    }

    /// Returns the `TypeId` of the underlying type.
    #[inline]
    fn ty_id(&self) -> TypeId {
        TypeId::of::<Self>()
    }

    /// Replaces `self` with `value`.
    ///
    /// Returns `value` back if its type differs.
    fn set(&mut self, value: Box<dyn Reflect>) -> Result<(), Box<dyn Reflect>>;

    fn reflect_kind(&self) -> ReflectKind;

    fn reflect_ref(&self) -> ReflectRef<'_>;

    fn reflect_mut(&mut self) -> ReflectMut<'_>;

    fn reflect_debug(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.reflect_ref() {
            ReflectRef::Primitive(_) | ReflectRef::Opaque(_) => {
                write!(f, "{}(..)", self.reflect_type_name())
            }
            ReflectRef::Struct(data) => {
                let mut debug = f.debug_struct(self.reflect_type_ident());
                for index in 0..data.field_len() {
                    if let (Some(name), Some(value)) = (data.name_at(index), data.field_at(index)) {
                        debug.field(name, &value as &dyn fmt::Debug);
                    }
                }
                debug.finish()
            }
            ReflectRef::List(data) => f.debug_list().entries(data.iter()).finish(),
            ReflectRef::Array(data) => f.debug_list().entries(data.iter()).finish(),
            ReflectRef::Map(data) => f.debug_map().entries(data.iter()).finish(),
            ReflectRef::Pointer(data) => match data.pointee() {
                Some(pointee) => write!(f, "&{pointee:?}"),
                None => f.write_str("null"),
            },
            ReflectRef::Interface(data) => match data.value() {
                Some(value) => value.reflect_debug(f),
                None => f.write_str("None"),
            },
            ReflectRef::Complex(data) => {
                let (re, im) = data.parts();
                write!(f, "({re}{im:+}i)")
            }
        }
    }
}

impl dyn Reflect {
    #[inline(always)]
    pub fn is<T: Any>(&self) -> bool {
        self.ty_id() == TypeId::of::<T>()
    }

    #[inline]
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        <dyn Any>::downcast_ref(self)
    }

    #[inline]
    pub fn downcast_mut<T: Any>(&mut self) -> Option<&mut T> {
        <dyn Any>::downcast_mut(self)
    }

    #[inline]
    pub fn downcast<T: Any>(self: Box<dyn Reflect>) -> Result<Box<T>, Box<dyn Reflect>> {
        if self.is::<T>() {
            #[expect(unsafe_code, reason = "type is already checked")]
            Ok(unsafe { <Box<dyn Any>>::downcast::<T>(self).unwrap_unchecked() })
        } else {
            Err(self)
        }
    }

    #[inline]
    pub fn take<T: Any>(self: Box<dyn Reflect>) -> Result<T, Box<dyn Reflect>> {
        self.downcast::<T>().map(|value| *value)
    }
}

impl fmt::Debug for dyn Reflect {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.reflect_debug(f)
    }
}

// -----------------------------------------------------------------------------
// Auxiliary macro

macro_rules! impl_reflect_cast_fn {
    ($kind:ident) => {
        fn set(
            &mut self,
            value: ::alloc::boxed::Box<dyn $crate::Reflect>,
        ) -> Result<(), ::alloc::boxed::Box<dyn $crate::Reflect>> {
            *self = value.take::<Self>()?;
            Ok(())
        }

        #[inline]
        fn reflect_kind(&self) -> $crate::info::ReflectKind {
            $crate::info::ReflectKind::$kind
        }

        #[inline]
        fn reflect_ref(&self) -> $crate::ops::ReflectRef<'_> {
            $crate::ops::ReflectRef::$kind(self)
        }

        #[inline]
        fn reflect_mut(&mut self) -> $crate::ops::ReflectMut<'_> {
            $crate::ops::ReflectMut::$kind(self)
        }
    };
}

pub(crate) use impl_reflect_cast_fn;

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use alloc::boxed::Box;
    use alloc::string::String;
    use core::any::TypeId;

    use crate::Reflect;

    #[test]
    fn downcast_and_take() {
        let value: Box<dyn Reflect> = String::from("hello").into_boxed_reflect();
        assert!(value.is::<String>());
        assert_eq!(value.ty_id(), TypeId::of::<String>());
        assert_eq!(value.downcast_ref::<String>().map(String::as_str), Some("hello"));

        let value = value.take::<i32>().unwrap_err();
        assert_eq!(value.take::<String>().unwrap(), "hello");
    }

    #[test]
    fn set_checks_type() {
        let mut target = 1_u8;
        assert!(target.set(Box::new(7_u8)).is_ok());
        assert_eq!(target, 7);

        let rejected = target.set(Box::new(7_i8)).unwrap_err();
        assert!(rejected.is::<i8>());
        assert_eq!(target, 7);
    }

    #[test]
    fn debug_output() {
        let list = alloc::vec![1_i32, 2];
        let rendered = format!("{:?}", list.as_reflect());
        assert_eq!(rendered, "[1, 2]");
    }
}
