use alloc::boxed::Box;
use alloc::string::ToString;
use alloc::vec::Vec;

use crate::Reflect;
use crate::impls::{GenericTypeInfoCell, GenericTypePathCell, concat, zero_of};
use crate::info::{ArrayInfo, TypeInfo, TypePath, Typed};
use crate::ops::Array;
use crate::reflection::impl_reflect_cast_fn;

impl<T: TypePath, const N: usize> TypePath for [T; N] {
    fn type_path() -> &'static str {
        static CELL: GenericTypePathCell = GenericTypePathCell::new();
        CELL.get_or_insert::<Self>(|| concat(&["[", T::type_path(), "; ", &N.to_string(), "]"]))
    }

    fn type_name() -> &'static str {
        static CELL: GenericTypePathCell = GenericTypePathCell::new();
        CELL.get_or_insert::<Self>(|| concat(&["[", T::type_name(), "; ", &N.to_string(), "]"]))
    }

    fn type_ident() -> &'static str {
        Self::type_name()
    }
}

// Items are built one by one, so `T` needs a zero value but not `Default`.
fn array_zero<T: Reflect + Typed, const N: usize>() -> Option<Box<dyn Reflect>> {
    let items = (0..N).map(|_| zero_of::<T>()).collect::<Option<Vec<T>>>()?;
    let array: [T; N] = items.try_into().ok()?;
    Some(Box::new(array))
}

impl<T: Reflect + Typed, const N: usize> Typed for [T; N] {
    fn type_info() -> &'static TypeInfo {
        static CELL: GenericTypeInfoCell = GenericTypeInfoCell::new();
        CELL.get_or_insert::<Self>(|| {
            TypeInfo::Array(ArrayInfo::new::<Self, T>(N, array_zero::<T, N>))
        })
    }
}

impl<T: Reflect + Typed, const N: usize> Reflect for [T; N] {
    impl_reflect_cast_fn!(Array);
}

impl<T: Reflect + Typed, const N: usize> Array for [T; N] {
    #[inline]
    fn get(&self, index: usize) -> Option<&dyn Reflect> {
        <[T]>::get(self, index).map(Reflect::as_reflect)
    }

    #[inline]
    fn get_mut(&mut self, index: usize) -> Option<&mut dyn Reflect> {
        <[T]>::get_mut(self, index).map(Reflect::as_reflect_mut)
    }

    #[inline]
    fn len(&self) -> usize {
        N
    }
}

#[cfg(test)]
mod tests {
    use alloc::rc::Rc;
    use alloc::string::String;

    use crate::info::{TypePath, Typed};

    #[test]
    fn array_paths() {
        assert_eq!(<[u8; 4]>::type_path(), "[u8; 4]");
        assert_eq!(<[String; 2]>::type_path(), "[alloc::string::String; 2]");
        assert_eq!(<[String; 2]>::type_name(), "[String; 2]");
    }

    #[test]
    fn array_zero_without_default() {
        let zero = <[Rc<i32>; 2]>::type_info().zero().unwrap();
        let zero = zero.take::<[Rc<i32>; 2]>().unwrap();
        assert_eq!(*zero[0], 0);
        assert!(!Rc::ptr_eq(&zero[0], &zero[1]));
    }
}
