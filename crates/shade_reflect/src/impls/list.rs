use alloc::boxed::Box;
use alloc::vec::Vec;

use crate::Reflect;
use crate::impls::GenericTypeInfoCell;
use crate::info::{ListInfo, TypeInfo, Typed};
use crate::ops::List;
use crate::reflection::impl_reflect_cast_fn;

// -----------------------------------------------------------------------------
// Vec<T>

impl<T: Reflect + Typed> Typed for Vec<T> {
    fn type_info() -> &'static TypeInfo {
        static CELL: GenericTypeInfoCell = GenericTypeInfoCell::new();
        CELL.get_or_insert::<Self>(|| TypeInfo::List(ListInfo::new::<Self, T>(false)))
    }
}

impl<T: Reflect + Typed> Reflect for Vec<T> {
    impl_reflect_cast_fn!(List);
}

impl<T: Reflect + Typed> List for Vec<T> {
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
        Vec::len(self)
    }

    fn push(&mut self, value: Box<dyn Reflect>) -> Result<(), Box<dyn Reflect>> {
        Vec::push(self, value.take::<T>()?);
        Ok(())
    }

    #[inline]
    fn clear(&mut self) {
        Vec::clear(self);
    }
}

// -----------------------------------------------------------------------------
// Option<Vec<T>>

impl<T: Reflect + Typed> Typed for Option<Vec<T>> {
    fn type_info() -> &'static TypeInfo {
        static CELL: GenericTypeInfoCell = GenericTypeInfoCell::new();
        CELL.get_or_insert::<Self>(|| TypeInfo::List(ListInfo::new::<Self, T>(true)))
    }
}

impl<T: Reflect + Typed> Reflect for Option<Vec<T>> {
    impl_reflect_cast_fn!(List);
}

impl<T: Reflect + Typed> List for Option<Vec<T>> {
    #[inline]
    fn get(&self, index: usize) -> Option<&dyn Reflect> {
        List::get(self.as_ref()?, index)
    }

    #[inline]
    fn get_mut(&mut self, index: usize) -> Option<&mut dyn Reflect> {
        List::get_mut(self.as_mut()?, index)
    }

    #[inline]
    fn len(&self) -> usize {
        self.as_ref().map_or(0, Vec::len)
    }

    fn push(&mut self, value: Box<dyn Reflect>) -> Result<(), Box<dyn Reflect>> {
        List::push(self.get_or_insert_with(Vec::new), value)
    }

    fn clear(&mut self) {
        self.get_or_insert_with(Vec::new).clear();
    }

    #[inline]
    fn is_nil(&self) -> bool {
        self.is_none()
    }

    #[inline]
    fn set_nil(&mut self) -> bool {
        *self = None;
        true
    }
}

#[cfg(test)]
mod tests {
    use alloc::boxed::Box;
    use alloc::vec::Vec;

    use crate::Reflect;
    use crate::ops::List;

    #[test]
    fn push_checks_item_type() {
        let mut list: Vec<i32> = Vec::new();
        let dyn_list: &mut dyn List = &mut list;
        assert!(dyn_list.push(Box::new(3_i32)).is_ok());
        assert!(dyn_list.push(Box::new(3_u32)).is_err());
        assert_eq!(dyn_list.len(), 1);
        assert_eq!(list, [3]);
    }

    #[test]
    fn nullable_list() {
        let mut list: Option<Vec<u8>> = None;
        assert!(List::is_nil(&list));

        List::clear(&mut list);
        assert_eq!(list, Some(Vec::new()));
        assert!(!List::is_nil(&list));

        List::push(&mut list, 9_u8.into_boxed_reflect()).unwrap();
        assert_eq!(List::get(&list, 0).and_then(|v| v.downcast_ref::<u8>()), Some(&9));

        assert!(List::set_nil(&mut list));
        assert_eq!(list, None);

        let mut plain = alloc::vec![1_u8];
        assert!(!List::set_nil(&mut plain));
        assert!(plain.is_empty());
    }
}
