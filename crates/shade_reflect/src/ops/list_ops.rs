use alloc::boxed::Box;

use crate::Reflect;

// -----------------------------------------------------------------------------
// List

/// A growable sequence.
///
/// Nullable lists (`Option<Vec<T>>`) tell an absent list apart from an empty
/// one, see [`List::is_nil`] and [`List::set_nil`]. For the other lists both
/// methods report and accept nothing.
pub trait List: Reflect {
    fn get(&self, index: usize) -> Option<&dyn Reflect>;

    fn get_mut(&mut self, index: usize) -> Option<&mut dyn Reflect>;

    fn len(&self) -> usize;

    /// Appends `value`, returning it back if its type differs from the item
    /// type. Pushing to an absent list makes it present.
    fn push(&mut self, value: Box<dyn Reflect>) -> Result<(), Box<dyn Reflect>>;

    /// Removes all items. An absent list becomes present and empty.
    fn clear(&mut self);

    #[inline]
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns `true` if the list is absent.
    #[inline]
    fn is_nil(&self) -> bool {
        false
    }

    /// Makes the list absent. Returns `false` if the list is not nullable,
    /// in which case it is cleared instead.
    fn set_nil(&mut self) -> bool {
        self.clear();
        false
    }
}

impl dyn List {
    #[inline]
    pub fn iter(&self) -> ListItemIter<'_> {
        ListItemIter::new(self)
    }
}

// -----------------------------------------------------------------------------
// ListItemIter

pub struct ListItemIter<'a> {
    list: &'a dyn List,
    index: usize,
}

impl<'a> ListItemIter<'a> {
    #[inline(always)]
    pub const fn new(list: &'a dyn List) -> Self {
        Self { list, index: 0 }
    }
}

impl<'a> Iterator for ListItemIter<'a> {
    type Item = &'a dyn Reflect;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let value = self.list.get(self.index);
        self.index += value.is_some() as usize;
        value
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let size = self.list.len() - self.index;
        (size, Some(size))
    }
}

impl<'a> ExactSizeIterator for ListItemIter<'a> {}
