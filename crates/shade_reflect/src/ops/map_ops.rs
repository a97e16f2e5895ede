use alloc::boxed::Box;

use crate::Reflect;

/// Iterator over the `(key, value)` pairs of a [`Map`].
pub type MapIter<'a> = Box<dyn Iterator<Item = (&'a dyn Reflect, &'a dyn Reflect)> + 'a>;

// -----------------------------------------------------------------------------
// Map

/// A key-value map.
///
/// Iteration order is the order of the underlying container. Nullable maps
/// (`Option<HashMap<K, V>>`) tell an absent map apart from an empty one.
pub trait Map: Reflect {
    fn len(&self) -> usize;

    fn get(&self, key: &dyn Reflect) -> Option<&dyn Reflect>;

    fn iter(&self) -> MapIter<'_>;

    /// Inserts an entry, replacing any previous value for the key.
    ///
    /// Returns the mismatched box if the key or the value has the wrong type.
    /// Inserting into an absent map makes it present.
    fn insert(
        &mut self,
        key: Box<dyn Reflect>,
        value: Box<dyn Reflect>,
    ) -> Result<(), Box<dyn Reflect>>;

    /// Removes all entries. An absent map becomes present and empty.
    fn clear(&mut self);

    #[inline]
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns `true` if the map is absent.
    #[inline]
    fn is_nil(&self) -> bool {
        false
    }

    /// Makes the map absent. Returns `false` if the map is not nullable,
    /// in which case it is cleared instead.
    fn set_nil(&mut self) -> bool {
        self.clear();
        false
    }
}
