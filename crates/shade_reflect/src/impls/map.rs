use alloc::boxed::Box;
use alloc::collections::BTreeMap;
use core::hash::Hash;
use std::collections::HashMap;

use crate::Reflect;
use crate::impls::GenericTypeInfoCell;
use crate::info::{MapInfo, TypeInfo, Typed};
use crate::ops::{Map, MapIter};
use crate::reflection::impl_reflect_cast_fn;

macro_rules! impl_reflect_map {
    ($map:ident, $($key_bound:tt)+) => {
        impl<K, V> Typed for $map<K, V>
        where
            K: Reflect + Typed + $($key_bound)+,
            V: Reflect + Typed,
        {
            fn type_info() -> &'static TypeInfo {
                static CELL: GenericTypeInfoCell = GenericTypeInfoCell::new();
                CELL.get_or_insert::<Self>(|| TypeInfo::Map(MapInfo::new::<Self, K, V>(false)))
            }
        }

        impl<K, V> Reflect for $map<K, V>
        where
            K: Reflect + Typed + $($key_bound)+,
            V: Reflect + Typed,
        {
            impl_reflect_cast_fn!(Map);
        }

        impl<K, V> Map for $map<K, V>
        where
            K: Reflect + Typed + $($key_bound)+,
            V: Reflect + Typed,
        {
            #[inline]
            fn len(&self) -> usize {
                $map::len(self)
            }

            fn get(&self, key: &dyn Reflect) -> Option<&dyn Reflect> {
                $map::get(self, key.downcast_ref::<K>()?).map(Reflect::as_reflect)
            }

            fn iter(&self) -> MapIter<'_> {
                Box::new($map::iter(self).map(|(k, v)| (k.as_reflect(), v.as_reflect())))
            }

            fn insert(
                &mut self,
                key: Box<dyn Reflect>,
                value: Box<dyn Reflect>,
            ) -> Result<(), Box<dyn Reflect>> {
                let key = key.take::<K>()?;
                let value = value.take::<V>()?;
                $map::insert(self, key, value);
                Ok(())
            }

            #[inline]
            fn clear(&mut self) {
                $map::clear(self);
            }
        }

        impl<K, V> Typed for Option<$map<K, V>>
        where
            K: Reflect + Typed + $($key_bound)+,
            V: Reflect + Typed,
        {
            fn type_info() -> &'static TypeInfo {
                static CELL: GenericTypeInfoCell = GenericTypeInfoCell::new();
                CELL.get_or_insert::<Self>(|| TypeInfo::Map(MapInfo::new::<Self, K, V>(true)))
            }
        }

        impl<K, V> Reflect for Option<$map<K, V>>
        where
            K: Reflect + Typed + $($key_bound)+,
            V: Reflect + Typed,
        {
            impl_reflect_cast_fn!(Map);
        }

        impl<K, V> Map for Option<$map<K, V>>
        where
            K: Reflect + Typed + $($key_bound)+,
            V: Reflect + Typed,
        {
            #[inline]
            fn len(&self) -> usize {
                self.as_ref().map_or(0, $map::len)
            }

            fn get(&self, key: &dyn Reflect) -> Option<&dyn Reflect> {
                Map::get(self.as_ref()?, key)
            }

            fn iter(&self) -> MapIter<'_> {
                match self {
                    Some(map) => Map::iter(map),
                    None => Box::new(core::iter::empty()),
                }
            }

            fn insert(
                &mut self,
                key: Box<dyn Reflect>,
                value: Box<dyn Reflect>,
            ) -> Result<(), Box<dyn Reflect>> {
                Map::insert(self.get_or_insert_with(Default::default), key, value)
            }

            fn clear(&mut self) {
                self.get_or_insert_with(Default::default).clear();
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
    };
}

impl_reflect_map!(HashMap, Eq + Hash);
impl_reflect_map!(BTreeMap, Ord);

#[cfg(test)]
mod tests {
    use alloc::boxed::Box;
    use alloc::collections::BTreeMap;
    use alloc::string::String;
    use std::collections::HashMap;

    use crate::Reflect;
    use crate::ops::Map;

    #[test]
    fn insert_and_get() {
        let mut map: HashMap<String, i32> = HashMap::new();
        let dyn_map: &mut dyn Map = &mut map;
        dyn_map
            .insert(Box::new(String::from("x")), Box::new(1_i32))
            .unwrap();
        assert!(dyn_map.insert(Box::new(1_u8), Box::new(1_i32)).is_err());
        assert!(dyn_map.insert(Box::new(String::from("y")), Box::new(1_u8)).is_err());

        let key = String::from("x");
        let value = dyn_map.get(key.as_reflect()).unwrap();
        assert_eq!(value.downcast_ref::<i32>(), Some(&1));
        assert_eq!(map.len(), 1);
    }

    #[test]
    fn nullable_map() {
        let mut map: Option<BTreeMap<u8, u8>> = None;
        assert!(Map::is_nil(&map));
        assert_eq!(Map::iter(&map).count(), 0);

        Map::insert(&mut map, Box::new(1_u8), Box::new(2_u8)).unwrap();
        assert_eq!(map.as_ref().map(BTreeMap::len), Some(1));

        assert!(Map::set_nil(&mut map));
        assert!(map.is_none());
    }
}
