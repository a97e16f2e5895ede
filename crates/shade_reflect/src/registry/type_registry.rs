use core::any::TypeId;

use shade_utils::TypeIdMap;
use shade_utils::hash::{FixedHashState, HashMap, HashSet};

use crate::info::{PointerFamily, PointerInfo, TypeInfo, Typed};
use crate::registry::TypeMeta;

// -----------------------------------------------------------------------------
// TypeRegistry

/// A registry of reflected types.
///
/// # Lookup
///
/// - [`get`](Self::get): by `TypeId`.
/// - [`get_with_type_path`](Self::get_with_type_path): by full path, e.g. `my_app::Node`.
/// - [`get_with_type_name`](Self::get_with_type_name): by short name, e.g. `Node`.
///   Names shared by several registered types are *ambiguous* and never match.
/// - [`pointer_to`](Self::pointer_to): the pointer type wrapping a pointee.
///
/// # Example
///
/// ```
/// use shade_reflect::registry::TypeRegistry;
/// use std::rc::Rc;
///
/// let mut registry = TypeRegistry::new();
/// registry.register::<Vec<Rc<u8>>>();
///
/// assert!(registry.get_with_type_name("Vec<Rc<u8>>").is_some());
/// let pointer = registry.pointer_to(core::any::TypeId::of::<u8>()).unwrap();
/// assert!(pointer.type_is::<Rc<u8>>());
/// ```
pub struct TypeRegistry {
    type_meta_table: TypeIdMap<TypeMeta>,
    type_path_to_id: HashMap<&'static str, TypeId>,
    type_name_to_id: HashMap<&'static str, TypeId>,
    ambiguous_names: HashSet<&'static str>,
    // pointee -> (preferred pointer type, its shape rank)
    pointer_table: TypeIdMap<(TypeId, u8)>,
}

impl Default for TypeRegistry {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl TypeRegistry {
    /// Creates a registry without any types.
    #[inline]
    pub const fn empty() -> Self {
        Self {
            type_meta_table: TypeIdMap::new(),
            type_path_to_id: HashMap::with_hasher(FixedHashState),
            type_name_to_id: HashMap::with_hasher(FixedHashState),
            ambiguous_names: HashSet::with_hasher(FixedHashState),
            pointer_table: TypeIdMap::new(),
        }
    }

    /// Creates a registry with the built-in primitives registered.
    pub fn new() -> Self {
        let mut registry = Self::empty();
        registry.register::<bool>();
        registry.register::<i8>();
        registry.register::<i16>();
        registry.register::<i32>();
        registry.register::<i64>();
        registry.register::<isize>();
        registry.register::<u8>();
        registry.register::<u16>();
        registry.register::<u32>();
        registry.register::<u64>();
        registry.register::<usize>();
        registry.register::<f32>();
        registry.register::<f64>();
        registry.register::<char>();
        registry.register::<alloc::string::String>();
        registry
    }

    fn add_new_type_indices(
        meta: &TypeMeta,
        type_path_to_id: &mut HashMap<&'static str, TypeId>,
        type_name_to_id: &mut HashMap<&'static str, TypeId>,
        ambiguous_names: &mut HashSet<&'static str>,
    ) {
        let ty = meta.ty();
        let type_name = ty.name();

        // The type itself is new, so a known name means a second type.
        if !ambiguous_names.contains(type_name) {
            if type_name_to_id.contains_key(type_name) {
                type_name_to_id.remove(type_name);
                ambiguous_names.insert(type_name);
            } else {
                type_name_to_id.insert(type_name, ty.id());
            }
        }

        type_path_to_id.insert(ty.path(), ty.id());
    }

    /// Registers `T` and every type reachable from it.
    #[inline]
    pub fn register<T: Typed>(&mut self) {
        self.register_info(T::type_info());
    }

    /// Registers the type described by `info` and every type reachable from it.
    ///
    /// Registering a type twice does nothing.
    pub fn register_info(&mut self, info: &'static TypeInfo) {
        let inserted = self.type_meta_table.try_insert(info.ty_id(), || {
            let meta = TypeMeta::from_info(info);
            Self::add_new_type_indices(
                &meta,
                &mut self.type_path_to_id,
                &mut self.type_name_to_id,
                &mut self.ambiguous_names,
            );
            meta
        });
        if !inserted {
            return;
        }

        match info {
            TypeInfo::Struct(info) => {
                for field in info.iter() {
                    self.register_info(field.type_info());
                }
            }
            TypeInfo::List(info) => self.register_info(info.item_info()),
            TypeInfo::Array(info) => self.register_info(info.item_info()),
            TypeInfo::Map(info) => {
                self.register_info(info.key_info());
                self.register_info(info.value_info());
            }
            TypeInfo::Pointer(info) => {
                let entry = (info.ty_id(), shape_rank(info));
                let slot = self.pointer_table.get_or_insert(info.pointee_id(), || entry);
                if entry.1 < slot.1 {
                    *slot = entry;
                }
                self.register_info(info.pointee_info());
            }
            TypeInfo::Primitive(_)
            | TypeInfo::Interface(_)
            | TypeInfo::Complex(_)
            | TypeInfo::Opaque(_) => {}
        }
    }

    #[inline]
    pub fn contains(&self, type_id: TypeId) -> bool {
        self.type_meta_table.contains(&type_id)
    }

    #[inline]
    pub fn get(&self, type_id: TypeId) -> Option<&TypeMeta> {
        self.type_meta_table.get(&type_id)
    }

    pub fn get_with_type_path(&self, type_path: &str) -> Option<&TypeMeta> {
        match self.type_path_to_id.get(type_path) {
            Some(id) => self.get(*id),
            None => None,
        }
    }

    /// Returns the type with the given short name, `None` if the name is
    /// unknown or ambiguous.
    pub fn get_with_type_name(&self, type_name: &str) -> Option<&TypeMeta> {
        match self.type_name_to_id.get(type_name) {
            Some(id) => self.get(*id),
            None => None,
        }
    }

    #[inline]
    pub fn is_ambiguous(&self, type_name: &str) -> bool {
        self.ambiguous_names.contains(type_name)
    }

    /// Returns the pointer type registered for `pointee`.
    ///
    /// When several pointer types share a pointee, a plain `Rc<T>` is
    /// preferred, then `Arc<T>`, then the nullable and late-bound slots in
    /// registration order.
    pub fn pointer_to(&self, pointee: TypeId) -> Option<&TypeMeta> {
        self.get(self.pointer_table.get(&pointee)?.0)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.type_meta_table.len()
    }

    #[inline]
    pub fn iter(&self) -> impl ExactSizeIterator<Item = &TypeMeta> {
        self.type_meta_table.values()
    }
}

impl core::fmt::Debug for TypeRegistry {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_set().entries(self.type_path_to_id.keys()).finish()
    }
}

/// Lower is preferred.
fn shape_rank(info: &PointerInfo) -> u8 {
    match (info.family(), info.is_nullable()) {
        (PointerFamily::Rc, false) => 0,
        (PointerFamily::Arc, false) => 1,
        (PointerFamily::Rc, true) => 2,
        (PointerFamily::Arc, true) => 3,
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use alloc::rc::Rc;
    use alloc::string::String;
    use alloc::sync::Arc;
    use alloc::vec::Vec;
    use core::any::TypeId;
    use core::cell::OnceCell;
    use std::collections::HashMap;

    use super::TypeRegistry;

    #[test]
    fn primitives_are_registered() {
        let registry = TypeRegistry::new();
        assert!(registry.contains(TypeId::of::<u64>()));
        assert!(registry.get_with_type_path("alloc::string::String").is_some());
        assert!(registry.get_with_type_name("String").is_some());
        assert_eq!(TypeRegistry::empty().len(), 0);
    }

    #[test]
    fn registers_dependencies() {
        let mut registry = TypeRegistry::empty();
        registry.register::<HashMap<String, Vec<[u8; 2]>>>();
        assert!(registry.contains(TypeId::of::<String>()));
        assert!(registry.contains(TypeId::of::<Vec<[u8; 2]>>()));
        assert!(registry.contains(TypeId::of::<[u8; 2]>()));
        assert!(registry.contains(TypeId::of::<u8>()));
    }

    #[test]
    fn plain_pointers_win() {
        let mut registry = TypeRegistry::empty();
        registry.register::<Option<Rc<i32>>>();
        registry.register::<OnceCell<Rc<i32>>>();
        let meta = registry.pointer_to(TypeId::of::<i32>()).unwrap();
        assert!(meta.type_is::<Option<Rc<i32>>>());

        registry.register::<Arc<i32>>();
        let meta = registry.pointer_to(TypeId::of::<i32>()).unwrap();
        assert!(meta.type_is::<Arc<i32>>());

        registry.register::<Rc<i32>>();
        registry.register::<Option<Arc<i32>>>();
        let meta = registry.pointer_to(TypeId::of::<i32>()).unwrap();
        assert!(meta.type_is::<Rc<i32>>());

        assert!(registry.pointer_to(TypeId::of::<u8>()).is_none());
    }

    mod left {
        use crate::derive::Reflect;

        #[derive(Reflect)]
        pub struct Point {
            pub x: i32,
        }
    }

    mod right {
        use crate::derive::Reflect;

        #[derive(Reflect)]
        pub struct Point {
            pub x: f32,
        }
    }

    #[test]
    fn ambiguous_names() {
        use crate::info::TypePath;

        let mut registry = TypeRegistry::empty();
        registry.register::<left::Point>();
        assert!(registry.get_with_type_name("Point").is_some());

        registry.register::<right::Point>();
        assert!(registry.is_ambiguous("Point"));
        assert!(registry.get_with_type_name("Point").is_none());

        let meta = registry
            .get_with_type_path(right::Point::type_path())
            .unwrap();
        assert!(meta.type_is::<right::Point>());
    }
}
