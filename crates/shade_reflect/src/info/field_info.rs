use core::any::{Any, TypeId};

use crate::info::{TypeInfo, Typed};

// -----------------------------------------------------------------------------
// NamedField

/// A struct field: its declared name, its type and its raw tags.
///
/// Tags are `(key, value)` pairs written as
/// `#[reflect(tag(json = "name,omitempty"))]`. Their meaning belongs to the
/// codec reading them, this type only stores the text.
#[derive(Clone, Debug)]
pub struct NamedField {
    ty_id: TypeId,
    name: &'static str,
    // `TypeInfo` is created on first access; using a function pointer delays it.
    type_info: fn() -> &'static TypeInfo,
    tags: &'static [(&'static str, &'static str)],
}

impl NamedField {
    #[inline]
    pub const fn new<T: Typed>(name: &'static str) -> Self {
        Self {
            ty_id: TypeId::of::<T>(),
            name,
            type_info: T::type_info,
            tags: &[],
        }
    }

    #[inline]
    pub const fn with_tags(mut self, tags: &'static [(&'static str, &'static str)]) -> Self {
        self.tags = tags;
        self
    }

    #[inline]
    pub const fn ty_id(&self) -> TypeId {
        self.ty_id
    }

    #[inline]
    pub fn type_is<T: Any>(&self) -> bool {
        self.ty_id == TypeId::of::<T>()
    }

    #[inline]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    #[inline]
    pub fn type_info(&self) -> &'static TypeInfo {
        (self.type_info)()
    }

    #[inline]
    pub const fn tags(&self) -> &'static [(&'static str, &'static str)] {
        self.tags
    }

    /// Returns the value of the tag `key`, `None` if it is absent.
    ///
    /// A present tag with an empty value returns `Some("")`.
    pub fn tag(&self, key: &str) -> Option<&'static str> {
        self.tags
            .iter()
            .find_map(|&(k, v)| if k == key { Some(v) } else { None })
    }
}

#[cfg(test)]
mod tests {
    use super::NamedField;

    #[test]
    fn tag_lookup() {
        let field = NamedField::new::<i32>("count").with_tags(&[("json", "n,omitempty"), ("db", "")]);
        assert_eq!(field.name(), "count");
        assert!(field.type_is::<i32>());
        assert_eq!(field.tag("json"), Some("n,omitempty"));
        assert_eq!(field.tag("db"), Some(""));
        assert_eq!(field.tag("shade_json"), None);
    }
}
