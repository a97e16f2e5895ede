use alloc::boxed::Box;

use shade_utils::hash::HashMap;

use crate::info::{NamedField, Type, TypePath, ZeroFn, impl_type_fn, no_zero};
use crate::ops::Struct;

/// Type info for structs with named fields.
///
/// Fields are kept in declaration order, which is also the wire order.
#[derive(Clone, Debug)]
pub struct StructInfo {
    ty: Type,
    fields: Box<[NamedField]>,
    field_indices: HashMap<&'static str, usize>,
    zero: ZeroFn,
}

impl StructInfo {
    impl_type_fn!(ty);

    pub fn new<T: Struct + TypePath>(fields: &[NamedField]) -> Self {
        let field_indices = fields
            .iter()
            .enumerate()
            .map(|(index, field)| (field.name(), index))
            .collect();

        Self {
            ty: Type::of::<T>(),
            fields: fields.into(),
            field_indices,
            zero: no_zero,
        }
    }

    #[inline]
    pub fn with_zero(mut self, zero: ZeroFn) -> Self {
        self.zero = zero;
        self
    }

    pub fn field(&self, name: &str) -> Option<&NamedField> {
        self.fields.get(*self.field_indices.get(name)?)
    }

    #[inline]
    pub fn field_at(&self, index: usize) -> Option<&NamedField> {
        self.fields.get(index)
    }

    #[inline]
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.field_indices.get(name).copied()
    }

    #[inline]
    pub fn iter(&self) -> impl ExactSizeIterator<Item = &NamedField> {
        self.fields.iter()
    }

    #[inline]
    pub fn field_len(&self) -> usize {
        self.fields.len()
    }

    #[inline]
    pub(crate) const fn zero_fn(&self) -> ZeroFn {
        self.zero
    }
}

#[cfg(test)]
mod tests {
    use alloc::string::String;

    use crate::derive::Reflect;
    use crate::info::Typed;

    #[derive(Reflect)]
    #[reflect(default)]
    struct Job {
        #[reflect(tag(json = "job_name,omitempty", shade_json = "name"))]
        name: String,
        #[reflect(tag(json = "-"))]
        run: fn() -> u32,
    }

    impl Default for Job {
        fn default() -> Self {
            Self {
                name: String::new(),
                run: || 0,
            }
        }
    }

    #[test]
    fn derived_struct_info() {
        let info = Job::type_info().as_struct().unwrap();
        assert_eq!(info.field_len(), 2);
        assert_eq!(info.index_of("run"), Some(1));

        let name = info.field("name").unwrap();
        assert!(name.type_is::<String>());
        assert_eq!(name.tag("json"), Some("job_name,omitempty"));
        assert_eq!(name.tag("shade_json"), Some("name"));
        assert_eq!(info.field_at(1).unwrap().tag("json"), Some("-"));
        assert_eq!(info.field_at(1).unwrap().tag("shade_json"), None);

        // `fn` has no zero value, `default` supplies one.
        assert!(Job::type_info().zero().unwrap().is::<Job>());
    }
}
