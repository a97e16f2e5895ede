use crate::Reflect;

// -----------------------------------------------------------------------------
// Struct

/// A struct with named fields.
///
/// Implemented by [`#[derive(Reflect)]`](crate::derive::Reflect). Field order
/// is the declaration order and matches
/// [`StructInfo`](crate::info::StructInfo). Private fields are included, so a
/// codec can read and write them without extra access rules.
pub trait Struct: Reflect {
    fn field(&self, name: &str) -> Option<&dyn Reflect>;

    fn field_mut(&mut self, name: &str) -> Option<&mut dyn Reflect>;

    fn field_at(&self, index: usize) -> Option<&dyn Reflect>;

    fn field_at_mut(&mut self, index: usize) -> Option<&mut dyn Reflect>;

    fn name_at(&self, index: usize) -> Option<&str>;

    fn field_len(&self) -> usize;
}

impl dyn Struct {
    #[inline]
    pub fn iter_fields(&self) -> StructFieldIter<'_> {
        StructFieldIter::new(self)
    }
}

// -----------------------------------------------------------------------------
// StructFieldIter

/// Iterates over `(name, value)` pairs of a [`Struct`].
pub struct StructFieldIter<'a> {
    struct_val: &'a dyn Struct,
    index: usize,
}

impl<'a> StructFieldIter<'a> {
    #[inline(always)]
    pub const fn new(value: &'a dyn Struct) -> Self {
        StructFieldIter {
            struct_val: value,
            index: 0,
        }
    }
}

impl<'a> Iterator for StructFieldIter<'a> {
    type Item = (&'a str, &'a dyn Reflect);

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let name = self.struct_val.name_at(self.index)?;
        let value = self.struct_val.field_at(self.index)?;
        self.index += 1;
        Some((name, value))
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let size = self.struct_val.field_len() - self.index;
        (size, Some(size))
    }
}

impl<'a> ExactSizeIterator for StructFieldIter<'a> {}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use alloc::boxed::Box;
    use alloc::string::String;
    use alloc::vec::Vec;

    use crate::Reflect;
    use crate::derive::Reflect;
    use crate::info::{TypePath, Typed};
    use crate::ops::{ReflectMut, ReflectRef, Struct};

    #[derive(Reflect, Debug, PartialEq)]
    struct Account {
        pub id: u64,
        owner: String,
        r#type: u8,
    }

    #[derive(Reflect)]
    struct Marker;

    #[derive(Reflect)]
    struct Wrapper<T> {
        inner: Vec<T>,
    }

    #[derive(Reflect, Debug)]
    #[reflect(opaque, debug)]
    struct Celsius(f64);

    #[test]
    fn derived_accessors() {
        let mut account = Account {
            id: 7,
            owner: String::from("ada"),
            r#type: 2,
        };

        assert_eq!(account.field_len(), 3);
        assert_eq!(account.name_at(2), Some("type"));
        assert!(account.field("owner").unwrap().is::<String>());
        assert!(account.field("missing").is_none());

        *account.field_mut("id").unwrap().downcast_mut::<u64>().unwrap() = 9;
        assert_eq!(account.id, 9);

        let ReflectMut::Struct(data) = account.reflect_mut() else {
            panic!("expected a struct");
        };
        data.field_at_mut(1)
            .unwrap()
            .set(Box::new(String::from("bob")))
            .unwrap();
        assert_eq!(account.owner, "bob");

        let ReflectRef::Struct(data) = account.reflect_ref() else {
            panic!("expected a struct");
        };
        let names: Vec<&str> = data.iter_fields().map(|(name, _)| name).collect();
        assert_eq!(names, ["id", "owner", "type"]);
    }

    #[test]
    fn derived_paths() {
        assert_eq!(
            Account::type_path(),
            concat!(module_path!(), "::Account")
        );
        assert_eq!(Account::type_name(), "Account");
        assert_eq!(Account::module_path(), Some(module_path!()));
        assert!(Account::type_info().ty().path_table().is_plain());

        assert_eq!(
            <Wrapper<u8>>::type_path(),
            concat!(module_path!(), "::Wrapper<u8>")
        );
        assert_eq!(<Wrapper<String>>::type_name(), "Wrapper<String>");
        assert!(!<Wrapper<u8>>::type_info().ty().path_table().is_plain());
    }

    #[test]
    fn derived_zero() {
        let zero = Account::type_info().zero().unwrap();
        let zero = zero.take::<Account>().unwrap();
        assert_eq!(
            zero,
            Account {
                id: 0,
                owner: String::new(),
                r#type: 0,
            }
        );

        assert!(Marker::type_info().zero().unwrap().is::<Marker>());
        assert_eq!(Marker.field_len(), 0);
    }

    #[test]
    fn derived_debug() {
        let wrapper = Wrapper { inner: [1_u8, 2].into() };
        let text = alloc::format!("{:?}", &wrapper as &dyn Reflect);
        assert_eq!(text, "Wrapper { inner: [1, 2] }");

        let account = Account {
            id: 1,
            owner: String::from("x"),
            r#type: 0,
        };
        let text = alloc::format!("{:?}", &account as &dyn Reflect);
        assert_eq!(text, r#"Account { id: 1, owner: "x", type: 0 }"#);

        let text = alloc::format!("{:?}", &Celsius(1.5) as &dyn Reflect);
        assert_eq!(text, "Celsius(1.5)");
        assert!(Celsius::type_info().as_opaque().unwrap().codec().is_none());
    }
}
