use alloc::string::String;
use alloc::vec::Vec;

use shade_reflect::resolver::TypeDescriptor;

use crate::boxes::{expect_object, read_count};
use crate::error::ErrorKind;
use crate::wire::{Number, WireValue};

/// An interface value on the wire: what the value was, then the value.
///
/// Empty descriptor parts are left out. A nil interface is plain `null`.
#[derive(Debug, Clone, Copy)]
pub(crate) struct InterfaceBox<'a> {
    pub ptr_depth: usize,
    pub namespace: &'a str,
    pub name: &'a str,
    pub fallback: &'a str,
    pub value: &'a WireValue,
}

impl<'a> InterfaceBox<'a> {
    pub fn encode(descriptor: &TypeDescriptor, value: WireValue) -> WireValue {
        let mut entries = Vec::with_capacity(5);
        if descriptor.ptr_depth != 0 {
            let depth = u64::try_from(descriptor.ptr_depth).unwrap_or(u64::MAX);
            entries.push(("ptrDepth".into(), WireValue::Number(Number::Uint(depth))));
        }
        for (key, part) in [
            ("pkgPath", descriptor.namespace),
            ("typeName", descriptor.name),
            ("typeString", descriptor.fallback),
        ] {
            if !part.is_empty() {
                entries.push((key.into(), WireValue::String(part.into())));
            }
        }
        entries.push(("value".into(), value));
        WireValue::Object(entries)
    }

    /// Reads a box, `None` for a nil interface.
    pub fn decode(wire: &'a WireValue) -> Result<Option<Self>, ErrorKind> {
        static NULL: WireValue = WireValue::Null;

        if wire.is_null() {
            return Ok(None);
        }

        let mut boxed = Self {
            ptr_depth: 0,
            namespace: "",
            name: "",
            fallback: "",
            value: &NULL,
        };
        for (key, entry) in expect_object(wire, "interface box")? {
            let text = match key.as_str() {
                "ptrDepth" => {
                    let depth = read_count(entry, "ptrDepth")?;
                    boxed.ptr_depth = usize::try_from(depth).map_err(ErrorKind::malformed)?;
                    continue;
                }
                "value" => {
                    boxed.value = entry;
                    continue;
                }
                "pkgPath" => &mut boxed.namespace,
                "typeName" => &mut boxed.name,
                "typeString" => &mut boxed.fallback,
                _ => continue,
            };
            *text = match entry {
                WireValue::String(s) => s.as_str(),
                WireValue::Null => "",
                other => return Err(ErrorKind::mismatch("string", other.kind_name())),
            };
        }
        Ok(Some(boxed))
    }

    /// `namespace::name`, or the fallback text, for error messages.
    pub fn describe(&self) -> String {
        if self.name.is_empty() {
            self.fallback.into()
        } else if self.namespace.is_empty() {
            self.name.into()
        } else {
            format!("{}::{}", self.namespace, self.name)
        }
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec::Vec;

    use shade_reflect::info::Typed;
    use shade_reflect::num::Complex64;
    use shade_reflect::resolver::TypeDescriptor;

    use super::InterfaceBox;
    use crate::wire::printer::render_compact;
    use crate::wire::{Number, WireValue};

    #[test]
    fn builtin_descriptor() {
        let descriptor = TypeDescriptor::of(i64::type_info());
        let wire = InterfaceBox::encode(&descriptor, WireValue::Number(Number::Int(42)));
        assert_eq!(
            render_compact(&wire).unwrap(),
            r#"{"typeName":"i64","value":42}"#
        );
    }

    #[test]
    fn fallback_descriptor() {
        let descriptor = TypeDescriptor::of(<Vec<i64>>::type_info());
        let wire = InterfaceBox::encode(&descriptor, WireValue::Array(Vec::new()));
        assert_eq!(
            render_compact(&wire).unwrap(),
            r#"{"typeString":"alloc::vec::Vec<i64>","value":[]}"#
        );
        let decoded = InterfaceBox::decode(&wire).unwrap().unwrap();
        assert_eq!(decoded.fallback, "alloc::vec::Vec<i64>");
        assert_eq!(decoded.describe(), "alloc::vec::Vec<i64>");
    }

    #[test]
    fn named_descriptor() {
        let descriptor = TypeDescriptor::of(Complex64::type_info());
        let wire = InterfaceBox::encode(&descriptor, WireValue::Null);
        let decoded = InterfaceBox::decode(&wire).unwrap().unwrap();
        assert_eq!(decoded.ptr_depth, 0);
        assert_eq!(decoded.namespace, "shade_reflect::num");
        assert_eq!(decoded.name, "Complex64");
        assert_eq!(decoded.describe(), "shade_reflect::num::Complex64");
        assert!(InterfaceBox::decode(&WireValue::Null).unwrap().is_none());
    }
}
