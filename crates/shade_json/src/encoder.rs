use alloc::boxed::Box;
use alloc::collections::BTreeMap;
use alloc::string::{String, ToString};
use alloc::vec::Vec;
use core::any::Any;
use core::fmt;

use shade_reflect::Reflect;
use shade_reflect::info::{OpaqueInfo, PrimitiveKind, TypeInfo};
use shade_reflect::ops::{Interface, Map, Pointer, ReflectRef, Struct};
use shade_reflect::resolver::TypeDescriptor;
use shade_utils::hash::{HashMap, HashSet};

use crate::boxes::{ComplexBox, InterfaceBox, PointerBox};
use crate::error::{Error, ErrorKind, PathSegment};
use crate::options::EncoderOptions;
use crate::wire::printer::{render, render_compact};
use crate::wire::{Number, WireField, WireType, WireValue, wire_type_for};

// -----------------------------------------------------------------------------
// PointerEntry

struct PointerEntry {
    id: u64,
    boxed: WireValue,
    // Keeps the allocation alive so its address is not reused.
    _handle: Option<Box<dyn Any>>,
}

// -----------------------------------------------------------------------------
// Encoder

/// Turns reflected values into enveloped JSON text.
///
/// An encoder remembers every pointer it has encoded. Reusing one encoder for
/// several values keeps reference ids consistent between them, so a
/// [`Decoder`](crate::Decoder) reading the outputs in the same order restores
/// the sharing.
///
/// ```
/// use std::rc::Rc;
/// use shade_json::Encoder;
///
/// let shared = Rc::new(7_i64);
/// let mut encoder = Encoder::new();
///
/// let first = encoder.encode(&shared).unwrap();
/// let second = encoder.encode(&Rc::clone(&shared)).unwrap();
/// assert_eq!(first, r#"{"value":{"pointer":1,"value":7}}"#);
/// assert_eq!(first, second);
/// ```
pub struct Encoder {
    options: EncoderOptions,
    next_id: u64,
    pointers: HashMap<usize, PointerEntry>,
    pending: HashSet<usize>,
}

impl Encoder {
    pub fn new() -> Self {
        Self::with_options(EncoderOptions::new())
    }

    pub fn with_options(options: EncoderOptions) -> Self {
        Self {
            options,
            next_id: 0,
            pointers: HashMap::default(),
            pending: HashSet::default(),
        }
    }

    #[inline]
    pub fn options(&self) -> &EncoderOptions {
        &self.options
    }

    /// Encodes `value` and prints it inside the `{"value": ...}` envelope.
    pub fn encode(&mut self, value: &dyn Reflect) -> Result<String, Error> {
        let encoded = self.encode_value(value)?;
        render(&WireValue::object([("value", encoded)]), &self.options)
    }

    /// Encodes `value` without the envelope or the final print.
    pub fn encode_value(&mut self, value: &dyn Reflect) -> Result<WireValue, Error> {
        let wire = wire_type_for(value.reflect_type_info())?;
        self.encode_as(value, wire)
    }

    fn encode_as(
        &mut self,
        value: &dyn Reflect,
        wire: &'static WireType,
    ) -> Result<WireValue, Error> {
        match (wire, value.reflect_ref()) {
            (WireType::RawPayload, _) => encode_raw(value),
            (WireType::Primitive(kind), _) => encode_primitive(value, *kind),
            (WireType::Struct(fields), ReflectRef::Struct(value)) => {
                self.encode_struct(value, fields)
            }
            (WireType::Slice { elem }, ReflectRef::List(list)) => {
                if list.is_nil() {
                    return Ok(WireValue::Null);
                }
                self.encode_items(list.iter(), *elem)
            }
            (WireType::Array { elem, .. }, ReflectRef::Array(array)) => {
                self.encode_items(array.iter(), *elem)
            }
            (WireType::Map { key, value: val, textual_key }, ReflectRef::Map(map)) => {
                self.encode_map(map, *key, *val, *textual_key)
            }
            (WireType::PointerBox, ReflectRef::Pointer(pointer)) => self.encode_pointer(pointer),
            (WireType::InterfaceBox, ReflectRef::Interface(slot)) => self.encode_interface(slot),
            (WireType::ComplexBox, ReflectRef::Complex(complex)) => {
                let (real, imag) = complex.parts();
                Ok(ComplexBox { real, imag }.encode())
            }
            (wire, found) => Err(ErrorKind::mismatch(wire.kind_name(), found.kind()).into()),
        }
    }

    fn encode_struct(
        &mut self,
        value: &dyn Struct,
        fields: &'static [WireField],
    ) -> Result<WireValue, Error> {
        let mut entries = Vec::with_capacity(fields.len());

        for field in fields {
            let at = |err: Error| err.at(PathSegment::Field(field.wire_name().into()));

            let Some(child) = value.field_at(field.index()) else {
                let missing = ErrorKind::mismatch(
                    value.reflect_type_path(),
                    format_args!("no field `{}`", field.name()),
                );
                return Err(at(missing.into()));
            };
            let wire = wire_type_for(field.type_info()).map_err(at)?;
            let mut encoded = self.encode_as(child, wire).map_err(at)?;

            if field.omit_empty() && wire.can_be_empty() && encoded.is_empty_value() {
                continue;
            }
            if field.quoted() && matches!(wire, WireType::Primitive(_)) {
                encoded = WireValue::String(render_compact(&encoded)?);
            }
            entries.push((field.wire_name().into(), encoded));
        }

        Ok(WireValue::Object(entries))
    }

    fn encode_items<'a>(
        &mut self,
        items: impl Iterator<Item = &'a dyn Reflect>,
        elem: &'static TypeInfo,
    ) -> Result<WireValue, Error> {
        let wire = wire_type_for(elem)?;
        items
            .enumerate()
            .map(|(index, item)| {
                self.encode_as(item, wire)
                    .map_err(|err| err.at(PathSegment::Index(index)))
            })
            .collect::<Result<Vec<_>, _>>()
            .map(WireValue::Array)
    }

    fn encode_map(
        &mut self,
        map: &dyn Map,
        key: &'static TypeInfo,
        value: &'static TypeInfo,
        textual_key: bool,
    ) -> Result<WireValue, Error> {
        if map.is_nil() {
            return Ok(WireValue::Null);
        }

        let key_wire = wire_type_for(key)?;
        let value_wire = wire_type_for(value)?;

        // Sorted by wire key, a repeated key keeps the last value.
        let mut entries = BTreeMap::new();
        for (index, (k, v)) in map.iter().enumerate() {
            let encoded_key = self
                .encode_as(k, key_wire)
                .map_err(|err| err.at(PathSegment::Index(index)))?;
            let text = match encoded_key {
                WireValue::String(text) if !textual_key => text,
                WireValue::Number(number) if !textual_key => number.to_string(),
                WireValue::Bool(flag) if !textual_key => flag.to_string(),
                other => render_compact(&other)?,
            };
            let encoded = self
                .encode_as(v, value_wire)
                .map_err(|err| err.at(PathSegment::Key(text.clone())))?;
            entries.insert(text, encoded);
        }

        Ok(WireValue::Object(entries.into_iter().collect()))
    }

    fn encode_pointer(&mut self, pointer: &dyn Pointer) -> Result<WireValue, Error> {
        let (Some(address), Some(pointee)) = (pointer.address(), pointer.pointee()) else {
            return Ok(PointerBox::null());
        };

        if let Some(entry) = self.pointers.get(&address) {
            log::trace!("reusing pointer id {} for {address:#x}", entry.id);
            return Ok(entry.boxed.clone());
        }

        if !self.pending.insert(address) {
            return Err(ErrorKind::CycleDetected {
                type_path: pointer.reflect_type_path(),
            }
            .into());
        }
        let encoded = self.encode_value(pointee);
        self.pending.remove(&address);
        let encoded = encoded.map_err(|err| err.at(PathSegment::Pointee))?;

        self.next_id += 1;
        let id = self.next_id;
        let boxed = PointerBox::encode(id, encoded);
        log::trace!("assigned pointer id {id} to {address:#x}");

        self.pointers.insert(
            address,
            PointerEntry {
                id,
                boxed: boxed.clone(),
                _handle: pointer.handle(),
            },
        );
        Ok(boxed)
    }

    fn encode_interface(&mut self, slot: &dyn Interface) -> Result<WireValue, Error> {
        let Some(value) = slot.value() else {
            return Ok(WireValue::Null);
        };

        let descriptor = TypeDescriptor::of(value.reflect_type_info());
        let payload = self
            .encode_value(value)
            .map_err(|err| err.at(PathSegment::Interface))?;
        Ok(InterfaceBox::encode(&descriptor, payload))
    }
}

impl Default for Encoder {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Encoder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Encoder")
            .field("options", &self.options)
            .field("next_id", &self.next_id)
            .field("pointers", &self.pointers.len())
            .finish_non_exhaustive()
    }
}

// -----------------------------------------------------------------------------
// Leaves

fn encode_primitive(value: &dyn Reflect, kind: PrimitiveKind) -> Result<WireValue, Error> {
    macro_rules! read {
        ($ty:ty) => {
            value.downcast_ref::<$ty>().copied()
        };
    }

    let int = |v: i64| WireValue::Number(Number::Int(v));
    let uint = |v: u64| WireValue::Number(Number::Uint(v));

    let wire = match kind {
        PrimitiveKind::Bool => read!(bool).map(WireValue::Bool),
        PrimitiveKind::I8 => read!(i8).map(|v| int(v.into())),
        PrimitiveKind::I16 => read!(i16).map(|v| int(v.into())),
        PrimitiveKind::I32 => read!(i32).map(|v| int(v.into())),
        PrimitiveKind::I64 => read!(i64).map(int),
        PrimitiveKind::Isize => read!(isize).and_then(|v| i64::try_from(v).ok()).map(int),
        PrimitiveKind::U8 => read!(u8).map(|v| uint(v.into())),
        PrimitiveKind::U16 => read!(u16).map(|v| uint(v.into())),
        PrimitiveKind::U32 => read!(u32).map(|v| uint(v.into())),
        PrimitiveKind::U64 => read!(u64).map(uint),
        PrimitiveKind::Usize => read!(usize).and_then(|v| u64::try_from(v).ok()).map(uint),
        PrimitiveKind::F32 => read!(f32).map(|v| WireValue::Number(Number::F32(v))),
        PrimitiveKind::F64 => read!(f64).map(|v| WireValue::Number(Number::F64(v))),
        PrimitiveKind::Char => read!(char).map(|c| WireValue::String(c.into())),
        PrimitiveKind::String => value
            .downcast_ref::<String>()
            .map(|s| WireValue::String(s.clone())),
    };

    match wire {
        Some(WireValue::Number(number)) if !number.as_f64().is_finite() => {
            Err(ErrorKind::UnsupportedKind {
                type_path: value.reflect_type_path(),
                reason: "non-finite floats have no JSON form",
            }
            .into())
        }
        Some(wire) => Ok(wire),
        None => Err(ErrorKind::mismatch(kind, value.reflect_type_path()).into()),
    }
}

fn encode_raw(value: &dyn Reflect) -> Result<WireValue, Error> {
    let info = value.reflect_type_info();
    let Some(codec) = info.as_opaque().ok().and_then(OpaqueInfo::codec) else {
        return Err(ErrorKind::UnsupportedKind {
            type_path: info.type_path(),
            reason: "opaque types need a serde codec",
        }
        .into());
    };

    let mut out = Vec::new();
    codec
        .serialize(value, &mut serde_json::Serializer::new(&mut out))
        .map_err(|err| ErrorKind::CustomCodeFailure {
            type_path: info.type_path(),
            message: err.to_string(),
        })?;
    Ok(serde_json::from_slice(&out)?)
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use alloc::collections::BTreeMap;
    use alloc::rc::Rc;
    use alloc::string::String;
    use alloc::vec;
    use alloc::vec::Vec;
    use core::cmp::Ordering;

    use shade_reflect::derive::Reflect;
    use shade_reflect::num::Complex64;

    use super::Encoder;
    use crate::error::ErrorKind;
    use crate::options::EncoderOptions;

    #[derive(Reflect, Default)]
    #[reflect(default)]
    struct Link {
        name: String,
        next: Option<Rc<Link>>,
    }

    #[derive(Reflect, Default)]
    #[reflect(default)]
    struct Sparse {
        #[reflect(tag(json = ",omitempty"))]
        count: u32,
        #[reflect(tag(json = ",omitempty"))]
        items: Option<Vec<u8>>,
        #[reflect(tag(json = ",omitempty"))]
        inner: Complex64,
        #[reflect(tag(json = "n,string"))]
        quoted: i32,
    }

    fn chain() -> Link {
        let c = Rc::new(Link {
            name: "c".into(),
            next: None,
        });
        let b = Rc::new(Link {
            name: "b".into(),
            next: Some(c),
        });
        let a = Rc::new(Link {
            name: "a".into(),
            next: Some(b),
        });
        Link {
            name: "root".into(),
            next: Some(a),
        }
    }

    #[test]
    fn primitives_and_envelope() {
        let mut encoder = Encoder::new();
        assert_eq!(encoder.encode(&42_i32).unwrap(), r#"{"value":42}"#);
        assert_eq!(encoder.encode(&1.0_f64).unwrap(), r#"{"value":1}"#);
        assert_eq!(encoder.encode(&'x').unwrap(), r#"{"value":"x"}"#);
        assert_eq!(
            encoder.encode(&String::from("hi")).unwrap(),
            r#"{"value":"hi"}"#
        );
    }

    #[test]
    fn post_order_ids() {
        let text = Encoder::new().encode(&chain()).unwrap();
        assert_eq!(
            text,
            concat!(
                r#"{"value":{"name":"root","next":{"pointer":3,"value":{"name":"a","next":"#,
                r#"{"pointer":2,"value":{"name":"b","next":{"pointer":1,"value":{"name":"c","#,
                r#""next":{"value":null}}}}}}}}}"#
            )
        );
    }

    #[test]
    fn nil_containers() {
        let mut encoder = Encoder::new();
        assert_eq!(encoder.encode(&None::<Vec<u8>>).unwrap(), r#"{"value":null}"#);
        assert_eq!(encoder.encode(&Some(Vec::<u8>::new())).unwrap(), r#"{"value":[]}"#);
        assert_eq!(
            encoder.encode(&None::<BTreeMap<String, u8>>).unwrap(),
            r#"{"value":null}"#
        );
    }

    #[test]
    fn maps_are_sorted() {
        let mut map = BTreeMap::new();
        map.insert(10_i32, true);
        map.insert(9_i32, false);
        assert_eq!(
            Encoder::new().encode(&map).unwrap(),
            r#"{"value":{"10":true,"9":false}}"#
        );
    }

    #[test]
    fn options_on_fields() {
        let sparse = Sparse {
            quoted: 5,
            ..Sparse::default()
        };
        assert_eq!(
            Encoder::new().encode(&sparse).unwrap(),
            r#"{"value":{"inner":{"real":0,"imag":0},"n":"5"}}"#
        );

        let full = Sparse {
            count: 2,
            items: Some(vec![1]),
            ..Sparse::default()
        };
        assert_eq!(
            Encoder::new().encode(&full).unwrap(),
            r#"{"value":{"count":2,"items":[1],"inner":{"real":0,"imag":0},"n":"0"}}"#
        );
    }

    #[derive(Reflect, PartialEq)]
    struct Weight {
        w: f64,
    }

    impl Eq for Weight {}

    impl PartialOrd for Weight {
        fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
            Some(self.cmp(other))
        }
    }

    impl Ord for Weight {
        fn cmp(&self, other: &Self) -> Ordering {
            self.w.total_cmp(&other.w)
        }
    }

    #[test]
    fn map_key_errors_carry_the_entry() {
        let map = BTreeMap::from([(Weight { w: 1.0 }, 1_u8), (Weight { w: f64::NAN }, 2)]);
        let err = Encoder::new().encode(&map).unwrap_err();
        assert!(matches!(err.kind(), ErrorKind::UnsupportedKind { .. }));
        assert!(err.to_string().starts_with("at $[1].w: "), "{err}");
    }

    #[test]
    fn non_finite_float() {
        let err = Encoder::new().encode(&vec![1.0_f64, f64::NAN]).unwrap_err();
        assert!(matches!(err.kind(), ErrorKind::UnsupportedKind { .. }));
        assert!(err.to_string().starts_with("at $[1]: "));
    }

    #[test]
    fn indented() {
        let mut encoder = Encoder::with_options(EncoderOptions::new().with_indent("  "));
        assert_eq!(
            encoder.encode(&vec![1_u8, 2]).unwrap(),
            "{\n  \"value\": [\n    1,\n    2\n  ]\n}"
        );
    }
}
