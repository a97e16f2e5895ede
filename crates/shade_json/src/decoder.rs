use alloc::boxed::Box;
use alloc::string::ToString;
use alloc::vec::Vec;
use core::any::{Any, type_name};
use core::fmt;

use shade_reflect::Reflect;
use shade_reflect::info::{OpaqueInfo, PrimitiveKind, TypeInfo, Typed};
use shade_reflect::ops::{Array, Interface, List, Map, Pointer, PointerError, Struct};
use shade_reflect::resolver::{self, ResolveError, TypeResolver};
use shade_utils::hash::HashMap;

use crate::boxes::{ComplexBox, InterfaceBox, PointerBox};
use crate::error::{Error, ErrorKind, PathSegment};
use crate::wire::printer::render_compact;
use crate::wire::{Number, WireField, WireType, WireValue, wire_type_for};

// -----------------------------------------------------------------------------
// Decoder

/// Rebuilds values from enveloped JSON text.
///
/// Pointer ids are remembered across calls, so documents produced by one
/// [`Encoder`](crate::Encoder) and decoded in order by one decoder share
/// allocations the same way the encoded values did.
///
/// Interface payloads naming anything but a primitive or a complex number need a
/// [`TypeResolver`], see [`Decoder::with_resolver`].
#[derive(Default)]
pub struct Decoder {
    resolver: Option<Box<dyn TypeResolver>>,
    pointers: HashMap<u64, Box<dyn Any>>,
    // ids bound by the document in progress
    bound: Vec<u64>,
}

impl Decoder {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Uses `resolver` to find the concrete types of interface payloads.
    pub fn with_resolver(mut self, resolver: impl TypeResolver + 'static) -> Self {
        self.set_resolver(resolver);
        self
    }

    pub fn set_resolver(&mut self, resolver: impl TypeResolver + 'static) {
        self.resolver = Some(Box::new(resolver));
    }

    /// Decodes an enveloped document into a fresh `T`.
    ///
    /// Nothing is handed over unless the whole document decodes.
    pub fn decode<T: Reflect + Typed>(&mut self, text: &str) -> Result<T, Error> {
        self.decode_dyn(text, T::type_info())?
            .take::<T>()
            .map_err(|value| rejected(T::type_info(), &*value))
    }

    /// Decodes an enveloped document into a fresh value of the type `info` describes.
    pub fn decode_dyn(
        &mut self,
        text: &str,
        info: &'static TypeInfo,
    ) -> Result<Box<dyn Reflect>, Error> {
        static NULL: WireValue = WireValue::Null;

        let document: WireValue = serde_json::from_str(text)?;
        let WireValue::Object(_) = document else {
            return Err(ErrorKind::mismatch("envelope object", document.kind_name()).into());
        };
        self.decode_value(document.get("value").unwrap_or(&NULL), info)
    }

    /// Decodes a bare payload, see [`Encoder::encode_value`](crate::Encoder::encode_value).
    ///
    /// Pointer ids bound by a payload that fails to decode are forgotten.
    pub fn decode_value(
        &mut self,
        wire: &WireValue,
        info: &'static TypeInfo,
    ) -> Result<Box<dyn Reflect>, Error> {
        self.bound.clear();
        let decoded =
            wire_type_for(info).and_then(|wire_type| self.decode_fresh(wire, info, wire_type));
        if decoded.is_err() {
            for id in self.bound.drain(..) {
                self.pointers.remove(&id);
            }
        }
        decoded
    }

    fn decode_as(
        &mut self,
        wire: &WireValue,
        wire_type: &'static WireType,
        dest: &mut dyn Reflect,
    ) -> Result<(), Error> {
        match wire_type {
            WireType::RawPayload => decode_raw(wire, dest),
            WireType::Primitive(kind) => decode_primitive(wire, *kind, dest),
            WireType::Struct(fields) => {
                self.decode_struct(wire, fields, dest.reflect_mut().as_struct()?)
            }
            WireType::Slice { elem } => {
                self.decode_list(wire, *elem, dest.reflect_mut().as_list()?)
            }
            WireType::Array { elem, .. } => {
                self.decode_array(wire, *elem, dest.reflect_mut().as_array()?)
            }
            WireType::Map {
                key,
                value,
                textual_key,
            } => self.decode_map(
                wire,
                (*key, *value, *textual_key),
                dest.reflect_mut().as_map()?,
            ),
            WireType::PointerBox => self.decode_pointer(wire, dest.reflect_mut().as_pointer()?),
            WireType::InterfaceBox => {
                self.decode_interface(wire, dest.reflect_mut().as_interface()?)
            }
            WireType::ComplexBox => {
                let complex = dest.reflect_mut().as_complex()?;
                if !wire.is_null() {
                    let parts = ComplexBox::decode(wire)?;
                    complex.set_parts(parts.real, parts.imag);
                }
                Ok(())
            }
        }
    }

    /// Decodes into a fresh zero value of `info`.
    fn decode_fresh(
        &mut self,
        wire: &WireValue,
        info: &'static TypeInfo,
        wire_type: &'static WireType,
    ) -> Result<Box<dyn Reflect>, Error> {
        let mut value = zero_value(info)?;
        self.decode_as(wire, wire_type, value.as_mut())?;
        Ok(value)
    }

    fn decode_struct(
        &mut self,
        wire: &WireValue,
        fields: &'static [WireField],
        dest: &mut dyn Struct,
    ) -> Result<(), Error> {
        let entries = match wire {
            WireValue::Null => return Ok(()),
            WireValue::Object(entries) => entries,
            other => return Err(ErrorKind::mismatch("object", other.kind_name()).into()),
        };

        for (key, entry) in entries {
            // Unknown keys are ignored.
            let Some(field) = find_field(fields, key) else {
                continue;
            };
            let at = |err: Error| err.at(PathSegment::Field(field.wire_name().into()));

            let wire_type = wire_type_for(field.type_info()).map_err(at)?;
            let unquoted;
            let entry = match entry {
                WireValue::String(text)
                    if field.quoted() && matches!(wire_type, WireType::Primitive(_)) =>
                {
                    unquoted = serde_json::from_str::<WireValue>(text)
                        .map_err(|err| at(err.into()))?;
                    &unquoted
                }
                entry => entry,
            };

            let Some(slot) = dest.field_at_mut(field.index()) else {
                let missing = ErrorKind::mismatch(
                    field.type_info().type_path(),
                    format_args!("no field `{}`", field.name()),
                );
                return Err(at(missing.into()));
            };
            self.decode_as(entry, wire_type, slot).map_err(at)?;
        }
        Ok(())
    }

    fn decode_list(
        &mut self,
        wire: &WireValue,
        elem: &'static TypeInfo,
        dest: &mut dyn List,
    ) -> Result<(), Error> {
        let items = match wire {
            WireValue::Null => {
                dest.set_nil();
                return Ok(());
            }
            WireValue::Array(items) => items,
            other => return Err(ErrorKind::mismatch("array", other.kind_name()).into()),
        };

        let elem_wire = wire_type_for(elem)?;
        dest.clear();
        for (index, item) in items.iter().enumerate() {
            let value = self
                .decode_fresh(item, elem, elem_wire)
                .map_err(|err| err.at(PathSegment::Index(index)))?;
            dest.push(value).map_err(|value| rejected(elem, &*value))?;
        }
        Ok(())
    }

    /// Missing trailing elements are reset to zero, extra ones are ignored.
    fn decode_array(
        &mut self,
        wire: &WireValue,
        elem: &'static TypeInfo,
        dest: &mut dyn Array,
    ) -> Result<(), Error> {
        let items = match wire {
            WireValue::Null => return Ok(()),
            WireValue::Array(items) => items,
            other => return Err(ErrorKind::mismatch("array", other.kind_name()).into()),
        };

        let elem_wire = wire_type_for(elem)?;
        for index in 0..dest.len() {
            let at = |err: Error| err.at(PathSegment::Index(index));
            let Some(slot) = dest.get_mut(index) else {
                break;
            };
            match items.get(index) {
                Some(item) => self.decode_as(item, elem_wire, slot).map_err(at)?,
                None => {
                    let zero = zero_value(elem).map_err(at)?;
                    slot.set(zero).map_err(|value| at(rejected(elem, &*value)))?;
                }
            }
        }
        Ok(())
    }

    fn decode_map(
        &mut self,
        wire: &WireValue,
        (key, value, textual_key): (&'static TypeInfo, &'static TypeInfo, bool),
        dest: &mut dyn Map,
    ) -> Result<(), Error> {
        let entries = match wire {
            WireValue::Null => {
                dest.set_nil();
                return Ok(());
            }
            WireValue::Object(entries) => entries,
            other => return Err(ErrorKind::mismatch("object", other.kind_name()).into()),
        };

        let key_wire = wire_type_for(key)?;
        let value_wire = wire_type_for(value)?;
        dest.clear();

        for (text, entry) in entries {
            let at = |err: Error| err.at(PathSegment::Key(text.clone()));

            let parsed_key = match key_wire {
                WireType::Primitive(kind) if !textual_key => key_from_text(text, *kind),
                _ => serde_json::from_str(text).map_err(ErrorKind::malformed),
            }
            .map_err(|kind| at(kind.into()))?;

            let k = self.decode_fresh(&parsed_key, key, key_wire).map_err(at)?;
            let v = self.decode_fresh(entry, value, value_wire).map_err(at)?;
            dest.insert(k, v).map_err(|rejected_value| at(rejected(value, &*rejected_value)))?;
        }
        Ok(())
    }

    fn decode_pointer(&mut self, wire: &WireValue, dest: &mut dyn Pointer) -> Result<(), Error> {
        let boxed = PointerBox::decode(wire)?;

        if let Some(id) = boxed.id
            && let Some(handle) = self.pointers.get(&id)
        {
            log::trace!("re-binding pointer id {id}");
            return dest.set_handle(&**handle).map_err(pointer_error);
        }

        if boxed.is_null() {
            return dest.set_null().map_err(pointer_error);
        }

        let pointee = dest.reflect_type_info().as_pointer()?.pointee_info();
        let pointee_wire = wire_type_for(pointee)?;
        let value = self
            .decode_fresh(boxed.value, pointee, pointee_wire)
            .map_err(|err| err.at(PathSegment::Pointee))?;
        dest.set_pointee(value).map_err(pointer_error)?;

        if let (Some(id), Some(handle)) = (boxed.id, dest.handle()) {
            log::trace!("bound pointer id {id}");
            self.pointers.insert(id, handle);
            self.bound.push(id);
        }
        Ok(())
    }

    fn decode_interface(
        &mut self,
        wire: &WireValue,
        dest: &mut dyn Interface,
    ) -> Result<(), Error> {
        let Some(boxed) = InterfaceBox::decode(wire)? else {
            dest.set_value(None);
            return Ok(());
        };

        let mut info = self.resolve(&boxed)?;
        for _ in 0..boxed.ptr_depth {
            info = match (resolver::builtin_pointer_to(info), &self.resolver) {
                (Some(pointer), _) => pointer,
                (None, Some(resolver)) => resolver.pointer_to(info).ok_or_else(|| {
                    ResolveError::new(boxed.namespace, boxed.name, boxed.fallback)
                })?,
                (None, None) => {
                    return Err(ErrorKind::MissingTypeResolver {
                        descriptor: boxed.describe(),
                    }
                    .into());
                }
            };
        }

        let value = wire_type_for(info)
            .and_then(|wire_type| self.decode_fresh(boxed.value, info, wire_type))
            .map_err(|err| err.at(PathSegment::Interface))?;
        dest.set_value(Some(value));
        Ok(())
    }

    /// Finds the base type of an interface payload, pointer layers excluded.
    fn resolve(&self, boxed: &InterfaceBox<'_>) -> Result<&'static TypeInfo, Error> {
        if let Some(info) = resolver::builtin(boxed.namespace, boxed.name) {
            return Ok(info);
        }
        let Some(resolver) = &self.resolver else {
            return Err(ErrorKind::MissingTypeResolver {
                descriptor: boxed.describe(),
            }
            .into());
        };
        Ok(resolver.resolve(boxed.namespace, boxed.name, boxed.fallback)?)
    }
}

impl fmt::Debug for Decoder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Decoder")
            .field("has_resolver", &self.resolver.is_some())
            .field("pointers", &self.pointers.len())
            .finish()
    }
}

// -----------------------------------------------------------------------------
// Helpers

fn zero_value(info: &'static TypeInfo) -> Result<Box<dyn Reflect>, Error> {
    info.zero().ok_or_else(|| {
        ErrorKind::UnsupportedKind {
            type_path: info.type_path(),
            reason: "the type has no zero value to decode into",
        }
        .into()
    })
}

fn rejected(expected: &'static TypeInfo, found: &dyn Reflect) -> Error {
    ErrorKind::mismatch(expected.type_path(), found.reflect_type_path()).into()
}

fn pointer_error(err: PointerError) -> Error {
    let (expected, found) = match err {
        PointerError::NotNullable { type_path } => (type_path, "null"),
        PointerError::HandleMismatch { type_path } => (type_path, "a handle of another type"),
        PointerError::PointeeMismatch { type_path, found } => (type_path, found),
    };
    ErrorKind::mismatch(expected, found).into()
}

/// Matches exactly first, then ignoring case.
fn find_field<'a>(fields: &'a [WireField], key: &str) -> Option<&'a WireField> {
    fields.iter().find(|field| field.wire_name() == key).or_else(|| {
        let folded = |s: &'a str| s.chars().flat_map(char::to_lowercase);
        fields.iter().find(|field| {
            folded(field.wire_name()).eq(key.chars().flat_map(char::to_lowercase))
        })
    })
}

fn key_from_text(text: &str, kind: PrimitiveKind) -> Result<WireValue, ErrorKind> {
    if kind.is_textual() {
        return Ok(WireValue::String(text.into()));
    }
    match serde_json::from_str::<WireValue>(text) {
        Ok(key @ (WireValue::Bool(_) | WireValue::Number(_))) => Ok(key),
        _ => Err(ErrorKind::mismatch(kind, format_args!("map key {text:?}"))),
    }
}

fn decode_primitive(
    wire: &WireValue,
    kind: PrimitiveKind,
    dest: &mut dyn Reflect,
) -> Result<(), Error> {
    let value: Box<dyn Reflect> = match (kind, wire) {
        // `null` leaves a primitive untouched.
        (_, WireValue::Null) => return Ok(()),
        (PrimitiveKind::Bool, WireValue::Bool(v)) => Box::new(*v),
        (PrimitiveKind::String, WireValue::String(v)) => Box::new(v.clone()),
        (PrimitiveKind::Char, WireValue::String(v)) => {
            let mut chars = v.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => Box::new(c),
                _ => return Err(ErrorKind::mismatch("char", format_args!("string {v:?}")).into()),
            }
        }
        (PrimitiveKind::F32, WireValue::Number(n)) => Box::new(n.as_f64() as f32),
        (PrimitiveKind::F64, WireValue::Number(n)) => Box::new(n.as_f64()),
        (PrimitiveKind::I8, WireValue::Number(n)) => Box::new(integer::<i8>(*n)?),
        (PrimitiveKind::I16, WireValue::Number(n)) => Box::new(integer::<i16>(*n)?),
        (PrimitiveKind::I32, WireValue::Number(n)) => Box::new(integer::<i32>(*n)?),
        (PrimitiveKind::I64, WireValue::Number(n)) => Box::new(integer::<i64>(*n)?),
        (PrimitiveKind::Isize, WireValue::Number(n)) => Box::new(integer::<isize>(*n)?),
        (PrimitiveKind::U8, WireValue::Number(n)) => Box::new(integer::<u8>(*n)?),
        (PrimitiveKind::U16, WireValue::Number(n)) => Box::new(integer::<u16>(*n)?),
        (PrimitiveKind::U32, WireValue::Number(n)) => Box::new(integer::<u32>(*n)?),
        (PrimitiveKind::U64, WireValue::Number(n)) => Box::new(integer::<u64>(*n)?),
        (PrimitiveKind::Usize, WireValue::Number(n)) => Box::new(integer::<usize>(*n)?),
        (kind, other) => return Err(ErrorKind::mismatch(kind, other.kind_name()).into()),
    };

    let expected = dest.reflect_type_path();
    dest.set(value)
        .map_err(|value| ErrorKind::mismatch(expected, value.reflect_type_path()).into())
}

/// Integers never accept fractional or exponent literals.
fn integer<T>(number: Number) -> Result<T, ErrorKind>
where
    T: TryFrom<i64> + TryFrom<u64>,
{
    let converted = match number {
        Number::Int(v) => <T as TryFrom<i64>>::try_from(v).ok(),
        Number::Uint(v) => <T as TryFrom<u64>>::try_from(v).ok(),
        Number::F32(_) | Number::F64(_) => None,
    };
    converted.ok_or_else(|| ErrorKind::mismatch(type_name::<T>(), format_args!("number {number}")))
}

fn decode_raw(wire: &WireValue, dest: &mut dyn Reflect) -> Result<(), Error> {
    let info = dest.reflect_type_info();
    let Some(codec) = info.as_opaque().ok().and_then(OpaqueInfo::codec) else {
        return Err(ErrorKind::UnsupportedKind {
            type_path: info.type_path(),
            reason: "opaque types need a serde codec",
        }
        .into());
    };

    let text = render_compact(wire)?;
    let mut deserializer = serde_json::Deserializer::from_str(&text);
    let value = codec
        .deserialize(&mut deserializer)
        .map_err(|err| ErrorKind::CustomCodeFailure {
            type_path: info.type_path(),
            message: err.to_string(),
        })?;

    dest.set(value)
        .map_err(|value| ErrorKind::mismatch(info.type_path(), value.reflect_type_path()).into())
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

    use shade_reflect::Reflect;
    use shade_reflect::derive::Reflect;

    use super::Decoder;
    use crate::error::ErrorKind;

    #[derive(Reflect, Default, Debug, PartialEq)]
    #[reflect(default)]
    struct Config {
        name: String,
        #[reflect(tag(json = "max_retries"))]
        retries: u8,
        tags: Option<Vec<String>>,
        #[reflect(tag(json = "limit,string"))]
        limit: i64,
    }

    #[test]
    fn primitives() {
        let mut decoder = Decoder::new();
        assert_eq!(decoder.decode::<i32>(r#"{"value":-5}"#).unwrap(), -5);
        assert_eq!(decoder.decode::<f32>(r#"{"value":2}"#).unwrap(), 2.0);
        assert_eq!(decoder.decode::<char>(r#"{"value":"é"}"#).unwrap(), 'é');
        assert_eq!(decoder.decode::<u64>(r#"{"value":null}"#).unwrap(), 0);
    }

    #[test]
    fn integer_rules() {
        let mut decoder = Decoder::new();
        let err = decoder.decode::<u8>(r#"{"value":300}"#).unwrap_err();
        assert!(matches!(err.kind(), ErrorKind::TypeMismatch { .. }));
        let err = decoder.decode::<i32>(r#"{"value":1.5}"#).unwrap_err();
        assert_eq!(
            err.to_string(),
            "at $: type mismatch: expected i32, found number 1.5"
        );
        assert!(decoder.decode::<i32>(r#"{"value":"1"}"#).is_err());
    }

    #[test]
    fn struct_fields() {
        let text = r#"{"value":{"NAME":"svc","max_retries":3,"unknown":[1],"limit":"12"}}"#;
        let config: Config = Decoder::new().decode(text).unwrap();
        assert_eq!(
            config,
            Config {
                name: "svc".into(),
                retries: 3,
                tags: None,
                limit: 12,
            }
        );

        let text = r#"{"value":{"tags":[]}}"#;
        let config: Config = Decoder::new().decode(text).unwrap();
        assert_eq!(config.tags, Some(vec![]));
    }

    #[test]
    fn arrays_and_maps() {
        let mut decoder = Decoder::new();
        let short: [u8; 3] = decoder.decode(r#"{"value":[7]}"#).unwrap();
        assert_eq!(short, [7, 0, 0]);
        let long: [u8; 2] = decoder.decode(r#"{"value":[1,2,3]}"#).unwrap();
        assert_eq!(long, [1, 2]);

        let map: BTreeMap<i32, bool> =
            decoder.decode(r#"{"value":{"9":false,"10":true}}"#).unwrap();
        assert_eq!(map, BTreeMap::from([(9, false), (10, true)]));

        let map: Option<BTreeMap<String, u8>> = decoder.decode(r#"{"value":null}"#).unwrap();
        assert_eq!(map, None);
    }

    #[test]
    fn pointers() {
        let mut decoder = Decoder::new();
        let pair: Vec<Rc<i64>> = decoder
            .decode(r#"{"value":[{"pointer":1,"value":4},{"pointer":1,"value":4}]}"#)
            .unwrap();
        assert!(Rc::ptr_eq(&pair[0], &pair[1]));

        let nil: Option<Rc<i64>> = decoder.decode(r#"{"value":{"value":null}}"#).unwrap();
        assert!(nil.is_none());

        let err = decoder.decode::<Rc<i64>>(r#"{"value":{"value":null}}"#).unwrap_err();
        assert!(matches!(err.kind(), ErrorKind::TypeMismatch { .. }));
    }

    #[test]
    fn interfaces() {
        let mut decoder = Decoder::new();
        let slot: Option<Box<dyn Reflect>> = decoder
            .decode(r#"{"value":{"typeName":"i64","value":42}}"#)
            .unwrap();
        assert_eq!(slot.unwrap().downcast_ref::<i64>(), Some(&42));

        let err = decoder
            .decode::<Option<Box<dyn Reflect>>>(
                r#"{"value":{"pkgPath":"app","typeName":"Config","value":{}}}"#,
            )
            .unwrap_err();
        assert!(matches!(err.kind(), ErrorKind::MissingTypeResolver { .. }));
        assert_eq!(
            err.to_string(),
            "at $: no type resolver configured to resolve `app::Config`"
        );
    }

    #[test]
    fn pointers_to_null_payloads() {
        let mut decoder = Decoder::new();
        let empty: Rc<Option<Vec<u8>>> = decoder
            .decode(r#"{"value":{"pointer":1,"value":null}}"#)
            .unwrap();
        assert_eq!(*empty, None);

        let again: Option<Rc<Option<Vec<u8>>>> = decoder
            .decode(r#"{"value":{"pointer":1,"value":null}}"#)
            .unwrap();
        assert!(Rc::ptr_eq(again.as_ref().unwrap(), &empty));
    }

    #[test]
    fn builtin_pointers_in_interfaces() {
        let text = r#"{"value":{"ptrDepth":1,"typeName":"i64","value":{"pointer":1,"value":42}}}"#;
        let slot: Option<Box<dyn Reflect>> = Decoder::new().decode(text).unwrap();
        let value = slot.unwrap().take::<Rc<i64>>().unwrap();
        assert_eq!(*value, 42);

        let text = r#"{"value":{"ptrDepth":2,"typeName":"i64","value":{"pointer":2,"value":{"pointer":1,"value":42}}}}"#;
        let err = Decoder::new()
            .decode::<Option<Box<dyn Reflect>>>(text)
            .unwrap_err();
        assert!(matches!(err.kind(), ErrorKind::MissingTypeResolver { .. }));
    }

    #[test]
    fn failed_documents_bind_nothing() {
        let mut decoder = Decoder::new();
        let err = decoder
            .decode::<Vec<Rc<i64>>>(r#"{"value":[{"pointer":1,"value":4},{"pointer":2,"value":1.5}]}"#)
            .unwrap_err();
        assert!(matches!(err.kind(), ErrorKind::TypeMismatch { .. }));

        let fresh: Rc<i64> = decoder
            .decode(r#"{"value":{"pointer":1,"value":9}}"#)
            .unwrap();
        assert_eq!(*fresh, 9);
    }

    #[test]
    fn malformed_text() {
        let err = Decoder::new().decode::<i32>("{\"value\":").unwrap_err();
        assert!(matches!(err.kind(), ErrorKind::MalformedPayload(_)));
        let err = Decoder::new().decode::<i32>("[1]").unwrap_err();
        assert!(matches!(err.kind(), ErrorKind::TypeMismatch { .. }));
    }
}
