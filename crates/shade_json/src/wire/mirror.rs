use alloc::boxed::Box;
use alloc::vec::Vec;
use core::any::TypeId;
use std::sync::{PoisonError, RwLock};

use shade_reflect::info::{StructInfo, TypeInfo};
use shade_utils::TypeIdMap;

use crate::error::{Error, ErrorKind, PathSegment};
use crate::wire::field_mapper::{FieldMapping, map_field};
use crate::wire::{WireField, WireType};

// Leaked on insertion, never invalidated.
static CACHE: RwLock<TypeIdMap<&'static WireType>> = RwLock::new(TypeIdMap::new());

/// Returns the wire type of `info`, mirroring it on first use.
///
/// Children are mirrored as well, except pointees which are mirrored when a
/// pointer is first followed. A type already being mirrored further up the
/// stack is accepted as is, so recursive types terminate.
///
/// Failures are not cached.
pub fn wire_type_for(info: &'static TypeInfo) -> Result<&'static WireType, Error> {
    match cached(info.ty_id()) {
        Some(wire) => Ok(wire),
        None => mirror(info, &mut Vec::new()),
    }
}

fn cached(type_id: TypeId) -> Option<&'static WireType> {
    CACHE
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .get(&type_id)
        .copied()
}

fn publish(type_id: TypeId, wire: WireType) -> &'static WireType {
    *CACHE
        .write()
        .unwrap_or_else(PoisonError::into_inner)
        .get_or_insert(type_id, || Box::leak(Box::new(wire)))
}

fn mirror(info: &'static TypeInfo, stack: &mut Vec<TypeId>) -> Result<&'static WireType, Error> {
    let type_id = info.ty_id();
    stack.push(type_id);
    let built = build(info, stack);
    stack.pop();

    let wire = publish(type_id, built?);
    log::debug!("mirrored `{}` as {}", info.type_path(), wire.kind_name());
    Ok(wire)
}

fn visit(info: &'static TypeInfo, stack: &mut Vec<TypeId>) -> Result<(), Error> {
    let type_id = info.ty_id();
    if stack.contains(&type_id) || cached(type_id).is_some() {
        return Ok(());
    }
    mirror(info, stack).map(|_| ())
}

fn build(info: &'static TypeInfo, stack: &mut Vec<TypeId>) -> Result<WireType, Error> {
    let wire = match info {
        TypeInfo::Opaque(opaque) => match opaque.codec() {
            Some(_) => WireType::RawPayload,
            None => {
                return Err(ErrorKind::UnsupportedKind {
                    type_path: info.type_path(),
                    reason: "opaque types need a serde codec",
                }
                .into());
            }
        },
        TypeInfo::Interface(_) => WireType::InterfaceBox,
        TypeInfo::Pointer(_) => WireType::PointerBox,
        TypeInfo::List(list) => {
            visit(list.item_info(), stack)?;
            WireType::Slice {
                elem: list.item_info(),
            }
        }
        TypeInfo::Array(array) => {
            visit(array.item_info(), stack)?;
            WireType::Array {
                elem: array.item_info(),
                len: array.capacity(),
            }
        }
        TypeInfo::Map(map) => {
            visit(map.key_info(), stack)?;
            visit(map.value_info(), stack)?;
            WireType::Map {
                key: map.key_info(),
                value: map.value_info(),
                textual_key: !matches!(map.key_info(), TypeInfo::Primitive(_)),
            }
        }
        TypeInfo::Complex(_) => WireType::ComplexBox,
        TypeInfo::Primitive(primitive) => WireType::Primitive(primitive.primitive_kind()),
        TypeInfo::Struct(info) => build_struct(info, stack)?,
    };
    Ok(wire)
}

fn build_struct(info: &'static StructInfo, stack: &mut Vec<TypeId>) -> Result<WireType, Error> {
    let mut fields: Vec<WireField> = Vec::with_capacity(info.field_len());

    for (index, field) in info.iter().enumerate() {
        let FieldMapping::Include { wire_name, options } = map_field(field) else {
            continue;
        };

        if let Some(first) = fields.iter().find(|f| f.wire_name() == wire_name) {
            return Err(ErrorKind::DuplicateWireName {
                name: wire_name,
                first: first.name(),
                second: field.name(),
            }
            .into());
        }

        visit(field.type_info(), stack)
            .map_err(|err| err.at(PathSegment::Field(wire_name.clone())))?;
        fields.push(WireField::new(
            wire_name,
            field.name(),
            index,
            options,
            field.type_info(),
        ));
    }

    Ok(WireType::Struct(fields.into_boxed_slice()))
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use alloc::collections::BTreeMap;
    use alloc::rc::Rc;
    use alloc::string::{String, ToString};
    use alloc::vec::Vec;

    use shade_reflect::derive::Reflect;
    use shade_reflect::info::{PrimitiveKind, Typed};

    use super::wire_type_for;
    use crate::error::ErrorKind;
    use crate::wire::WireType;

    #[derive(Reflect)]
    #[allow(dead_code)]
    struct Node {
        label: String,
        children: Vec<Node>,
        parent: Option<Rc<Node>>,
    }

    #[derive(Reflect)]
    #[allow(dead_code)]
    struct Clash {
        #[reflect(tag(json = "same"))]
        field1: i32,
        #[reflect(tag(json = "same"))]
        field2: i32,
    }

    #[derive(Reflect)]
    #[allow(dead_code)]
    struct WithCallback {
        id: u32,
        callback: fn() -> u32,
    }

    #[derive(Reflect)]
    #[allow(dead_code)]
    struct SkipsCallback {
        id: u32,
        #[reflect(tag(json = "-"))]
        callback: fn() -> u32,
    }

    #[derive(Reflect, PartialEq, Eq, PartialOrd, Ord)]
    #[allow(dead_code)]
    struct Point {
        x: i32,
        y: i32,
    }

    #[test]
    fn recursive_struct() {
        let wire = wire_type_for(Node::type_info()).unwrap();
        let WireType::Struct(fields) = wire else {
            panic!("expected a struct");
        };
        let names: Vec<&str> = fields.iter().map(|f| f.wire_name()).collect();
        assert_eq!(names, ["label", "children", "parent"]);
        assert!(matches!(
            wire_type_for(fields[1].type_info()).unwrap(),
            WireType::Slice { .. }
        ));
        assert!(matches!(
            wire_type_for(fields[2].type_info()).unwrap(),
            WireType::PointerBox
        ));
        // memoized
        assert!(core::ptr::eq(wire, wire_type_for(Node::type_info()).unwrap()));
    }

    #[test]
    fn leaves() {
        assert!(matches!(
            wire_type_for(f64::type_info()).unwrap(),
            WireType::Primitive(PrimitiveKind::F64)
        ));
        assert!(matches!(
            wire_type_for(<[u8; 3]>::type_info()).unwrap(),
            WireType::Array { len: 3, .. }
        ));
        assert!(matches!(
            wire_type_for(shade_reflect::num::Complex64::type_info()).unwrap(),
            WireType::ComplexBox
        ));
    }

    #[test]
    fn map_keys() {
        let textual = wire_type_for(<BTreeMap<String, i32>>::type_info()).unwrap();
        assert!(matches!(textual, WireType::Map { textual_key: false, .. }));

        let structured = wire_type_for(<BTreeMap<Point, i32>>::type_info()).unwrap();
        assert!(matches!(structured, WireType::Map { textual_key: true, .. }));
    }

    #[test]
    fn duplicate_wire_name() {
        let err = wire_type_for(Clash::type_info()).unwrap_err();
        assert!(matches!(
            err.kind(),
            ErrorKind::DuplicateWireName { name, first: "field1", second: "field2" } if name == "same"
        ));
        assert_eq!(
            err.to_string(),
            r#"at $: duplicate JSON field name "same" (struct fields "field1" and "field2")"#
        );
    }

    #[test]
    fn function_fields() {
        let err = wire_type_for(WithCallback::type_info()).unwrap_err();
        assert!(matches!(err.kind(), ErrorKind::UnsupportedKind { .. }));
        assert!(err.to_string().starts_with("at $.callback: unsupported type"));

        let WireType::Struct(fields) = wire_type_for(SkipsCallback::type_info()).unwrap() else {
            panic!("expected a struct");
        };
        assert_eq!(fields.len(), 1);
        assert_eq!(fields[0].name(), "id");
    }
}
