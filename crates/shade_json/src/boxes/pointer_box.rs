use crate::boxes::{expect_object, read_count};
use crate::error::ErrorKind;
use crate::wire::{Number, WireValue};

/// A pointer on the wire.
///
/// Every non-nil box carries the reference id of its allocation, and every
/// occurrence repeats the full payload. A nil pointer is `{"value": null}`.
/// A box with an id is never nil, even when its payload is `null`.
#[derive(Debug, Clone, Copy)]
pub(crate) struct PointerBox<'a> {
    pub id: Option<u64>,
    pub value: &'a WireValue,
}

impl<'a> PointerBox<'a> {
    pub const POINTER: &'static str = "pointer";
    pub const VALUE: &'static str = "value";

    pub fn null() -> WireValue {
        WireValue::object([(Self::VALUE, WireValue::Null)])
    }

    pub fn encode(id: u64, value: WireValue) -> WireValue {
        WireValue::object([
            (Self::POINTER, WireValue::Number(Number::Uint(id))),
            (Self::VALUE, value),
        ])
    }

    /// Reads a box. A bare `null`, a missing id and id `0` all mean no id.
    pub fn decode(wire: &'a WireValue) -> Result<Self, ErrorKind> {
        static NULL: WireValue = WireValue::Null;

        if wire.is_null() {
            return Ok(Self {
                id: None,
                value: &NULL,
            });
        }

        let mut id = None;
        let mut value = &NULL;
        for (key, entry) in expect_object(wire, "pointer box")? {
            match key.as_str() {
                Self::POINTER => id = Some(read_count(entry, Self::POINTER)?).filter(|&id| id != 0),
                Self::VALUE => value = entry,
                _ => {}
            }
        }
        Ok(Self { id, value })
    }

    #[inline]
    pub fn is_null(&self) -> bool {
        self.id.is_none() && self.value.is_null()
    }
}

#[cfg(test)]
mod tests {
    use super::PointerBox;
    use crate::wire::{Number, WireValue};

    #[test]
    fn shapes() {
        let boxed = PointerBox::encode(3, WireValue::Bool(true));
        let decoded = PointerBox::decode(&boxed).unwrap();
        assert_eq!(decoded.id, Some(3));
        assert_eq!(decoded.value, &WireValue::Bool(true));

        let null = PointerBox::null();
        assert_eq!(null, WireValue::object([("value", WireValue::Null)]));
        assert!(PointerBox::decode(&null).unwrap().is_null());
        assert!(PointerBox::decode(&WireValue::Null).unwrap().is_null());

        let boxed = PointerBox::encode(2, WireValue::Null);
        assert!(!PointerBox::decode(&boxed).unwrap().is_null());
    }

    #[test]
    fn rejects_bad_ids() {
        let boxed = WireValue::object([("pointer", WireValue::Number(Number::Int(-1)))]);
        assert!(PointerBox::decode(&boxed).is_err());
        assert!(PointerBox::decode(&WireValue::Bool(false)).is_err());
    }
}
