use crate::boxes::expect_object;
use crate::error::ErrorKind;
use crate::wire::{Number, WireValue};

/// A complex number on the wire, always with `f64` parts.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct ComplexBox {
    pub real: f64,
    pub imag: f64,
}

impl ComplexBox {
    pub fn encode(self) -> WireValue {
        WireValue::object([
            ("real", WireValue::Number(Number::F64(self.real))),
            ("imag", WireValue::Number(Number::F64(self.imag))),
        ])
    }

    /// Reads a box; missing parts are zero.
    pub fn decode(wire: &WireValue) -> Result<Self, ErrorKind> {
        let mut parts = Self {
            real: 0.0,
            imag: 0.0,
        };
        for (key, entry) in expect_object(wire, "complex box")? {
            let slot = match key.as_str() {
                "real" => &mut parts.real,
                "imag" => &mut parts.imag,
                _ => continue,
            };
            *slot = match entry {
                WireValue::Number(number) => number.as_f64(),
                WireValue::Null => 0.0,
                other => return Err(ErrorKind::mismatch("number", other.kind_name())),
            };
        }
        Ok(parts)
    }
}

#[cfg(test)]
mod tests {
    use super::ComplexBox;
    use crate::wire::printer::render_compact;
    use crate::wire::{Number, WireValue};

    #[test]
    fn shape() {
        let wire = ComplexBox {
            real: 1.0,
            imag: 2.0,
        }
        .encode();
        assert_eq!(render_compact(&wire).unwrap(), r#"{"real":1,"imag":2}"#);
    }

    #[test]
    fn integers_and_missing_parts() {
        let wire = WireValue::object([("imag", WireValue::Number(Number::Int(-4)))]);
        assert_eq!(
            ComplexBox::decode(&wire).unwrap(),
            ComplexBox {
                real: 0.0,
                imag: -4.0
            }
        );
        assert!(ComplexBox::decode(&WireValue::String("1+2i".into())).is_err());
    }
}
