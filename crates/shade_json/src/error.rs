use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

use shade_reflect::info::ReflectKindError;
use shade_reflect::resolver::ResolveError;
use thiserror::Error;

// -----------------------------------------------------------------------------
// PathSegment

/// One step from the encoded root to the value an error refers to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathSegment {
    /// A struct field, by wire name.
    Field(String),
    /// A list or array element.
    Index(usize),
    /// A map entry, by its wire key.
    Key(String),
    /// The pointee of a pointer box.
    Pointee,
    /// The payload of an interface box.
    Interface,
}

impl fmt::Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Field(name) => write!(f, ".{name}"),
            Self::Index(index) => write!(f, "[{index}]"),
            Self::Key(key) => write!(f, "{{{key}}}"),
            Self::Pointee => f.write_str("*"),
            Self::Interface => f.write_str("<dyn>"),
        }
    }
}

struct DisplayPath<'a>(&'a [PathSegment]);

impl fmt::Display for DisplayPath<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("$")?;
        // Segments are pushed while unwinding, innermost first.
        self.0.iter().rev().try_for_each(|segment| segment.fmt(f))
    }
}

// -----------------------------------------------------------------------------
// ErrorKind

/// What went wrong while encoding or decoding.
#[derive(Debug, Error)]
pub enum ErrorKind {
    #[error("unsupported type `{type_path}`: {reason}")]
    UnsupportedKind {
        type_path: &'static str,
        reason: &'static str,
    },
    #[error("type mismatch: expected {expected}, found {found}")]
    TypeMismatch { expected: String, found: String },
    #[error("duplicate JSON field name {name:?} (struct fields {first:?} and {second:?})")]
    DuplicateWireName {
        name: String,
        first: &'static str,
        second: &'static str,
    },
    #[error("cycle detected through `{type_path}`")]
    CycleDetected { type_path: &'static str },
    #[error("no type resolver configured to resolve `{descriptor}`")]
    MissingTypeResolver { descriptor: String },
    #[error(transparent)]
    UnresolvedType(#[from] ResolveError),
    #[error("malformed payload: {0}")]
    MalformedPayload(String),
    #[error("custom codec for `{type_path}` failed: {message}")]
    CustomCodeFailure {
        type_path: &'static str,
        message: String,
    },
}

impl ErrorKind {
    pub(crate) fn mismatch(expected: impl fmt::Display, found: impl fmt::Display) -> Self {
        Self::TypeMismatch {
            expected: expected.to_string(),
            found: found.to_string(),
        }
    }

    pub(crate) fn malformed(message: impl fmt::Display) -> Self {
        Self::MalformedPayload(message.to_string())
    }
}

// -----------------------------------------------------------------------------
// Error

/// An encoding or decoding failure, with the path to the offending value.
#[derive(Debug, Error)]
#[error("at {}: {kind}", DisplayPath(.path))]
pub struct Error {
    kind: ErrorKind,
    path: Vec<PathSegment>,
}

impl Error {
    #[inline]
    pub fn kind(&self) -> &ErrorKind {
        &self.kind
    }

    #[inline]
    pub fn into_kind(self) -> ErrorKind {
        self.kind
    }

    /// The segments from the root to the failing value.
    pub fn path(&self) -> impl DoubleEndedIterator<Item = &PathSegment> {
        self.path.iter().rev()
    }

    /// Prepends `segment`, used while the error travels up the value tree.
    #[inline]
    pub(crate) fn at(mut self, segment: PathSegment) -> Self {
        self.path.push(segment);
        self
    }
}

impl From<ErrorKind> for Error {
    #[inline]
    fn from(kind: ErrorKind) -> Self {
        Self {
            kind,
            path: Vec::new(),
        }
    }
}

impl From<ResolveError> for Error {
    #[inline]
    fn from(err: ResolveError) -> Self {
        ErrorKind::from(err).into()
    }
}

impl From<ReflectKindError> for Error {
    #[inline]
    fn from(err: ReflectKindError) -> Self {
        ErrorKind::mismatch(err.expected, err.received).into()
    }
}

impl From<serde_json::Error> for Error {
    #[inline]
    fn from(err: serde_json::Error) -> Self {
        ErrorKind::malformed(err).into()
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use alloc::string::ToString;

    use super::{Error, ErrorKind, PathSegment};

    #[test]
    fn display_with_path() {
        let err = Error::from(ErrorKind::CycleDetected { type_path: "demo::Node" })
            .at(PathSegment::Pointee)
            .at(PathSegment::Index(2))
            .at(PathSegment::Field("next".into()));

        assert_eq!(
            err.to_string(),
            "at $.next[2]*: cycle detected through `demo::Node`"
        );
        assert_eq!(err.path().next(), Some(&PathSegment::Field("next".into())));
    }

    #[test]
    fn duplicate_name_message() {
        let err = Error::from(ErrorKind::DuplicateWireName {
            name: "same".into(),
            first: "field1",
            second: "field2",
        });
        assert_eq!(
            err.to_string(),
            r#"at $: duplicate JSON field name "same" (struct fields "field1" and "field2")"#
        );
    }

    #[test]
    fn root_and_map_segments() {
        let err = Error::from(ErrorKind::malformed("bad"))
            .at(PathSegment::Interface)
            .at(PathSegment::Key("k".into()));
        assert_eq!(err.to_string(), "at ${k}<dyn>: malformed payload: bad");
        assert!(matches!(err.into_kind(), ErrorKind::MalformedPayload(_)));
    }
}
