use alloc::string::String;

/// Text layout for [`Encoder`](crate::Encoder) output.
///
/// With both parts empty the output is compact. Otherwise every line after
/// the first begins with `prefix`, followed by one `indent` per nesting level.
///
/// ```
/// use shade_json::EncoderOptions;
///
/// let options = EncoderOptions::new().with_indent("  ");
/// assert!(!options.is_compact());
/// assert!(EncoderOptions::default().is_compact());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EncoderOptions {
    prefix: String,
    indent: String,
}

impl EncoderOptions {
    #[inline]
    pub const fn new() -> Self {
        Self {
            prefix: String::new(),
            indent: String::new(),
        }
    }

    #[inline]
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    #[inline]
    pub fn with_indent(mut self, indent: impl Into<String>) -> Self {
        self.indent = indent.into();
        self
    }

    #[inline]
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    #[inline]
    pub fn indent(&self) -> &str {
        &self.indent
    }

    #[inline]
    pub fn is_compact(&self) -> bool {
        self.prefix.is_empty() && self.indent.is_empty()
    }
}
