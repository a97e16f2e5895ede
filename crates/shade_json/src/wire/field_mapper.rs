use alloc::string::String;

use shade_reflect::info::NamedField;

/// Tag key consulted before [`GENERIC_TAG`].
pub const OVERRIDE_TAG: &str = "shade_json";

/// Tag key shared with other JSON codecs.
pub const GENERIC_TAG: &str = "json";

/// How one struct field appears on the wire.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldMapping {
    /// The field is left out entirely.
    Skip,
    Include {
        wire_name: String,
        /// Everything after the first comma of the winning tag.
        options: &'static str,
    },
}

/// Resolves the wire name of `field` from its tags.
///
/// The first non-empty tag among [`OVERRIDE_TAG`] and [`GENERIC_TAG`] wins.
/// A winning tag of exactly `-` skips the field, so an override tag with an
/// empty name (`","`) still keeps a field the generic tag skips.
pub fn map_field(field: &NamedField) -> FieldMapping {
    let tag = field
        .tag(OVERRIDE_TAG)
        .filter(|tag| !tag.is_empty())
        .or_else(|| field.tag(GENERIC_TAG))
        .unwrap_or("");

    if tag == "-" {
        return FieldMapping::Skip;
    }

    let (name, options) = tag.split_once(',').unwrap_or((tag, ""));
    let wire_name = if name.is_empty() { field.name() } else { name };

    FieldMapping::Include {
        wire_name: wire_name.into(),
        options,
    }
}

/// Whether a comma separated option list contains `option`.
pub fn has_option(options: &str, option: &str) -> bool {
    !options.is_empty() && options.split(',').any(|opt| opt == option)
}

// -----------------------------------------------------------------------------
// Tests
