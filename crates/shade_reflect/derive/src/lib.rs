//! See [`Reflect`](derive_reflect).
#![cfg_attr(docsrs, feature(doc_cfg))]
#![allow(clippy::std_instead_of_core, reason = "proc-macro lib")]
#![allow(clippy::std_instead_of_alloc, reason = "proc-macro lib")]

use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

static REFLECT_ATTRIBUTE_NAME: &str = "reflect";

// -----------------------------------------------------------------------------
// Modules

mod derive_data;
mod impls;
mod path;
mod utils;

// -----------------------------------------------------------------------------
// Macros

/// # Reflection Derivation
///
/// `#[derive(Reflect)]` implements the following traits:
///
/// - `TypePath`
/// - `Typed`
/// - `Reflect`
/// - `Struct` (for `struct T { ... }` and `struct T;`)
///
/// Every field, private ones included, is exposed in declaration order. Field
/// types must implement `Reflect` and `Typed`.
///
/// ## Zero Value
///
/// The generated zero value is built from the zero value of every field. A
/// field type without one (a function pointer, for example) leaves the whole
/// struct without a zero value, so it cannot be decoded. Mark the type with
/// `default` to use `Default` instead:
///
/// ```rust, ignore
/// #[derive(Reflect, Default)]
/// #[reflect(default)]
/// struct Job {
///     name: String,
///     run: fn() -> u32,
/// }
/// ```
///
/// ## Field Tags
///
/// Raw tags are attached to fields as `key = "value"` pairs. Their meaning
/// belongs to the codec reading them:
///
/// ```rust, ignore
/// #[derive(Reflect)]
/// struct User {
///     #[reflect(tag(json = "user_name,omitempty"))]
///     name: String,
///     #[reflect(tag(json = "-", shade_json = "secret"))]
///     secret: String,
/// }
/// ```
///
/// This attribute can only be applied to fields.
///
/// ## Custom Type Path
///
/// ```rust, ignore
/// #[derive(Reflect)]
/// #[reflect(type_path = "my_app::model::Node")]
/// struct Node { /* ... */ }
/// ```
///
/// The path must contain a module and must not contain generics; generic
/// parameters are appended automatically.
///
/// ## Opaque Types
///
/// `opaque` skips field inspection: the type is reflected as an opaque value.
/// `serde` does the same and attaches a custom codec built from the type's
/// `serde::Serialize` and `serde::Deserialize` implementations, so the codec
/// writes it as a raw payload. Both work for enums and tuple structs.
///
/// ```rust, ignore
/// #[derive(Reflect, Serialize, Deserialize, Default)]
/// #[reflect(serde, default)]
/// enum Level { #[default] Low, High }
/// ```
///
/// ## Other Flags
///
/// - `default`: the type implements `Default`, used as its zero value.
/// - `debug`: the type implements `Debug`, used by `Reflect::reflect_debug`.
///
/// These attributes can only be applied at the type level.
#[proc_macro_derive(Reflect, attributes(reflect))]
pub fn derive_reflect(input: TokenStream) -> TokenStream {
    let ast = parse_macro_input!(input as DeriveInput);

    impls::match_reflect_impls(ast)
}
