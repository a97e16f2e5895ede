//! Static type descriptions.
//!
//! ## Menu
//!
//! - [`TypePath`]: stable type names (`type_path`, `type_name`, `type_ident`, `module_path`).
//! - [`DynamicTypePath`]: dynamic dispatch for `TypePath`.
//! - [`Type`]: a `TypeId` plus a [`TypePathTable`].
//! - [`TypeInfo`]: the kind-tagged description of a type, one of:
//!     - [`PrimitiveInfo`]: `bool`, integers, floats, `char` and `String`.
//!     - [`StructInfo`]: ordered [`NamedField`]s with their raw tags.
//!     - [`ListInfo`]: `Vec<T>` and `Option<Vec<T>>`.
//!     - [`ArrayInfo`]: `[T; N]`.
//!     - [`MapInfo`]: `HashMap<K, V>`, `BTreeMap<K, V>` and their `Option` forms.
//!     - [`PointerInfo`]: shared handles such as `Rc<T>` or `Option<Arc<T>>`.
//!     - [`InterfaceInfo`]: `Option<Box<dyn Reflect>>`.
//!     - [`ComplexInfo`]: `Complex32` and `Complex64`.
//!     - [`OpaqueInfo`]: everything else, optionally with a [`CustomCodec`].
//! - [`Typed`]: static access to a type's `TypeInfo`.
//! - [`DynamicTyped`]: dynamic dispatch for `Typed`.
//!
//! Every description can build a zero value of its type, see [`TypeInfo::zero`].

// -----------------------------------------------------------------------------
// Modules

mod array_info;
mod complex_info;
mod field_info;
mod interface_info;
mod list_info;
mod map_info;
mod opaque_info;
mod pointer_info;
mod primitive_info;
mod struct_info;
mod type_info;
mod type_path;
mod typed;
mod zero;

// -----------------------------------------------------------------------------
// Internal API

pub(crate) use type_path::impl_type_fn;

// -----------------------------------------------------------------------------
// Exports

pub use array_info::ArrayInfo;
pub use complex_info::{ComplexInfo, ComplexWidth};
pub use field_info::NamedField;
pub use interface_info::InterfaceInfo;
pub use list_info::ListInfo;
pub use map_info::MapInfo;
pub use opaque_info::{CustomCodec, OpaqueInfo};
pub use pointer_info::{PointerFamily, PointerInfo};
pub use primitive_info::{PrimitiveInfo, PrimitiveKind};
pub use struct_info::StructInfo;
pub use type_info::{ReflectKind, ReflectKindError, TypeInfo};
pub use type_path::{DynamicTypePath, Type, TypePath, TypePathTable};
pub use typed::{DynamicTyped, Typed};
pub use zero::{ZeroFn, default_zero, no_zero};
