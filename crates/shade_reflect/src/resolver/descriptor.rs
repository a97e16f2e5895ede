use crate::info::TypeInfo;

// -----------------------------------------------------------------------------
// TypeDescriptor

/// The recorded identity of a value's concrete type.
///
/// Leading pointer layers are counted in `ptr_depth` and the remaining base
/// type is described by name:
///
/// | base type                      | `namespace`   | `name`  | `fallback`       |
/// |--------------------------------|---------------|---------|------------------|
/// | primitive                      | empty         | ident   | empty            |
/// | plain path (`my_app::Node`)    | module path   | ident   | empty            |
/// | anything else (`Vec<i64>`)     | empty         | empty   | full type path   |
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TypeDescriptor {
    pub ptr_depth: usize,
    pub namespace: &'static str,
    pub name: &'static str,
    pub fallback: &'static str,
}

impl TypeDescriptor {
    pub fn of(info: &'static TypeInfo) -> Self {
        let mut ptr_depth = 0;
        let mut base = info;
        while let TypeInfo::Pointer(pointer) = base {
            ptr_depth += 1;
            base = pointer.pointee_info();
        }

        let ty = base.ty();
        if let TypeInfo::Primitive(_) = base {
            return Self {
                ptr_depth,
                namespace: "",
                name: ty.ident(),
                fallback: "",
            };
        }
        match ty.module_path() {
            Some(module) if ty.path_table().is_plain() => Self {
                ptr_depth,
                namespace: module,
                name: ty.ident(),
                fallback: "",
            },
            _ => Self {
                ptr_depth,
                namespace: "",
                name: "",
                fallback: ty.path(),
            },
        }
    }

    /// Returns the type that the descriptor was taken from, without pointer layers.
    pub fn base_path(&self) -> alloc::borrow::Cow<'static, str> {
        use alloc::borrow::Cow;

        match (self.namespace, self.name) {
            ("", "") => Cow::Borrowed(self.fallback),
            ("", name) => Cow::Borrowed(name),
            (namespace, name) => Cow::Owned(crate::impls::concat(&[namespace, "::", name])),
        }
    }
}
