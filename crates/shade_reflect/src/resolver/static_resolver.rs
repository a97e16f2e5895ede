use crate::info::{TypeInfo, Typed};
use crate::registry::{TypeMeta, TypeRegistry};
use crate::resolver::{ResolveError, TypeResolver};

// -----------------------------------------------------------------------------
// StaticResolver

/// Resolves against an explicit set of registered types.
///
/// Registering a type also registers everything reachable from it, so a
/// pointer field of a registered struct makes its pointer type available to
/// [`pointer_to`](TypeResolver::pointer_to).
///
/// # Example
///
/// ```
/// use shade_reflect::resolver::{StaticResolver, TypeResolver};
/// use std::rc::Rc;
///
/// let resolver = StaticResolver::new().with::<Rc<Vec<u8>>>();
///
/// let info = resolver.resolve("", "", "alloc::vec::Vec<u8>").unwrap();
/// assert!(info.type_is::<Vec<u8>>());
/// assert!(resolver.pointer_to(info).unwrap().type_is::<Rc<Vec<u8>>>());
/// ```
#[derive(Debug, Default)]
pub struct StaticResolver {
    registry: TypeRegistry,
}

impl StaticResolver {
    /// Creates a resolver knowing only the built-in primitives.
    #[inline]
    pub fn new() -> Self {
        Self {
            registry: TypeRegistry::new(),
        }
    }

    #[inline]
    pub fn from_registry(registry: TypeRegistry) -> Self {
        Self { registry }
    }

    /// Registers `T`, builder style.
    #[inline]
    pub fn with<T: Typed>(mut self) -> Self {
        self.registry.register::<T>();
        self
    }

    #[inline]
    pub fn register<T: Typed>(&mut self) {
        self.registry.register::<T>();
    }

    #[inline]
    pub fn registry(&self) -> &TypeRegistry {
        &self.registry
    }

    #[inline]
    pub fn registry_mut(&mut self) -> &mut TypeRegistry {
        &mut self.registry
    }

    fn lookup(&self, namespace: &str, name: &str, fallback: &str) -> Option<&TypeMeta> {
        match (namespace, name) {
            ("", "") => self.registry.get_with_type_path(fallback),
            ("", name) => self
                .registry
                .get_with_type_path(name)
                .or_else(|| self.registry.get_with_type_name(name)),
            (namespace, name) => {
                let path = crate::impls::concat(&[namespace, "::", name]);
                self.registry.get_with_type_path(&path)
            }
        }
    }
}

impl TypeResolver for StaticResolver {
    fn resolve(
        &self,
        namespace: &str,
        name: &str,
        fallback: &str,
    ) -> Result<&'static TypeInfo, ResolveError> {
        match self.lookup(namespace, name, fallback) {
            Some(meta) => Ok(meta.type_info()),
            None => Err(ResolveError::new(namespace, name, fallback)),
        }
    }

    fn pointer_to(&self, pointee: &'static TypeInfo) -> Option<&'static TypeInfo> {
        self.registry
            .pointer_to(pointee.ty_id())
            .map(TypeMeta::type_info)
    }
}

#[cfg(test)]
mod tests {
    use alloc::rc::Rc;
    use alloc::string::String;
    use alloc::sync::Arc;
    use alloc::vec::Vec;

    use super::StaticResolver;
    use crate::info::Typed;
    use crate::num::Complex64;
    use crate::resolver::{TypeDescriptor, TypeResolver};

    #[test]
    fn resolves_descriptors() {
        let resolver = StaticResolver::new()
            .with::<Complex64>()
            .with::<Vec<String>>();

        for info in [
            Complex64::type_info(),
            <Vec<String>>::type_info(),
            i32::type_info(),
        ] {
            let desc = TypeDescriptor::of(info);
            let found = resolver
                .resolve(desc.namespace, desc.name, desc.fallback)
                .unwrap();
            assert!(core::ptr::eq(found, info));
        }
    }

    #[test]
    fn unknown_type() {
        let resolver = StaticResolver::new();
        let err = resolver.resolve("my_app", "Missing", "").unwrap_err();
        assert_eq!(err.namespace, "my_app");
        assert_eq!(err.name, "Missing");
        assert!(resolver.resolve("", "", "nonexistentType").is_err());
    }

    #[test]
    fn pointer_lookup() {
        let resolver = StaticResolver::new().with::<Arc<Complex64>>();
        let pointer = resolver.pointer_to(Complex64::type_info()).unwrap();
        assert!(pointer.type_is::<Arc<Complex64>>());
        assert!(resolver.pointer_to(<Rc<u8>>::type_info()).is_none());
    }
}
