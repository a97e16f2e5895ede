use alloc::boxed::Box;
use alloc::vec::Vec;

use crate::info::TypeInfo;
use crate::resolver::{ResolveError, TypeResolver};

// -----------------------------------------------------------------------------
// ChainResolver

/// Tries each resolver in order and returns the first match.
#[derive(Default)]
pub struct ChainResolver {
    resolvers: Vec<Box<dyn TypeResolver>>,
}

impl ChainResolver {
    #[inline]
    pub const fn new() -> Self {
        Self {
            resolvers: Vec::new(),
        }
    }

    /// Appends a resolver, builder style.
    pub fn with(mut self, resolver: impl TypeResolver + 'static) -> Self {
        self.resolvers.push(Box::new(resolver));
        self
    }

    pub fn push(&mut self, resolver: Box<dyn TypeResolver>) {
        self.resolvers.push(resolver);
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.resolvers.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.resolvers.is_empty()
    }
}

impl FromIterator<Box<dyn TypeResolver>> for ChainResolver {
    fn from_iter<I: IntoIterator<Item = Box<dyn TypeResolver>>>(iter: I) -> Self {
        Self {
            resolvers: iter.into_iter().collect(),
        }
    }
}

impl TypeResolver for ChainResolver {
    fn resolve(
        &self,
        namespace: &str,
        name: &str,
        fallback: &str,
    ) -> Result<&'static TypeInfo, ResolveError> {
        for (index, resolver) in self.resolvers.iter().enumerate() {
            if let Ok(info) = resolver.resolve(namespace, name, fallback) {
                if index > 0 {
                    log::debug!(
                        "chain resolver: `{}` found by resolver #{index}",
                        info.type_path()
                    );
                }
                return Ok(info);
            }
        }
        Err(ResolveError::new(namespace, name, fallback))
    }

    fn pointer_to(&self, pointee: &'static TypeInfo) -> Option<&'static TypeInfo> {
        self.resolvers
            .iter()
            .find_map(|resolver| resolver.pointer_to(pointee))
    }
}

impl core::fmt::Debug for ChainResolver {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ChainResolver")
            .field("len", &self.resolvers.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use alloc::rc::Rc;
    use alloc::string::String;

    use super::ChainResolver;
    use crate::info::Typed;
    use crate::num::{Complex32, Complex64};
    use crate::resolver::{StaticResolver, TypeResolver};

    #[test]
    fn first_success_wins() {
        let chain = ChainResolver::new()
            .with(StaticResolver::new().with::<Complex32>())
            .with(StaticResolver::new().with::<Rc<Complex64>>());
        assert_eq!(chain.len(), 2);

        let info = chain
            .resolve("shade_reflect::num", "Complex64", "")
            .unwrap();
        assert!(info.type_is::<Complex64>());
        let info = chain
            .resolve("shade_reflect::num", "Complex32", "")
            .unwrap();
        assert!(info.type_is::<Complex32>());

        let pointer = chain.pointer_to(Complex64::type_info()).unwrap();
        assert!(pointer.type_is::<Rc<Complex64>>());
    }

    #[test]
    fn all_fail() {
        let chain = ChainResolver::new().with(StaticResolver::new());
        let err = chain.resolve("", "", "nonexistentType").unwrap_err();
        assert_eq!(err.fallback, "nonexistentType");
        assert!(ChainResolver::new().resolve("", "String", "").is_err());
        assert!(chain.pointer_to(String::type_info()).is_none());
    }
}
