//! Raw coder factory registry
//!
//! Override factories are selected by name: a configuration entry names a
//! factory, and this registry maps that name to a constructor. Factories
//! register here explicitly at process start; there is no by-name
//! reflective lookup. Registering an existing name replaces it.

use crate::rawcoder::{RawErasureCoderFactory, RsRawCoderFactory, XorRawCoderFactory};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::{Arc, LazyLock};

/// Error produced by a failing factory constructor
pub type FactoryError = Box<dyn std::error::Error + Send + Sync>;

/// Fallible constructor producing a fresh factory per resolution call
pub type FactoryConstructor =
    Arc<dyn Fn() -> Result<Box<dyn RawErasureCoderFactory>, FactoryError> + Send + Sync>;

static REGISTRY: LazyLock<RwLock<HashMap<String, FactoryConstructor>>> =
    LazyLock::new(|| RwLock::new(HashMap::new()));

/// Name the built-in Reed-Solomon factory registers under
pub const RS_BUILTIN_FACTORY: &str = "rs-default";

/// Name the built-in XOR factory registers under
pub const XOR_BUILTIN_FACTORY: &str = "xor-default";

/// Register a factory constructor under `name`
///
/// Replaces any previous registration for the same name. The constructor
/// runs once per resolution call that selects it.
pub fn register_factory<F>(name: impl Into<String>, constructor: F)
where
    F: Fn() -> Result<Box<dyn RawErasureCoderFactory>, FactoryError> + Send + Sync + 'static,
{
    REGISTRY.write().insert(name.into(), Arc::new(constructor));
}

/// Look up the constructor registered under `name`
#[must_use]
pub fn lookup_factory(name: &str) -> Option<FactoryConstructor> {
    REGISTRY.read().get(name).cloned()
}

/// Names of all registered factories
#[must_use]
pub fn registered_factories() -> Vec<String> {
    REGISTRY.read().keys().cloned().collect()
}

/// Register the built-in factories under their well-known names
///
/// The resolver does not need this to fall back to the built-in defaults;
/// it only makes them addressable through configuration like any other
/// factory.
pub fn register_builtin_factories() {
    register_factory(RS_BUILTIN_FACTORY, || {
        Ok(Box::new(RsRawCoderFactory) as Box<dyn RawErasureCoderFactory>)
    });
    register_factory(XOR_BUILTIN_FACTORY, || {
        Ok(Box::new(XorRawCoderFactory) as Box<dyn RawErasureCoderFactory>)
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use stripekit_common::CoderOptions;

    #[test]
    fn test_register_and_lookup() {
        register_factory("registry-test-rs", || {
            Ok(Box::new(RsRawCoderFactory) as Box<dyn RawErasureCoderFactory>)
        });

        let constructor = lookup_factory("registry-test-rs").unwrap();
        let factory = constructor().unwrap();
        let encoder = factory.create_encoder(CoderOptions::new(4, 2)).unwrap();
        assert_eq!(encoder.name(), "rs");
        assert!(registered_factories().contains(&"registry-test-rs".to_string()));
    }

    #[test]
    fn test_lookup_unknown_name() {
        assert!(lookup_factory("registry-test-no-such").is_none());
    }

    #[test]
    fn test_reregister_replaces() {
        register_factory("registry-test-replace", || {
            Ok(Box::new(RsRawCoderFactory) as Box<dyn RawErasureCoderFactory>)
        });
        register_factory("registry-test-replace", || {
            Ok(Box::new(XorRawCoderFactory) as Box<dyn RawErasureCoderFactory>)
        });

        let constructor = lookup_factory("registry-test-replace").unwrap();
        let factory = constructor().unwrap();
        let encoder = factory.create_encoder(CoderOptions::new(3, 1)).unwrap();
        assert_eq!(encoder.name(), "xor");
    }

    #[test]
    fn test_builtin_registration() {
        register_builtin_factories();
        assert!(lookup_factory(RS_BUILTIN_FACTORY).is_some());
        assert!(lookup_factory(XOR_BUILTIN_FACTORY).is_some());
    }
}
