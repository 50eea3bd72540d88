//! Capability factory lookup.
//!
//! Maps capability types to the factories that build them. The lookup is
//! assembled once, before the registry is created, and never changes
//! afterwards, so reading it needs no lock.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use capstan_core::error::{ConfigurationError, CreationError, Error, Result};
use capstan_core::id::{CapabilityId, CapabilityType};
use capstan_core::traits::{Capability, CapabilityFactory};

use crate::isolation::{isolate, Failure};

/// Read-only mapping from capability type to factory.
#[derive(Clone, Default)]
pub struct FactoryLookup {
    factories: HashMap<CapabilityType, Arc<dyn CapabilityFactory>>,
}

impl FactoryLookup {
    /// Start building a lookup.
    pub fn builder() -> FactoryLookupBuilder {
        FactoryLookupBuilder::default()
    }

    /// The factory registered for `capability_type`, if any.
    pub fn get(&self, capability_type: &CapabilityType) -> Option<&Arc<dyn CapabilityFactory>> {
        self.factories.get(capability_type)
    }

    /// Whether a factory is registered for `capability_type`.
    pub fn contains(&self, capability_type: &CapabilityType) -> bool {
        self.factories.contains_key(capability_type)
    }

    /// All registered types, sorted.
    pub fn types(&self) -> Vec<CapabilityType> {
        let mut types: Vec<CapabilityType> = self.factories.keys().cloned().collect();
        types.sort();
        types
    }

    /// Instantiate a capability of `capability_type` for `id`.
    ///
    /// Fails with `ConfigurationError::NoFactory` when the type is unknown and
    /// with a `CreationError` when the factory errors or panics.
    pub fn instantiate(
        &self,
        id: &CapabilityId,
        capability_type: &CapabilityType,
    ) -> Result<Box<dyn Capability>> {
        let factory = self
            .get(capability_type)
            .ok_or_else(|| ConfigurationError::NoFactory(capability_type.clone()))?;

        isolate(|| factory.create(id)).map_err(|failure| match failure {
            // Factories may report their own creation errors
            Failure::Error(Error::Creation(err)) => Error::Creation(err),
            Failure::Error(err) => CreationError::FactoryFailed {
                id: id.clone(),
                capability_type: capability_type.clone(),
                reason: err.to_string(),
            }
            .into(),
            Failure::Panic(reason) => CreationError::FactoryPanicked {
                id: id.clone(),
                capability_type: capability_type.clone(),
                reason,
            }
            .into(),
        })
    }
}

impl fmt::Debug for FactoryLookup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FactoryLookup")
            .field("types", &self.types())
            .finish()
    }
}

/// Builder for [`FactoryLookup`].
#[derive(Default)]
pub struct FactoryLookupBuilder {
    factories: HashMap<CapabilityType, Arc<dyn CapabilityFactory>>,
}

impl FactoryLookupBuilder {
    /// Register `factory` for `capability_type`, replacing any earlier one.
    pub fn register<F>(mut self, capability_type: impl Into<CapabilityType>, factory: F) -> Self
    where
        F: CapabilityFactory + 'static,
    {
        self.factories
            .insert(capability_type.into(), Arc::new(factory));
        self
    }

    /// Register an already shared factory.
    pub fn register_shared(
        mut self,
        capability_type: impl Into<CapabilityType>,
        factory: Arc<dyn CapabilityFactory>,
    ) -> Self {
        self.factories.insert(capability_type.into(), factory);
        self
    }

    /// Freeze the lookup.
    pub fn build(self) -> FactoryLookup {
        FactoryLookup {
            factories: self.factories,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use capstan_core::error::CapabilityError;

    struct Inert(CapabilityId);

    impl Capability for Inert {
        fn id(&self) -> &CapabilityId {
            &self.0
        }

        fn activate(&self) -> Result<()> {
            Ok(())
        }

        fn passivate(&self) -> Result<()> {
            Ok(())
        }
    }

    fn lookup() -> FactoryLookup {
        FactoryLookup::builder()
            .register("inert", |id: &CapabilityId| -> Result<Box<dyn Capability>> {
                Ok(Box::new(Inert(id.clone())))
            })
            .register("refusing", |_: &CapabilityId| -> Result<Box<dyn Capability>> {
                Err(CapabilityError::Other("bad settings".into()).into())
            })
            .register("panicking", |_: &CapabilityId| -> Result<Box<dyn Capability>> {
                panic!("factory blew up")
            })
            .build()
    }

    fn id(s: &str) -> CapabilityId {
        CapabilityId::new(s).unwrap()
    }

    #[test]
    fn test_types_sorted() {
        let types: Vec<String> = lookup().types().iter().map(|t| t.to_string()).collect();
        assert_eq!(types, vec!["inert", "panicking", "refusing"]);
        assert!(lookup().contains(&CapabilityType::new("inert")));
        assert!(!lookup().contains(&CapabilityType::new("missing")));
    }

    #[test]
    fn test_instantiate() {
        let capability = lookup()
            .instantiate(&id("one"), &CapabilityType::new("inert"))
            .unwrap();
        assert_eq!(capability.id(), &id("one"));
    }

    #[test]
    fn test_unknown_type() {
        let result = lookup().instantiate(&id("one"), &CapabilityType::new("missing"));
        match result {
            Err(Error::Configuration(ConfigurationError::NoFactory(t))) => {
                assert_eq!(t.as_str(), "missing")
            }
            _ => panic!("expected NoFactory"),
        }
    }

    #[test]
    fn test_factory_error_becomes_creation_error() {
        let result = lookup().instantiate(&id("one"), &CapabilityType::new("refusing"));
        match result {
            Err(Error::Creation(CreationError::FactoryFailed { reason, .. })) => {
                assert!(reason.contains("bad settings"))
            }
            _ => panic!("expected FactoryFailed"),
        }
    }

    #[test]
    fn test_factory_panic_contained() {
        let result = lookup().instantiate(&id("one"), &CapabilityType::new("panicking"));
        match result {
            Err(Error::Creation(CreationError::FactoryPanicked { reason, .. })) => {
                assert_eq!(reason, "factory blew up")
            }
            _ => panic!("expected FactoryPanicked"),
        }
    }
}
