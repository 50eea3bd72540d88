//! Integration tests for config-driven bootstrap and the built-in listeners.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use capstan_core::error::{CapabilityError, Result};
use capstan_core::id::{CapabilityId, CapabilityType};
use capstan_core::traits::{ActivationContext, Allowlist, AlwaysSatisfied, Capability};
use capstan_core::utils::RegistryConfig;
use capstan_registry::{
    bootstrap, ActivationListener, CapabilityRegistry, FactoryLookup, LoggingListener,
};

/// Shared hook counters for every capability a test factory builds.
#[derive(Default)]
struct Counters {
    activations: AtomicUsize,
    passivations: AtomicUsize,
}

struct CountingCapability {
    id: CapabilityId,
    counters: Arc<Counters>,
    fail_activation: bool,
}

impl Capability for CountingCapability {
    fn id(&self) -> &CapabilityId {
        &self.id
    }

    fn activate(&self) -> Result<()> {
        self.counters.activations.fetch_add(1, Ordering::SeqCst);
        if self.fail_activation {
            return Err(CapabilityError::ActivationFailed("port in use".into()).into());
        }
        Ok(())
    }

    fn passivate(&self) -> Result<()> {
        self.counters.passivations.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

fn registry(counters: &Arc<Counters>, context: Arc<dyn ActivationContext>) -> CapabilityRegistry {
    let ok = counters.clone();
    let failing = counters.clone();
    let factories = FactoryLookup::builder()
        .register("log", move |id: &CapabilityId| -> Result<Box<dyn Capability>> {
            Ok(Box::new(CountingCapability {
                id: id.clone(),
                counters: ok.clone(),
                fail_activation: false,
            }))
        })
        .register("broken", move |id: &CapabilityId| -> Result<Box<dyn Capability>> {
            Ok(Box::new(CountingCapability {
                id: id.clone(),
                counters: failing.clone(),
                fail_activation: true,
            }))
        })
        .build();
    CapabilityRegistry::new(factories, context)
}

fn id(s: &str) -> CapabilityId {
    CapabilityId::new(s).unwrap()
}

const CONFIG: &str = r#"
[[capabilities]]
id = "audit"
type = "log"
activate = true

[[capabilities]]
id = "idle"
type = "log"

[[capabilities]]
id = "flaky"
type = "broken"
activate = true

[[capabilities]]
id = "ghost"
type = "missing"
activate = true
"#;

#[test]
fn test_bootstrap_report() {
    let counters = Arc::new(Counters::default());
    let registry = registry(&counters, Arc::new(AlwaysSatisfied));
    let config = RegistryConfig::from_toml_str(CONFIG).unwrap();

    let report = bootstrap(&registry, &config);

    assert_eq!(report.created, vec![id("audit"), id("idle"), id("flaky")]);
    assert_eq!(report.activated, vec![id("audit")]);
    assert_eq!(report.inactive, vec![id("flaky")]);
    assert_eq!(report.failed.len(), 1);
    assert_eq!(report.failed[0].id, id("ghost"));
    assert!(report.failed[0].reason.contains("missing"));
    assert!(!report.is_clean());

    assert!(registry.get(&id("audit")).unwrap().is_active());
    assert!(!registry.get(&id("idle")).unwrap().is_active());
    assert!(!registry.get(&id("flaky")).unwrap().is_active());
    assert!(!registry.contains(&id("ghost")));
    assert_eq!(counters.activations.load(Ordering::SeqCst), 2);
}

#[test]
fn test_bootstrap_empty_config_is_clean() {
    let counters = Arc::new(Counters::default());
    let registry = registry(&counters, Arc::new(AlwaysSatisfied));

    let report = bootstrap(&registry, &RegistryConfig::default());
    assert!(report.is_clean());
    assert!(registry.is_empty());
}

#[test]
fn test_activation_listener_follows_context() {
    let counters = Arc::new(Counters::default());
    let registry = registry(&counters, Arc::new(Allowlist::new([id("wanted")])));
    registry.add_listener(Arc::new(ActivationListener));
    registry.add_listener(Arc::new(LoggingListener));

    let wanted = registry.create(id("wanted"), &CapabilityType::new("log")).unwrap();
    let other = registry.create(id("other"), &CapabilityType::new("log")).unwrap();

    assert!(wanted.is_active());
    assert!(!other.is_active());
    assert_eq!(counters.activations.load(Ordering::SeqCst), 1);

    registry.remove(&id("wanted"));
    registry.remove(&id("other"));
    assert!(!wanted.is_active());
    // Only the active reference had anything to release
    assert_eq!(counters.passivations.load(Ordering::SeqCst), 1);
}

#[test]
fn test_activation_listener_catches_up_existing() {
    let counters = Arc::new(Counters::default());
    let registry = registry(&counters, Arc::new(AlwaysSatisfied));
    registry.create(id("a"), &CapabilityType::new("log")).unwrap();
    registry.create(id("b"), &CapabilityType::new("log")).unwrap();

    registry.add_listener(Arc::new(ActivationListener));

    assert!(registry.get_all().iter().all(|r| r.is_active()));
    assert_eq!(counters.activations.load(Ordering::SeqCst), 2);
}

#[test]
fn test_bootstrap_with_activation_listener_activates_once() {
    let counters = Arc::new(Counters::default());
    let registry = registry(&counters, Arc::new(AlwaysSatisfied));
    registry.add_listener(Arc::new(ActivationListener));

    let config = RegistryConfig::from_toml_str(
        r#"
[[capabilities]]
id = "audit"
type = "log"
activate = true
"#,
    )
    .unwrap();
    let report = bootstrap(&registry, &config);

    assert_eq!(report.activated, vec![id("audit")]);
    assert_eq!(counters.activations.load(Ordering::SeqCst), 1);
}
