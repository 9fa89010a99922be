//! Provider registry
//!
//! Ordered collection of registered providers plus the current-selection
//! preference, persisted through the settings collaborator under the
//! `goto_provider` key.

use crate::config::Settings;
use crate::constants::settings::GOTO_PROVIDER_KEY;
use crate::error::{Error, Result};
use crate::provider::Provider;
use std::sync::Arc;

/// Ordered set of registered providers
///
/// The registry exclusively owns the provider list; consumers get shared
/// handles to individual providers.
#[derive(Default)]
pub struct ProviderRegistry {
    providers: Vec<Arc<dyn Provider>>,
}

impl ProviderRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a provider
    ///
    /// Appends in order; no label dedup is enforced.
    pub fn register(&mut self, provider: Arc<dyn Provider>) {
        self.providers.push(provider);
    }

    /// Get a provider by label
    pub fn get(&self, label: &str) -> Option<Arc<dyn Provider>> {
        self.providers
            .iter()
            .find(|p| p.label() == label)
            .map(Arc::clone)
    }

    /// Return the current provider
    ///
    /// Uses the persisted preference if its label still resolves to a
    /// registered provider, otherwise the first registered provider. An empty
    /// registry is a refused lookup, not a crash.
    pub fn current(&self, settings: &Settings) -> Result<Arc<dyn Provider>> {
        let first = self.providers.first().ok_or(Error::NoProviderAvailable)?;

        if let Some(label) = settings.get_string(GOTO_PROVIDER_KEY) {
            if let Some(provider) = self.get(&label) {
                return Ok(provider);
            }
        }

        Ok(Arc::clone(first))
    }

    /// Persist a provider as the current preference
    ///
    /// Effective immediately for subsequent lookups. The caller is
    /// responsible for saving the settings to disk.
    pub fn set_current(&self, settings: &mut Settings, label: &str) -> Result<()> {
        let provider = self
            .get(label)
            .ok_or_else(|| Error::Config(format!("Unknown provider: {}", label)))?;
        settings.set_string(GOTO_PROVIDER_KEY, provider.label())
    }

    /// Labels of all registered providers, in registration order
    pub fn labels(&self) -> Vec<&'static str> {
        self.providers.iter().map(|p| p.label()).collect()
    }

    /// Number of registered providers
    pub fn len(&self) -> usize {
        self.providers.len()
    }

    /// Whether the registry has no providers
    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::testing::StubProvider;

    fn two_provider_registry() -> ProviderRegistry {
        let mut registry = ProviderRegistry::new();
        registry.register(Arc::new(StubProvider::named("alpha", vec![])));
        registry.register(Arc::new(StubProvider::named("beta", vec![])));
        registry
    }

    #[test]
    fn test_empty_registry_refuses_lookup() {
        let registry = ProviderRegistry::new();
        let settings = Settings::default();

        assert!(matches!(
            registry.current(&settings),
            Err(Error::NoProviderAvailable)
        ));
    }

    #[test]
    fn test_current_defaults_to_first() {
        let registry = two_provider_registry();
        let settings = Settings::default();

        assert_eq!(registry.current(&settings).unwrap().label(), "alpha");
    }

    #[test]
    fn test_current_ignores_unregistered_preference() {
        let registry = two_provider_registry();
        let mut settings = Settings::default();
        settings.set_string(GOTO_PROVIDER_KEY, "gone").unwrap();

        assert_eq!(registry.current(&settings).unwrap().label(), "alpha");
    }

    #[test]
    fn test_set_current_persists_across_registry_views() {
        let registry = two_provider_registry();
        let mut settings = Settings::default();

        registry.set_current(&mut settings, "beta").unwrap();
        assert_eq!(registry.current(&settings).unwrap().label(), "beta");

        // A fresh registry view over the same persisted key agrees
        let fresh = two_provider_registry();
        assert_eq!(fresh.current(&settings).unwrap().label(), "beta");
    }

    #[test]
    fn test_set_current_unknown_label() {
        let registry = two_provider_registry();
        let mut settings = Settings::default();

        assert!(registry.set_current(&mut settings, "gamma").is_err());
        // Preference untouched
        assert_eq!(registry.current(&settings).unwrap().label(), "alpha");
    }

    #[test]
    fn test_labels_in_registration_order() {
        let registry = two_provider_registry();
        assert_eq!(registry.labels(), vec!["alpha", "beta"]);
        assert_eq!(registry.len(), 2);
        assert!(!registry.is_empty());
    }
}
