//! Lookup context
//!
//! The explicitly constructed, explicitly passed home for everything that
//! would otherwise be process-wide state: the provider registry, the
//! persisted settings, the lookup worker pool, and the last-query memory.
//! The top-level assembly owns one of these and hands it around by
//! reference.

use crate::config::Settings;
use crate::coord::{Candidate, Coordinates};
use crate::error::Result;
use crate::locate::{self, LocationFix};
use crate::provider::{nominatim::NominatimProvider, photon::PhotonProvider, Provider, ProviderRegistry};
use crate::search::scheduler::{DeliverySender, LivenessToken, Scheduler, SearchJob};
use crate::search::{self, LastQuery};
use std::sync::{Arc, Mutex, MutexGuard};

/// Shared lookup state and services
pub struct LookupContext {
    registry: ProviderRegistry,
    settings: Mutex<Settings>,
    scheduler: Scheduler,
    http: reqwest::Client,
    last_query: Mutex<Option<LastQuery>>,
}

impl LookupContext {
    /// Create a context with an empty provider registry
    pub fn new(settings: Settings) -> Result<Self> {
        let scheduler = Scheduler::new(settings.jobs.workers)?;
        Ok(Self {
            registry: ProviderRegistry::new(),
            settings: Mutex::new(settings),
            scheduler,
            http: reqwest::Client::new(),
            last_query: Mutex::new(None),
        })
    }

    /// Create a context with the built-in providers registered
    pub fn with_default_providers(settings: Settings) -> Result<Self> {
        let limit = settings.provider.candidate_limit;
        let mut ctx = Self::new(settings)?;
        ctx.register(Arc::new(NominatimProvider::with_candidate_limit(limit)));
        ctx.register(Arc::new(PhotonProvider::with_candidate_limit(limit)));
        Ok(ctx)
    }

    /// Register a provider
    ///
    /// Providers are registered once at startup; the registry owns them for
    /// the life of the process.
    pub fn register(&mut self, provider: Arc<dyn Provider>) {
        self.registry.register(provider);
    }

    /// The provider registry
    pub fn registry(&self) -> &ProviderRegistry {
        &self.registry
    }

    /// The provider currently selected for lookups
    pub fn current_provider(&self) -> Result<Arc<dyn Provider>> {
        let settings = self.lock_settings();
        self.registry.current(&settings)
    }

    /// Select a provider by label and persist the preference
    pub fn set_provider(&self, label: &str) -> Result<()> {
        let mut settings = self.lock_settings();
        self.registry.set_current(&mut settings, label)?;
        settings.save()
    }

    /// Submit a candidate search for background execution
    ///
    /// The outcome arrives on the delivery channel unless the liveness token
    /// is marked dead first.
    pub fn submit_candidate_search(
        &self,
        query: &str,
        liveness: LivenessToken,
        delivery: DeliverySender,
    ) -> Result<SearchJob> {
        let provider = self.current_provider()?;
        self.scheduler.submit(provider, query, liveness, delivery)
    }

    /// Resolve a place name to one coordinate through the current provider
    pub async fn resolve_place(&self, name: &str) -> Result<Coordinates> {
        let provider = self.current_provider()?;
        search::resolve_one(provider.as_ref(), name).await
    }

    /// Determine where this device is
    pub async fn where_am_i(&self) -> Result<LocationFix> {
        locate::where_am_i(self).await
    }

    /// Record that the user selected a candidate for a query
    pub fn record_selection(&self, query: &str, candidate: &Candidate) {
        let record = LastQuery::from_selection(query, candidate);
        *self.lock_last_query() = Some(record);
    }

    /// What the user last looked up, if anything
    pub fn last_query(&self) -> Option<LastQuery> {
        self.lock_last_query().clone()
    }

    /// The remembered description for a coordinate
    ///
    /// Answers only for the exact coordinate last navigated to; anywhere
    /// else returns None.
    pub fn search_string_for(&self, coords: Coordinates) -> Option<String> {
        self.lock_last_query()
            .as_ref()
            .filter(|record| record.coords == coords)
            .map(|record| record.description.clone())
    }

    /// Shared HTTP client for non-provider fetches
    pub fn http_client(&self) -> &reqwest::Client {
        &self.http
    }

    /// Endpoint of the IP geolocation service
    pub fn locate_service_url(&self) -> String {
        self.lock_settings().locate.service_url.clone()
    }

    fn lock_settings(&self) -> MutexGuard<'_, Settings> {
        self.settings.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn lock_last_query(&self) -> MutexGuard<'_, Option<LastQuery>> {
        self.last_query.lock().unwrap_or_else(|e| e.into_inner())
    }
}
