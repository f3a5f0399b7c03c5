//! Service context - dependency container for services
//!
//! Holds the storage backend, token service, id generator and the small
//! amount of in-process coordination state (per-post write locks, preview
//! gates) shared by every request.

use std::sync::Arc;
use std::time::Duration;

use dashmap::DashMap;
use tokio::sync::{Mutex, OwnedMutexGuard};
use typesense_common::auth::{JwtService, PasswordService};
use typesense_common::AppConfig;
use typesense_core::traits::KvStore;
use typesense_core::{LatestWins, PostIdGenerator, TypographyResult};

use super::error::{ServiceError, ServiceResult};

/// Tunables read from configuration
#[derive(Debug, Clone)]
pub struct ServiceSettings {
    /// Merge posts from the legacy `posts:` namespace into feeds
    pub include_legacy_posts: bool,
    /// Conditional-write attempts per reaction toggle
    pub reaction_max_retries: u32,
    /// Artificial delay applied to gated typography previews
    pub preview_delay: Duration,
}

impl Default for ServiceSettings {
    fn default() -> Self {
        Self {
            include_legacy_posts: true,
            reaction_max_retries: 5,
            preview_delay: Duration::ZERO,
        }
    }
}

impl From<&AppConfig> for ServiceSettings {
    fn from(config: &AppConfig) -> Self {
        Self {
            include_legacy_posts: config.feed.include_legacy,
            reaction_max_retries: config.reactions.max_retries.max(1),
            preview_delay: Duration::from_millis(config.typography.preview_delay_ms),
        }
    }
}

type LockMap = DashMap<String, Arc<Mutex<()>>>;

/// Exclusive write access to one storage key within this process
///
/// Dropping the guard releases the lock and forgets the key once nobody
/// else is waiting on it.
pub struct KeyLock<'a> {
    locks: &'a LockMap,
    key: String,
    guard: Option<OwnedMutexGuard<()>>,
}

impl Drop for KeyLock<'_> {
    fn drop(&mut self) {
        // release the mutex first so its Arc count drops back to the map's own
        self.guard.take();
        self.locks
            .remove_if(&self.key, |_, lock| Arc::strong_count(lock) == 1);
    }
}

/// Service context containing all dependencies
#[derive(Clone)]
pub struct ServiceContext {
    store: Arc<dyn KvStore>,
    jwt_service: Arc<JwtService>,
    password_service: PasswordService,
    post_id_generator: Arc<PostIdGenerator>,
    key_locks: Arc<LockMap>,
    preview_gates: Arc<DashMap<String, Arc<LatestWins<TypographyResult>>>>,
    settings: ServiceSettings,
}

impl ServiceContext {
    pub fn new(
        store: Arc<dyn KvStore>,
        jwt_service: Arc<JwtService>,
        post_id_generator: Arc<PostIdGenerator>,
        settings: ServiceSettings,
    ) -> Self {
        Self {
            store,
            jwt_service,
            password_service: PasswordService::new(),
            post_id_generator,
            key_locks: Arc::new(DashMap::new()),
            preview_gates: Arc::new(DashMap::new()),
            settings,
        }
    }

    /// Get the key-value store
    pub fn store(&self) -> &dyn KvStore {
        self.store.as_ref()
    }

    pub fn jwt_service(&self) -> &JwtService {
        self.jwt_service.as_ref()
    }

    pub fn password_service(&self) -> &PasswordService {
        &self.password_service
    }

    pub fn post_id_generator(&self) -> &PostIdGenerator {
        self.post_id_generator.as_ref()
    }

    pub fn settings(&self) -> &ServiceSettings {
        &self.settings
    }

    /// Serialize writers of `key` within this process
    pub async fn lock_key(&self, key: &str) -> KeyLock<'_> {
        let mutex = self.key_locks.entry(key.to_string()).or_default().clone();
        let guard = mutex.lock_owned().await;
        KeyLock {
            locks: &self.key_locks,
            key: key.to_string(),
            guard: Some(guard),
        }
    }

    /// Number of keys currently tracked by `lock_key`
    pub fn locked_key_count(&self) -> usize {
        self.key_locks.len()
    }

    /// Latest-wins gate for one preview client
    pub fn preview_gate(&self, client_id: &str) -> Arc<LatestWins<TypographyResult>> {
        self.preview_gates
            .entry(client_id.to_string())
            .or_default()
            .clone()
    }

    /// Forget a client's gate once no request holds it
    pub fn release_preview_gate(&self, client_id: &str) {
        self.preview_gates
            .remove_if(client_id, |_, gate| Arc::strong_count(gate) == 1);
    }
}

impl std::fmt::Debug for ServiceContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceContext")
            .field("store", &"dyn KvStore")
            .field("jwt_service", &self.jwt_service)
            .field("settings", &self.settings)
            .finish_non_exhaustive()
    }
}

/// Builder for creating ServiceContext with custom configuration
#[derive(Default)]
pub struct ServiceContextBuilder {
    store: Option<Arc<dyn KvStore>>,
    jwt_service: Option<Arc<JwtService>>,
    post_id_generator: Option<Arc<PostIdGenerator>>,
    settings: Option<ServiceSettings>,
}

impl ServiceContextBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn store(mut self, store: Arc<dyn KvStore>) -> Self {
        self.store = Some(store);
        self
    }

    pub fn jwt_service(mut self, service: Arc<JwtService>) -> Self {
        self.jwt_service = Some(service);
        self
    }

    pub fn post_id_generator(mut self, generator: Arc<PostIdGenerator>) -> Self {
        self.post_id_generator = Some(generator);
        self
    }

    pub fn settings(mut self, settings: ServiceSettings) -> Self {
        self.settings = Some(settings);
        self
    }

    /// Build the ServiceContext
    ///
    /// # Errors
    /// Returns `ServiceError::Validation` if the store or JWT service is missing
    pub fn build(self) -> ServiceResult<ServiceContext> {
        Ok(ServiceContext::new(
            self.store
                .ok_or_else(|| ServiceError::validation("store is required"))?,
            self.jwt_service
                .ok_or_else(|| ServiceError::validation("jwt_service is required"))?,
            self.post_id_generator.unwrap_or_default(),
            self.settings.unwrap_or_default(),
        ))
    }
}
