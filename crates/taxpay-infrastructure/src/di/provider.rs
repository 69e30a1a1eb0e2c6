//! Service provider (composition root)
//!
//! Mounting a provider starts registry initialization in the background
//! and publishes exactly one [`ServiceContext`]: the live services on
//! success, the fallback services when construction fails or times out.
//!
//! ```text
//! Initializing ──┬── Ready(Live) ─────┬──▶ Unmounted
//!                └── Ready(Degraded) ─┘
//! ```
//!
//! Unmounting (or dropping) the provider cancels an in-flight
//! initialization; a result that arrives afterwards is discarded.

use crate::config::AppConfig;
use crate::di::accessors::{run_scoped, run_scoped_sync};
use crate::di::registry::ServiceRegistry;
use crate::di::services::{ServiceHandle, ServiceKey, Services};
use std::fmt;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use taxpay_domain::ServiceName;
use taxpay_domain::error::{Error, Result};
use taxpay_domain::value_objects::Locale;
use tokio::sync::watch;
use tokio::task::futures::TaskLocalFuture;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info};

/// Whether a context carries live or fallback services
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServiceMode {
    /// Every service was constructed
    Live,
    /// Construction failed; the fallback services are in use
    Degraded {
        /// Why construction failed
        reason: String,
    },
}

struct ContextInner {
    services: Arc<Services>,
    mode: ServiceMode,
}

/// Read-only view of the services published by a provider
///
/// Cheap to clone; clones share identity (see [`ptr_eq`](Self::ptr_eq)).
#[derive(Clone)]
pub struct ServiceContext {
    inner: Arc<ContextInner>,
}

impl ServiceContext {
    /// Context over live services
    pub fn live(services: Arc<Services>) -> Self {
        Self {
            inner: Arc::new(ContextInner {
                services,
                mode: ServiceMode::Live,
            }),
        }
    }

    /// Context over fallback services
    pub fn degraded(reason: impl Into<String>, services: Services) -> Self {
        Self {
            inner: Arc::new(ContextInner {
                services: Arc::new(services),
                mode: ServiceMode::Degraded {
                    reason: reason.into(),
                },
            }),
        }
    }

    /// The published services
    pub fn services(&self) -> &Arc<Services> {
        &self.inner.services
    }

    /// Live or degraded
    pub fn mode(&self) -> &ServiceMode {
        &self.inner.mode
    }

    /// Whether the fallback services are in use
    pub fn is_degraded(&self) -> bool {
        matches!(self.inner.mode, ServiceMode::Degraded { .. })
    }

    /// Handle for one service
    pub fn get(&self, name: ServiceName) -> ServiceHandle {
        self.inner.services.get(name)
    }

    /// Typed access by key
    pub fn service<K: ServiceKey>(&self) -> Arc<K::Service> {
        self.inner.services.service::<K>()
    }

    /// Whether both values are the same published context
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }

    /// Run a future with this context visible to the accessors
    ///
    /// The returned future owns a clone of the context, so it can be
    /// handed to `tokio::spawn`.
    pub fn scope<F: Future>(&self, fut: F) -> TaskLocalFuture<ServiceContext, F> {
        run_scoped(self.clone(), fut)
    }

    /// Run a closure with this context visible to the accessors
    pub fn sync_scope<R>(&self, f: impl FnOnce() -> R) -> R {
        run_scoped_sync(self.clone(), f)
    }
}

impl fmt::Debug for ServiceContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServiceContext")
            .field("mode", &self.inner.mode)
            .field("services", &self.inner.services)
            .finish()
    }
}

/// Coarse lifecycle position of a provider
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderPhase {
    /// Registry initialization in progress
    Initializing,
    /// Live services published
    Live,
    /// Fallback services published
    Degraded,
    /// Provider torn down
    Unmounted,
}

/// State observed through [`ServiceProvider::subscribe`]
#[derive(Debug, Clone)]
pub enum ProviderState {
    /// Registry initialization in progress
    Initializing,
    /// A context has been published
    Ready(ServiceContext),
    /// Provider torn down
    Unmounted,
}

impl ProviderState {
    /// Coarse phase of this state
    pub fn phase(&self) -> ProviderPhase {
        match self {
            Self::Initializing => ProviderPhase::Initializing,
            Self::Ready(ctx) if ctx.is_degraded() => ProviderPhase::Degraded,
            Self::Ready(_) => ProviderPhase::Live,
            Self::Unmounted => ProviderPhase::Unmounted,
        }
    }
}

/// Provider settings
#[derive(Debug, Clone)]
pub struct ProviderOptions {
    /// Budget for registry initialization before falling back
    pub init_timeout: Duration,
    /// Locale the fallback language service is pinned to
    pub fallback_locale: Locale,
}

impl Default for ProviderOptions {
    fn default() -> Self {
        Self {
            init_timeout: Duration::from_millis(crate::constants::DEFAULT_INIT_TIMEOUT_MS),
            fallback_locale: Locale::default(),
        }
    }
}

impl ProviderOptions {
    /// Options from application configuration
    pub fn from_config(config: &AppConfig) -> Result<Self> {
        Ok(Self {
            init_timeout: config.provider.init_timeout(),
            fallback_locale: Locale::parse(&config.language.default)?,
        })
    }

    /// Override the initialization budget
    #[must_use]
    pub fn with_init_timeout(mut self, init_timeout: Duration) -> Self {
        self.init_timeout = init_timeout;
        self
    }
}

/// Composition root exposing one [`ServiceContext`] to its scope
pub struct ServiceProvider {
    state: Arc<watch::Sender<ProviderState>>,
    cancel: CancellationToken,
    registry: Option<Arc<ServiceRegistry>>,
}

impl ServiceProvider {
    /// Mount a provider and start initializing `registry`
    ///
    /// Fails with [`Error::Internal`] when called outside a tokio runtime.
    pub fn mount(registry: Arc<ServiceRegistry>, options: ProviderOptions) -> Result<Self> {
        let handle = tokio::runtime::Handle::try_current().map_err(|e| {
            Error::internal(format!(
                "ServiceProvider must be mounted inside a tokio runtime: {e}"
            ))
        })?;

        let (state, _) = watch::channel(ProviderState::Initializing);
        let state = Arc::new(state);
        let cancel = CancellationToken::new();

        handle.spawn(initialize_and_publish(
            Arc::clone(&registry),
            options,
            Arc::clone(&state),
            cancel.clone(),
        ));

        Ok(Self {
            state,
            cancel,
            registry: Some(registry),
        })
    }

    /// Mount a provider over an already constructed service set
    pub fn from_services(services: Services) -> Self {
        Self::from_context(ServiceContext::live(Arc::new(services)))
    }

    /// Mount a provider that publishes `context` immediately
    pub fn from_context(context: ServiceContext) -> Self {
        let (state, _) = watch::channel(ProviderState::Ready(context));
        Self {
            state: Arc::new(state),
            cancel: CancellationToken::new(),
            registry: None,
        }
    }

    /// Wait until a context is published
    pub async fn ready(&self) -> Result<ServiceContext> {
        let mut rx = self.state.subscribe();
        let state = rx
            .wait_for(|state| !matches!(state, ProviderState::Initializing))
            .await
            .map_err(|_| Error::Unmounted)?;
        match &*state {
            ProviderState::Ready(ctx) => Ok(ctx.clone()),
            ProviderState::Unmounted => Err(Error::Unmounted),
            ProviderState::Initializing => Err(Error::NotReady),
        }
    }

    /// The published context, without waiting
    pub fn context(&self) -> Result<ServiceContext> {
        match &*self.state.borrow() {
            ProviderState::Ready(ctx) => Ok(ctx.clone()),
            ProviderState::Initializing => Err(Error::NotReady),
            ProviderState::Unmounted => Err(Error::Unmounted),
        }
    }

    /// Current lifecycle phase
    pub fn phase(&self) -> ProviderPhase {
        self.state.borrow().phase()
    }

    /// Watch state transitions
    pub fn subscribe(&self) -> watch::Receiver<ProviderState> {
        self.state.subscribe()
    }

    /// The registry this provider initializes, if it was mounted over one
    pub fn registry(&self) -> Option<&Arc<ServiceRegistry>> {
        self.registry.as_ref()
    }

    /// Wait for the context, then run `fut` inside its scope
    pub async fn scope<F: Future>(&self, fut: F) -> Result<F::Output> {
        let ctx = self.ready().await?;
        Ok(ctx.scope(fut).await)
    }

    /// Tear the provider down
    ///
    /// Cancels an in-flight initialization. Idempotent.
    pub fn unmount(&self) {
        self.cancel.cancel();
        self.state.send_if_modified(|state| {
            if matches!(state, ProviderState::Unmounted) {
                return false;
            }
            *state = ProviderState::Unmounted;
            true
        });
    }
}

impl Drop for ServiceProvider {
    fn drop(&mut self) {
        self.unmount();
    }
}

impl fmt::Debug for ServiceProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServiceProvider")
            .field("phase", &self.phase())
            .finish_non_exhaustive()
    }
}

async fn initialize_and_publish(
    registry: Arc<ServiceRegistry>,
    options: ProviderOptions,
    state: Arc<watch::Sender<ProviderState>>,
    cancel: CancellationToken,
) {
    let millis = u64::try_from(options.init_timeout.as_millis()).unwrap_or(u64::MAX);

    let outcome = tokio::select! {
        biased;
        () = cancel.cancelled() => {
            debug!("Provider unmounted during initialization, discarding result");
            return;
        }
        result = tokio::time::timeout(options.init_timeout, registry.initialize()) => {
            result.unwrap_or_else(|_| {
                Err(Error::timeout("service registry initialization", millis))
            })
        }
    };

    if cancel.is_cancelled() {
        debug!("Provider unmounted during initialization, discarding result");
        return;
    }

    let context = match outcome {
        Ok(services) => {
            info!("Services ready");
            ServiceContext::live(services)
        }
        Err(e) => {
            error!(error = %e, "Service initialization failed, running with fallback services");
            ServiceContext::degraded(
                e.to_string(),
                Services::fallback_with_locale(options.fallback_locale),
            )
        }
    };

    state.send_if_modified(|current| {
        if cancel.is_cancelled() || !matches!(current, ProviderState::Initializing) {
            return false;
        }
        *current = ProviderState::Ready(context);
        true
    });
}
