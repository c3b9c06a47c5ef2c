use crate::{
    abstract_trait::DynTokenStore,
    di::DependenciesInject,
    guard::RouteGuard,
    middleware::EdgeGate,
    policy::AccessPolicy,
    service::ApiClient,
    session::{JarTokenStore, SessionManager},
};
use anyhow::{Context, Result};
use axum_extra::extract::cookie::CookieJar;
use prometheus_client::registry::Registry;
use shared::{
    config::Config,
    utils::{GateMetrics, Metrics},
};
use std::{sync::Arc, time::Duration};
use tokio::sync::Mutex;
use tracing::info;

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub di_container: DependenciesInject,
    pub policy: AccessPolicy,
    pub gate: Arc<EdgeGate>,
    pub guard: RouteGuard,
    pub registry: Arc<Mutex<Registry>>,
    pub gate_metrics: GateMetrics,
}

impl AppState {
    pub fn new(config: &Config) -> Result<Self> {
        let metrics = Metrics::new();

        info!("Backend API at {}", config.api_url);

        let client = ApiClient::new(
            &config.api_url,
            Duration::from_secs(config.request_timeout_secs),
            metrics.clone(),
        )
        .context("Failed to build backend API client")?;

        let di_container = DependenciesInject::new(Arc::new(client));

        Ok(Self::with_dependencies(config, di_container, metrics))
    }

    pub fn with_dependencies(
        config: &Config,
        di_container: DependenciesInject,
        metrics: Metrics,
    ) -> Self {
        let mut registry = Registry::default();
        let gate_metrics = GateMetrics::default();

        metrics.register(&mut registry);
        gate_metrics.register(&mut registry);

        let policy = AccessPolicy::standard();
        let gate = Arc::new(EdgeGate::new(
            di_container.auth_api.clone(),
            policy.clone(),
            gate_metrics.clone(),
            config.secure_cookies,
        ));

        Self {
            config: config.clone(),
            guard: RouteGuard::new(policy.clone()),
            policy,
            gate,
            di_container,
            registry: Arc::new(Mutex::new(registry)),
            gate_metrics,
        }
    }

    /// Session bound to one request's cookies. No background loop: the
    /// manager is dropped with the response.
    pub fn request_session(&self, jar: CookieJar) -> (SessionManager, Arc<JarTokenStore>) {
        let store = Arc::new(JarTokenStore::new(jar, self.config.secure_cookies));
        let manager = SessionManager::new(self.di_container.auth_api.clone(), store.clone(), None);
        (manager, store)
    }

    /// Long-lived session over any store, re-checked every
    /// `REFRESH_INTERVAL_SECS` while signed in.
    pub fn client_session(&self, store: DynTokenStore) -> SessionManager {
        SessionManager::new(
            self.di_container.auth_api.clone(),
            store,
            Some(Duration::from_secs(self.config.refresh_interval_secs)),
        )
    }
}
