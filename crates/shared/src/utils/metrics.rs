use prometheus_client::metrics::counter::Counter;
use prometheus_client::metrics::family::Family;
use prometheus_client::metrics::histogram::{Histogram, exponential_buckets};
use prometheus_client::registry::Registry;
use prometheus_client_derive_encode::{EncodeLabelSet, EncodeLabelValue};

#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq, EncodeLabelValue)]
pub enum Method {
    Get,
    Post,
    Patch,
    Delete,
}

#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq, EncodeLabelValue)]
pub enum Status {
    Success,
    Error,
}

#[derive(Clone, Debug, Hash, PartialEq, Eq, EncodeLabelSet)]
pub struct Labels {
    pub method: Method,
    pub status: Status,
}

/// Backend call counters and latency.
#[derive(Clone, Debug)]
pub struct Metrics {
    pub request_counter: Family<Labels, Counter>,
    pub request_duration: Family<Labels, Histogram>,
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}

impl Metrics {
    pub fn new() -> Self {
        Self {
            request_counter: Family::default(),
            request_duration: Family::new_with_constructor(|| {
                Histogram::new(exponential_buckets(0.005, 2.0, 12))
            }),
        }
    }

    pub fn register(&self, registry: &mut Registry) {
        registry.register(
            "backend_requests",
            "Requests sent to the backend API",
            self.request_counter.clone(),
        );

        registry.register(
            "backend_request_duration_seconds",
            "Backend API request latency",
            self.request_duration.clone(),
        );
    }

    pub fn record(&self, method: Method, status: Status, duration_secs: f64) {
        let labels = Labels { method, status };
        self.request_counter.get_or_create(&labels).inc();
        self.request_duration
            .get_or_create(&labels)
            .observe(duration_secs);
    }
}

#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq, EncodeLabelValue)]
pub enum GateOutcome {
    Allow,
    Refreshed,
    RedirectMissingToken,
    RedirectForbidden,
    RedirectFailed,
}

#[derive(Clone, Debug, Hash, PartialEq, Eq, EncodeLabelSet)]
pub struct GateLabels {
    pub outcome: GateOutcome,
}

/// Edge gate decisions by outcome.
#[derive(Clone, Debug, Default)]
pub struct GateMetrics {
    pub decisions: Family<GateLabels, Counter>,
}

impl GateMetrics {
    pub fn register(&self, registry: &mut Registry) {
        registry.register(
            "edge_gate_decisions",
            "Edge gate decisions for protected requests",
            self.decisions.clone(),
        );
    }

    pub fn record(&self, outcome: GateOutcome) {
        self.decisions.get_or_create(&GateLabels { outcome }).inc();
    }

    pub fn count(&self, outcome: GateOutcome) -> u64 {
        self.decisions.get_or_create(&GateLabels { outcome }).get()
    }
}
