//! Prometheus metrics for the launcher.
//!
//! All metrics are aggregated in the [`Metrics`] struct for easy tracking and management.

use metrics::{counter, describe_counter, describe_histogram, histogram};
use std::time::Duration;

/// Aggregated metrics for the launcher.
///
/// This struct provides a centralized interface for recording all launcher metrics.
/// Metrics are registered with the global metrics registry on creation.
#[derive(Debug, Clone)]
pub struct Metrics {
    _private: (),
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}

impl Metrics {
    /// Create a new metrics instance and register all metric descriptions.
    pub fn new() -> Self {
        Self::register_descriptions();
        Self { _private: () }
    }

    /// Register metric descriptions with the global registry.
    fn register_descriptions() {
        // Deployment metrics
        describe_counter!(
            "launcher_deployments_total",
            "Total number of token deployments attempted"
        );
        describe_counter!(
            "launcher_deployments_success_total",
            "Total number of token deployments confirmed and recorded"
        );
        describe_counter!(
            "launcher_deployments_failure_total",
            "Total number of failed token deployments"
        );
        describe_counter!(
            "launcher_orphaned_deployments_total",
            "Deployments confirmed on-chain whose registry write failed"
        );
        describe_histogram!(
            "launcher_deployment_duration_seconds",
            "Duration of each deployment pipeline run in seconds"
        );

        // Management call metrics
        describe_counter!(
            "launcher_management_calls_total",
            "Total successful management calls by contract function"
        );
        describe_counter!(
            "launcher_management_failures_total",
            "Total failed management calls by contract function"
        );

        // Registry metrics
        describe_counter!(
            "launcher_registry_lookups_total",
            "Total deployment list lookups against the registry"
        );
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Deployment metrics
    // ─────────────────────────────────────────────────────────────────────────────

    /// Record a completed deployment pipeline run.
    pub fn record_deployment(&self, success: bool, duration: Duration) {
        counter!("launcher_deployments_total").increment(1);
        histogram!("launcher_deployment_duration_seconds").record(duration.as_secs_f64());

        if success {
            counter!("launcher_deployments_success_total").increment(1);
        } else {
            counter!("launcher_deployments_failure_total").increment(1);
        }
    }

    /// Record a deployment that is live on-chain but missing from the
    /// registry.
    pub fn record_orphaned_deployment(&self) {
        counter!("launcher_orphaned_deployments_total").increment(1);
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Management call metrics
    // ─────────────────────────────────────────────────────────────────────────────

    /// Record a management call outcome by contract function name.
    pub fn record_management_call(&self, function: &str, success: bool) {
        if success {
            counter!("launcher_management_calls_total", "function" => function.to_string())
                .increment(1);
        } else {
            counter!("launcher_management_failures_total", "function" => function.to_string())
                .increment(1);
        }
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Registry metrics
    // ─────────────────────────────────────────────────────────────────────────────

    /// Record a registry listing lookup.
    pub fn record_registry_lookup(&self) {
        counter!("launcher_registry_lookups_total").increment(1);
    }
}

/// Install the Prometheus metrics exporter and start the HTTP server.
///
/// Returns an error if the server fails to bind to the specified port.
pub fn install_prometheus_exporter(port: u16) -> eyre::Result<()> {
    use metrics_exporter_prometheus::PrometheusBuilder;
    use std::net::SocketAddr;

    let addr = SocketAddr::from(([0, 0, 0, 0], port));

    PrometheusBuilder::new()
        .with_http_listener(addr)
        .install()
        .map_err(|e| eyre::eyre!("Failed to install Prometheus exporter: {}", e))?;

    Ok(())
}
