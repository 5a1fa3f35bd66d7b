//! Metrics collection and exposition.
//!
//! # Metrics
//! - `cryptoart_wallet_connect_total` (counter): connect attempts by outcome
//! - `cryptoart_wallet_disconnect_total` (counter): disconnects by source
//! - `cryptoart_mint_total` (counter): mint attempts by outcome
//! - `cryptoart_notifications_total` (counter): notifications by severity
//! - `cryptoart_rpc_healthy` (gauge): 1=healthy, 0=unhealthy
//!
//! Without an installed recorder every call is a no-op.

use std::net::SocketAddr;

use metrics_exporter_prometheus::PrometheusBuilder;

/// Install the Prometheus recorder and its scrape endpoint.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics endpoint listening"),
        Err(e) => tracing::error!(error = %e, "Failed to install metrics exporter"),
    }
}

pub fn record_connect(outcome: &'static str) {
    metrics::counter!("cryptoart_wallet_connect_total", "outcome" => outcome).increment(1);
}

pub fn record_disconnect(source: &'static str) {
    metrics::counter!("cryptoart_wallet_disconnect_total", "source" => source).increment(1);
}

pub fn record_mint(outcome: &'static str) {
    metrics::counter!("cryptoart_mint_total", "outcome" => outcome).increment(1);
}

pub fn record_notification(severity: &'static str) {
    metrics::counter!("cryptoart_notifications_total", "severity" => severity).increment(1);
}

pub fn record_rpc_health(healthy: bool) {
    metrics::gauge!("cryptoart_rpc_healthy").set(if healthy { 1.0 } else { 0.0 });
}
