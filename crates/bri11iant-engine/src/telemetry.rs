//! Telemetry
//!
//! Reports newly found problems to a remote service. Delivery is
//! best-effort: failures are logged at debug level and dropped.

use bri11iant_net::{NetError, Request, ResourceLoader};
use serde::Serialize;

/// One reported problem
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TelemetryReport {
    /// Markup the diagnostic points at
    pub html: String,
    pub message: String,
    pub severity: u8,
    pub user_id: String,
}

/// Receiver of telemetry reports; must not block
pub trait TelemetrySink: Send + Sync {
    fn report(&self, report: TelemetryReport);
}

/// Posts reports as JSON to `{base}/diagnostics`
#[derive(Debug, Clone)]
pub struct HttpTelemetry {
    endpoint: String,
    loader: ResourceLoader,
}

impl HttpTelemetry {
    pub fn new(base_url: &str, loader: ResourceLoader) -> Self {
        Self {
            endpoint: format!("{}/diagnostics", base_url.trim_end_matches('/')),
            loader,
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Send one report and wait for the response
    pub async fn send(&self, report: &TelemetryReport) -> Result<(), NetError> {
        let body = serde_json::to_string(report).map_err(|e| NetError::InvalidEncoding(e.to_string()))?;
        self.loader.request(Request::post(&self.endpoint).with_json(&body)).await?;
        Ok(())
    }
}

impl TelemetrySink for HttpTelemetry {
    fn report(&self, report: TelemetryReport) {
        let telemetry = self.clone();
        smol::spawn(async move {
            if let Err(e) = telemetry.send(&report).await {
                tracing::debug!("Telemetry to {} failed: {}", telemetry.endpoint, e);
            }
        })
        .detach();
    }
}
