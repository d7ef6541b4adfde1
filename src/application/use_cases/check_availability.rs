use std::sync::Arc;

use tracing::{debug, warn};

use crate::application::{HttpRequest, HttpTransport};
use crate::domain::{Availability, ServiceStatus, ROOT_PATH};

/// Liveness check against the service root.
///
/// Single shot: no polling and no memory of earlier probes. Failures are
/// swallowed and reported as `false` / `None`.
pub struct CheckAvailabilityUseCase {
    transport: Arc<dyn HttpTransport>,
}

impl CheckAvailabilityUseCase {
    pub fn new(transport: Arc<dyn HttpTransport>) -> Self {
        Self { transport }
    }

    /// `true` iff `GET /` completes with a 2xx status.
    pub async fn is_available(&self) -> bool {
        self.check().await.available
    }

    /// Decoded root body, when the service is up and reports one.
    pub async fn status(&self) -> Option<ServiceStatus> {
        self.check().await.status
    }

    /// One `GET /` yielding both the availability flag and the status body.
    pub async fn check(&self) -> Availability {
        let response = match self.transport.send(HttpRequest::get(ROOT_PATH)).await {
            Ok(response) if response.is_success() => response,
            Ok(response) => {
                warn!("Service root returned status {}", response.status());
                return Availability::unavailable();
            }
            Err(e) => {
                warn!("API connection error: {e}");
                return Availability::unavailable();
            }
        };

        let status = match serde_json::from_str::<ServiceStatus>(response.body()) {
            Ok(status) => Some(status),
            Err(e) => {
                debug!("Service root body is not a status document: {e}");
                None
            }
        };

        Availability {
            available: true,
            status,
        }
    }
}
