use serde::{Deserialize, Serialize};

/// Body served by the agent service at its root path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceStatus {
    pub status: String,
    #[serde(default)]
    pub orchestrator_available: bool,
}

impl ServiceStatus {
    pub fn is_online(&self) -> bool {
        self.status.eq_ignore_ascii_case("online")
    }
}

/// Outcome of one probe of the service root.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Availability {
    pub available: bool,
    /// Decoded root body; `None` when down or when the body is not a status document.
    pub status: Option<ServiceStatus>,
}

impl Availability {
    pub fn unavailable() -> Self {
        Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_root_body() {
        let status: ServiceStatus =
            serde_json::from_str(r#"{"status":"online","orchestrator_available":false}"#).unwrap();
        assert!(status.is_online());
        assert!(!status.orchestrator_available);
    }

    #[test]
    fn orchestrator_flag_defaults_to_false() {
        let status: ServiceStatus = serde_json::from_str(r#"{"status":"degraded"}"#).unwrap();
        assert!(!status.is_online());
        assert!(!status.orchestrator_available);
    }
}
