use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use tracing::debug;

use crate::application::{
    CheckAvailabilityUseCase, ConverseUseCase, HttpTransport, SendChatQueryUseCase,
};
use crate::connector::{ReqwestTransport, ScriptedTransport};

pub struct ContainerConfig {
    /// Service root. Falls back to `FINCHAT_BASE_URL`, then the local default.
    pub base_url: Option<String>,
    /// Per-request timeout. Falls back to `FINCHAT_TIMEOUT_SECS`; none if unset.
    /// Zero is rejected by [`Container::new`].
    pub timeout_secs: Option<u64>,
    /// Answer from a canned in-process agent instead of the network.
    pub mock_agent: bool,
}

pub struct Container {
    transport: Arc<dyn HttpTransport>,
    base_url: String,
    mock_agent: bool,
}

impl Container {
    pub fn new(config: ContainerConfig) -> Result<Self> {
        if config.mock_agent {
            debug!("Using mock agent transport");
            return Ok(Self {
                transport: Arc::new(ScriptedTransport::mock_agent()),
                base_url: "mock://agent".to_string(),
                mock_agent: true,
            });
        }

        let base_url = config
            .base_url
            .unwrap_or_else(ReqwestTransport::configured_base_url);
        let timeout = match config.timeout_secs {
            Some(secs) => Some(Duration::from_secs(secs)),
            None => ReqwestTransport::configured_timeout()?,
        };

        let transport = ReqwestTransport::new(base_url, timeout)?;
        debug!(
            "Using agent service at {} (timeout: {:?})",
            transport.base_url(),
            timeout
        );

        Ok(Self {
            base_url: transport.base_url().to_string(),
            transport: Arc::new(transport),
            mock_agent: false,
        })
    }

    /// Wires the use cases to an arbitrary transport.
    pub fn with_transport(transport: Arc<dyn HttpTransport>, base_url: impl Into<String>) -> Self {
        Self {
            transport,
            base_url: base_url.into(),
            mock_agent: false,
        }
    }

    pub fn chat_use_case(&self) -> SendChatQueryUseCase {
        SendChatQueryUseCase::new(self.transport.clone())
    }

    pub fn availability_use_case(&self) -> CheckAvailabilityUseCase {
        CheckAvailabilityUseCase::new(self.transport.clone())
    }

    pub fn converse_use_case(&self) -> ConverseUseCase {
        ConverseUseCase::new(self.chat_use_case(), self.availability_use_case())
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn mock_agent(&self) -> bool {
        self.mock_agent
    }
}
