use anyhow::Result;

use crate::ServiceStatus;

use super::super::Container;

pub struct StatusController<'a> {
    container: &'a Container,
}

impl<'a> StatusController<'a> {
    pub fn new(container: &'a Container) -> Self {
        Self { container }
    }

    pub async fn status(&self) -> Result<String> {
        let availability = self.container.availability_use_case().check().await;
        Ok(self.format_status(availability.available, availability.status.as_ref()))
    }

    fn format_status(&self, available: bool, status: Option<&ServiceStatus>) -> String {
        let mut output = format!(
            "Financial Agent Service\n=======================\nEndpoint:     {}\nAvailable:    {}",
            self.container.base_url(),
            if available { "yes" } else { "no" }
        );

        if let Some(status) = status {
            output.push_str(&format!(
                "\nStatus:       {}\nOrchestrator: {}",
                status.status,
                if status.orchestrator_available {
                    "available"
                } else {
                    "unavailable"
                }
            ));
        }

        output
    }
}
