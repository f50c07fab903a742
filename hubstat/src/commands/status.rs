use crate::context::AppContext;
use crate::format::{self, Formattable, OutputFormat};
use libhubstat::{HubStatError, RateLimitStatus, StatusService};
use serde::Serialize;

/// Rate-limit status of one endpoint, as printed by `hubstat status`
#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct StatusDisplay {
    pub endpoint: String,
    pub remaining: u64,
    pub limit: u64,
}

impl StatusDisplay {
    fn new(endpoint: &str, status: RateLimitStatus) -> Self {
        Self {
            endpoint: endpoint.trim().to_string(),
            remaining: status.remaining,
            limit: status.limit,
        }
    }
}

impl Formattable for StatusDisplay {
    fn format_pretty(&self) -> String {
        format!(
            "Endpoint: {}\nRemaining pulls: {}\nPull limit: {}",
            self.endpoint, self.remaining, self.limit
        )
    }
}

/// Retrieve the status for `raw_id` through `service`
pub(crate) async fn fetch_status(
    service: &StatusService,
    raw_id: &str,
) -> Result<StatusDisplay, HubStatError> {
    let status = service.endpoint_dockerhub_status(raw_id).await?;
    Ok(StatusDisplay::new(raw_id, status))
}

/// User-facing message for a failed status retrieval
pub(crate) fn describe_error(err: &HubStatError) -> String {
    let mut message = format!("{}: {}", err.summary(), err);
    if err.is_credentials_rejected() {
        message.push_str("\nDockerHub rejected the stored credentials, check them with 'hubstat dockerhub show'");
    }
    message
}

/// Handle the status command
pub async fn handle_status(ctx: &AppContext, raw_id: &str, format: OutputFormat) {
    let service = match ctx.status_service() {
        Ok(service) => service,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    let spinner = format::spinner("Querying DockerHub...");
    let result = fetch_status(&service, raw_id).await;
    spinner.finish_and_clear();

    match result {
        Ok(display) => match format::format_output(&display, format) {
            Ok(output) => println!("{}", output),
            Err(e) => {
                eprintln!("Error formatting output: {}", e);
                std::process::exit(1);
            }
        },
        Err(e) => {
            format::error(&describe_error(&e));
            std::process::exit(1);
        }
    }
}

#[cfg(test)]
#[path = "status_tests.rs"]
mod tests;
