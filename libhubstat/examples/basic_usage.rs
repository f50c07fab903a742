//! Basic usage example for the libhubstat library.
//!
//! Queries DockerHub for the pull quota of this machine, anonymously or with
//! the account given in `DOCKERHUB_USERNAME` / `DOCKERHUB_PASSWORD`.
//!
//! Run with: cargo run --example basic_usage

use libhubstat::{DockerHub, DockerHubCredentials};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("hubstat - Basic Usage Example\n");

    let credentials = match (
        std::env::var("DOCKERHUB_USERNAME"),
        std::env::var("DOCKERHUB_PASSWORD"),
    ) {
        (Ok(username), Ok(password)) => DockerHubCredentials::basic(username, password),
        _ => DockerHubCredentials::anonymous(),
    };

    let dockerhub = DockerHub::with_defaults()?;

    // Step by step: the token is only used for the second call
    let token = match dockerhub.acquire_token(&credentials).await {
        Ok(token) => token,
        Err(e) => {
            eprintln!("✗ Failed to get a token: {}", e);
            if e.is_credentials_rejected() {
                eprintln!("  DockerHub rejected the credentials");
            }
            return Ok(());
        }
    };
    println!("✓ Received token\n");

    match dockerhub.fetch_rate_limits(&token).await {
        Ok(status) => {
            println!("Pull limit:     {}", status.limit);
            println!("Pulls remaining: {}", status.remaining);
        }
        Err(e) => eprintln!("✗ Failed to read rate limits: {}", e),
    }

    Ok(())
}
