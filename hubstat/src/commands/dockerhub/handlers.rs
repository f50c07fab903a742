use super::*;
use crate::context::AppContext;
use crate::format::{self, OutputFormat};
use libhubstat::auth::FileCredentialStore;
use libhubstat::client::Client;

fn open_store(ctx: &AppContext) -> FileCredentialStore {
    match ctx.credential_store() {
        Ok(store) => store,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}

/// Handle the dockerhub login subcommand
pub async fn handle_login(ctx: &AppContext, username: Option<&str>, password: Option<&str>) {
    let store = open_store(ctx);
    let dockerhub = match Client::with_config(ctx.config.client_config()) {
        Ok(client) => DockerHub::new(client, ctx.config.dockerhub.clone()),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    match login_dockerhub(&store, &dockerhub, username, password).await {
        Ok(username) => format::success(&format!("Stored DockerHub credentials for '{}'", username)),
        Err(e) => {
            format::error(&e);
            std::process::exit(1);
        }
    }
}

/// Handle the dockerhub logout subcommand
pub fn handle_logout(ctx: &AppContext) {
    let store = open_store(ctx);
    match logout_dockerhub(&store) {
        Ok(()) => format::success("Removed DockerHub credentials, pulls are now anonymous"),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}

/// Handle the dockerhub show subcommand
pub fn handle_show(ctx: &AppContext, format: OutputFormat) {
    let store = open_store(ctx);
    match show_dockerhub(&store) {
        Ok(account) => match format::format_output(&account, format) {
            Ok(output) => println!("{}", output),
            Err(e) => {
                eprintln!("Error formatting output: {}", e);
                std::process::exit(1);
            }
        },
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}
