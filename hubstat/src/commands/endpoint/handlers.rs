use super::*;
use crate::context::AppContext;
use crate::format::{self, OutputFormat};
use libhubstat::endpoint::FileEndpointStore;

fn open_store(ctx: &AppContext) -> FileEndpointStore {
    match ctx.endpoint_store() {
        Ok(store) => store,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}

/// Handle the endpoint list subcommand
pub fn handle_endpoint_list(ctx: &AppContext, format: OutputFormat) {
    let store = open_store(ctx);
    match list_endpoints(&store) {
        Ok(endpoints) => {
            if endpoints.is_empty() {
                println!("No endpoints configured.");
                return;
            }

            match format {
                OutputFormat::Pretty => {
                    use tabled::Table;
                    let table = Table::new(&endpoints).to_string();
                    println!("{}", table);
                }
                _ => match format::format_output_vec(&endpoints, format) {
                    Ok(output) => println!("{}", output),
                    Err(e) => {
                        eprintln!("Error formatting output: {}", e);
                        std::process::exit(1);
                    }
                },
            }
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}

/// Handle the endpoint add subcommand
pub fn handle_endpoint_add(ctx: &AppContext, name: &str, url: &str, kind: &str) {
    let store = open_store(ctx);
    match add_endpoint(&store, name, url, kind) {
        Ok(endpoint) => format::success(&format!(
            "Added endpoint '{}' with id {}",
            endpoint.name, endpoint.id
        )),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}

/// Handle the endpoint remove subcommand
pub fn handle_endpoint_remove(ctx: &AppContext, raw_id: &str) {
    let store = open_store(ctx);
    match remove_endpoint(&store, raw_id) {
        Ok(id) => format::success(&format!("Removed endpoint {}", id)),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}
