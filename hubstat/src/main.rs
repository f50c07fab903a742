use clap::{CommandFactory, Parser, Subcommand};
use std::path::PathBuf;

mod commands;
mod context;
mod format;
mod logging;
mod server;

/// hubstat - DockerHub pull rate-limit status
///
/// Reports how many DockerHub image pulls are left for the container runtime
/// endpoints managed from this machine.
#[derive(Parser, Debug)]
#[command(name = "hubstat")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Verbose output (can be repeated: -v, -vv)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Path to the configuration file
    #[arg(short, long, global = true, env = "HUBSTAT_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Display version information
    Version,
    /// Serve the status API over HTTP
    Serve {
        /// Address to listen on (overrides server.bind)
        #[arg(short, long, env = "HUBSTAT_BIND")]
        bind: Option<String>,
    },
    /// Show the DockerHub rate-limit status for an endpoint
    Status {
        /// Endpoint identifier
        id: String,
        /// Output format: pretty, json, yaml
        #[arg(short, long, default_value = "pretty")]
        format: String,
    },
    /// Manage endpoints
    Endpoint {
        #[command(subcommand)]
        command: EndpointCommands,
    },
    /// Manage the DockerHub account used for token requests
    Dockerhub {
        #[command(subcommand)]
        command: DockerhubCommands,
    },
    /// Generate shell completion scripts
    Completion {
        /// Shell to generate completion for
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

#[derive(Subcommand, Debug)]
enum EndpointCommands {
    /// List all endpoints
    #[command(visible_alias = "ls")]
    List {
        /// Output format: pretty, json, yaml
        #[arg(short, long, default_value = "pretty")]
        format: String,
    },
    /// Add an endpoint
    Add {
        /// Endpoint name
        name: String,
        /// Connection URL (unix://, npipe://, tcp://, https://)
        url: String,
        /// Endpoint type, e.g. docker, agent, kubernetes_local
        #[arg(short = 't', long = "type", default_value = "docker")]
        kind: String,
    },
    /// Remove an endpoint
    #[command(visible_alias = "rm")]
    Remove {
        /// Endpoint identifier
        id: String,
    },
}

#[derive(Subcommand, Debug)]
enum DockerhubCommands {
    /// Store DockerHub credentials
    Login {
        /// Username (will prompt if not provided)
        #[arg(short, long)]
        username: Option<String>,
        /// Password (will prompt if not provided)
        #[arg(short, long)]
        password: Option<String>,
    },
    /// Remove stored DockerHub credentials
    Logout,
    /// Show the stored DockerHub account
    Show {
        /// Output format: pretty, json, yaml
        #[arg(short, long, default_value = "pretty")]
        format: String,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Build context with precedence: defaults > config file > env vars > CLI flags
    let ctx = context::AppContext::build(cli.config.as_deref());
    logging::init(cli.verbose, &ctx.config.logging.level);

    match cli.command {
        Commands::Version => {
            commands::version::print_version();
        }
        Commands::Serve { bind } => {
            server::handle_serve(&ctx, bind.as_deref()).await;
        }
        Commands::Status { id, format } => {
            let fmt = format::OutputFormat::from(format.as_str());
            commands::status::handle_status(&ctx, &id, fmt).await;
        }
        Commands::Endpoint { command } => match command {
            EndpointCommands::List { format } => {
                let fmt = format::OutputFormat::from(format.as_str());
                commands::endpoint::handlers::handle_endpoint_list(&ctx, fmt);
            }
            EndpointCommands::Add { name, url, kind } => {
                commands::endpoint::handlers::handle_endpoint_add(&ctx, &name, &url, &kind);
            }
            EndpointCommands::Remove { id } => {
                commands::endpoint::handlers::handle_endpoint_remove(&ctx, &id);
            }
        },
        Commands::Dockerhub { command } => match command {
            DockerhubCommands::Login { username, password } => {
                commands::dockerhub::handlers::handle_login(
                    &ctx,
                    username.as_deref(),
                    password.as_deref(),
                )
                .await;
            }
            DockerhubCommands::Logout => {
                commands::dockerhub::handlers::handle_logout(&ctx);
            }
            DockerhubCommands::Show { format } => {
                let fmt = format::OutputFormat::from(format.as_str());
                commands::dockerhub::handlers::handle_show(&ctx, fmt);
            }
        },
        Commands::Completion { shell } => {
            let mut cmd = Cli::command();
            clap_complete::generate(shell, &mut cmd, "hubstat", &mut std::io::stdout());
        }
    }
}
