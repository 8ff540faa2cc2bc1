use std::sync::Arc;

use anyhow::Context;
use biblio_db::MemoryStore;
use biblio_kernel::settings::Settings;
use clap::{Parser, Subcommand};

/// Library management backend
#[derive(Debug, Parser)]
#[command(name = "biblio", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Run the HTTP server until Ctrl-C
    Serve,
    /// Print the merged OpenAPI document
    Openapi {
        /// Pretty-print the JSON
        #[arg(long)]
        pretty: bool,
    },
    /// Print the effective configuration
    Settings,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let settings = Settings::load().with_context(|| "failed to load settings")?;

    match cli.command {
        Command::Serve => {
            biblio_telemetry::init(&settings.telemetry)?;
            tracing::info!(env = ?settings.environment, "biblio serve");
            biblio_app::run(settings).await
        }
        Command::Openapi { pretty } => {
            let registry = biblio_app::build_registry(Arc::new(MemoryStore::new()));
            let spec = biblio_http::router::merged_openapi(&registry);
            let rendered = if pretty {
                serde_json::to_string_pretty(&spec)?
            } else {
                serde_json::to_string(&spec)?
            };
            println!("{rendered}");
            Ok(())
        }
        Command::Settings => {
            println!("{}", serde_json::to_string_pretty(&settings)?);
            Ok(())
        }
    }
}
