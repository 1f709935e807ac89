use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{error, info};

use kanban_catalog::catalog::{CatalogLoader, CatalogRegistry};
use kanban_catalog::config::Config;
use kanban_catalog::constants::DEFAULT_CONFIG_PATH;
use kanban_catalog::server::{start_server, ServerState, TemplateOrigin};
use kanban_catalog::templates::TemplateStore;
use kanban_catalog::{logging, metrics};

#[derive(Parser)]
#[command(name = "kanban_catalog")]
#[command(about = "Kanban example catalog: built-in templates merged with operator-configured ones")]
#[command(version)]
struct Cli {
    /// Path to the configuration file
    #[arg(long, default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve the kanban examples endpoint from a templates file
    Serve {
        /// Templates file (overrides server.templates_path)
        #[arg(long)]
        templates: Option<PathBuf>,
        /// Port to listen on (overrides server.port)
        #[arg(long)]
        port: Option<u16>,
    },
    /// Load the merged catalog from the backend and print it as JSON
    Catalog {
        /// Backend base URL (overrides remote.base_url)
        #[arg(long)]
        base_url: Option<String>,
        /// Print only the template names
        #[arg(long)]
        names_only: bool,
    },
    /// Print the examples payload for a templates file without serving it
    Examples {
        /// Templates file (overrides server.templates_path)
        #[arg(long)]
        templates: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    logging::init_logging();

    let cli = Cli::parse();
    let mut config = Config::load_or_default(&cli.config)?;
    config.apply_env_overrides()?;

    match cli.command {
        Commands::Serve { templates, port } => {
            metrics::init()?;
            let path = templates.unwrap_or_else(|| PathBuf::from(&config.server.templates_path));
            // Fail fast on a broken file; later requests re-read it
            let store = TemplateStore::load(&path)?;
            info!(templates = store.len(), "Starting kanban examples server");
            let state = ServerState::new(TemplateOrigin::File(path));
            start_server(state, port.unwrap_or(config.server.port)).await?;
        }
        Commands::Catalog { base_url, names_only } => {
            if let Some(url) = base_url {
                config.remote.base_url = url;
            }
            let registry = Arc::new(CatalogRegistry::new());
            let loader = CatalogLoader::from_config(&config.remote, registry)?;
            let catalog = loader.load().await;
            if names_only {
                for name in catalog.template_names() {
                    println!("{}", name);
                }
            } else {
                println!("{}", serde_json::to_string_pretty(&*catalog)?);
            }
        }
        Commands::Examples { templates } => {
            let path = templates.unwrap_or_else(|| PathBuf::from(&config.server.templates_path));
            match TemplateStore::load(&path) {
                Ok(store) => println!("{}", serde_json::to_string_pretty(&store.kanban_examples())?),
                Err(e) => {
                    error!("Failed to load templates: {}", e);
                    return Err(e.into());
                }
            }
        }
    }

    Ok(())
}
