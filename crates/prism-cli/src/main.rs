use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use prism_application::AppServices;
use prism_infrastructure::AppConfig;
use tracing::debug;
use tracing_subscriber::EnvFilter;

mod commands;

use commands::run::RunArgs;
use commands::sessions::SessionAction;
use commands::templates::TemplateAction;

/// Log filter variable, `warn` when unset.
const LOG_ENV: &str = "PRISM_LOG";

#[derive(Parser)]
#[command(name = "prism")]
#[command(about = "Prism - rule-based text products with metrics, sessions and daily quotas", long_about = None)]
struct Cli {
    /// Config file (default: $PRISM_CONFIG or <config dir>/prism/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Data directory (default: $PRISM_DATA_DIR, the config file, or <data dir>/prism)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// User the command acts for
    #[arg(long, short, global = true, default_value = "local")]
    user: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a product on some text
    Run(RunArgs),
    /// Manage saved sessions
    Sessions {
        #[command(subcommand)]
        action: SessionAction,
    },
    /// Manage templates
    Templates {
        #[command(subcommand)]
        action: TemplateAction,
    },
    /// Show today's usage for a product
    Usage {
        product: String,
        #[arg(long)]
        json: bool,
    },
    /// List available products
    Products {
        #[arg(long)]
        json: bool,
    },
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => AppConfig::load(path)?,
        None => AppConfig::load_default()?,
    };
    let app = AppServices::open(config, cli.data_dir)?;
    let user = cli.user;
    debug!(%user, "Dispatching command");

    match cli.command {
        Commands::Run(args) => commands::run::execute(&app, &user, args).await?,
        Commands::Sessions { action } => commands::sessions::execute(&app, &user, action).await?,
        Commands::Templates { action } => {
            commands::templates::execute(&app, &user, action).await?
        }
        Commands::Usage { product, json } => {
            commands::usage::show(&app, &user, &product, json).await?
        }
        Commands::Products { json } => commands::products::list(&app, json)?,
    }

    Ok(())
}
