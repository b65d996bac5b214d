mod config_commands;
mod curate_commands;
mod runtime_commands;
mod validate_commands;

use std::path::PathBuf;

use {
    clap::{Parser, Subcommand},
    plugdex_config::PlugdexConfig,
    tracing::debug,
    tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt},
};

#[derive(Parser)]
#[command(name = "plugdex", about = "plugdex: launcher plugin catalog", version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Log level (trace, debug, info, warn, error).
    #[arg(long, global = true, default_value = "info")]
    log_level: String,

    /// Output logs as JSON instead of human-readable.
    #[arg(long, global = true, default_value_t = false)]
    json_logs: bool,

    /// Config file to load instead of the standard locations.
    #[arg(long, global = true, env = "PLUGDEX_CONFIG")]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Enrich a seed catalog from GitHub and publish the curated document.
    Curate(curate_commands::CurateArgs),
    /// Resolve the catalog against installed plugins and rank it.
    Query(runtime_commands::QueryArgs),
    /// Show or run the actions available for one plugin.
    Actions(runtime_commands::ActionsArgs),
    /// Report missing fields in a catalog document without network access.
    Validate(validate_commands::ValidateArgs),
    /// Print the effective configuration.
    Config,
}

fn init_telemetry(cli: &Cli) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cli.log_level));

    let registry = tracing_subscriber::registry().with(filter);

    if cli.json_logs {
        registry
            .with(
                fmt::layer()
                    .json()
                    .with_target(true)
                    .with_writer(std::io::stderr),
            )
            .init();
    } else {
        registry
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_thread_ids(false)
                    .with_writer(std::io::stderr),
            )
            .init();
    }
}

fn load_config(cli: &Cli) -> anyhow::Result<PlugdexConfig> {
    match &cli.config {
        Some(path) => {
            let mut config = plugdex_config::load_config(path)?;
            plugdex_config::apply_env_overrides(&mut config, |name| std::env::var(name).ok());
            Ok(config)
        },
        None => Ok(plugdex_config::discover_and_load()),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    init_telemetry(&cli);

    debug!(version = env!("CARGO_PKG_VERSION"), "plugdex starting");
    let config = load_config(&cli)?;

    match cli.command {
        Commands::Curate(args) => curate_commands::handle_curate(args, &config).await,
        Commands::Query(args) => runtime_commands::handle_query(args, &config).await,
        Commands::Actions(args) => runtime_commands::handle_actions(args, &config).await,
        Commands::Validate(args) => validate_commands::handle_validate(args, &config).await,
        Commands::Config => config_commands::handle_config(&config, cli.config.as_deref()),
    }
}
