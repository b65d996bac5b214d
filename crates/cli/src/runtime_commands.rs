use std::{path::PathBuf, sync::Arc, time::Duration};

use {
    anyhow::{Context, Result, bail},
    async_trait::async_trait,
    clap::Args,
    plugdex_common::{Architecture, InstalledMetadata, Theme},
    plugdex_config::PlugdexConfig,
    plugdex_lifecycle::{
        ActionExecutor, ActionRequest, Handler, LifecycleResolver, MemoryCache, Pair,
        PluginAction, QueryRanker, available_actions, display, installed,
    },
    serde::Serialize,
};

/// Where the catalog and the installed plugin list come from.
#[derive(Args)]
pub struct RuntimeArgs {
    /// Catalog source: local path or http(s) URL (overrides config).
    #[arg(long)]
    pub source: Option<String>,
    /// Directory holding installed plugins, one `plugin.json` per folder.
    #[arg(long, conflicts_with = "installed")]
    pub plugins_dir: Option<PathBuf>,
    /// JSON file with the host's installed plugin list.
    #[arg(long)]
    pub installed: Option<PathBuf>,
    /// Architecture used to pick release assets (overrides config).
    #[arg(long)]
    pub arch: Option<Architecture>,
    /// Theme used for icon paths (overrides config).
    #[arg(long)]
    pub theme: Option<Theme>,
}

#[derive(Args)]
pub struct QueryArgs {
    /// Free-text query; empty lists everything.
    #[arg(default_value = "")]
    pub text: String,
    #[command(flatten)]
    pub runtime: RuntimeArgs,
    /// Print results as JSON.
    #[arg(long)]
    pub json: bool,
}

#[derive(Args)]
pub struct ActionsArgs {
    /// Plugin identity.
    pub id: String,
    /// Action to hand to the executor (e.g. install, update, open-repo).
    #[arg(long)]
    pub run: Option<PluginAction>,
    #[command(flatten)]
    pub runtime: RuntimeArgs,
}

#[derive(Serialize)]
struct QueryResult<'a> {
    id: &'a str,
    name: &'a str,
    description: &'a str,
    score: i64,
    state: &'static str,
    icon: PathBuf,
    actions: Vec<PluginAction>,
    tooltip: String,
}

fn state(pair: &Pair) -> &'static str {
    if pair.is_update_available() {
        "update available"
    } else if pair.is_installed() {
        "installed"
    } else if pair.is_install_available() {
        "install available"
    } else {
        "unavailable"
    }
}

fn load_installed(args: &RuntimeArgs) -> Result<Vec<InstalledMetadata>> {
    if let Some(dir) = &args.plugins_dir {
        return Ok(installed::discover(dir)?);
    }
    if let Some(path) = &args.installed {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        return Ok(installed::from_json(&content)?);
    }
    Ok(Vec::new())
}

/// Build a handler and load the catalog, failing with the offered actions
/// when the source cannot be loaded.
async fn init_handler(args: &RuntimeArgs, config: &PlugdexConfig, query: &str) -> Result<Handler> {
    let architecture = args
        .arch
        .clone()
        .unwrap_or_else(|| config.runtime.architecture());
    let source = args
        .source
        .clone()
        .unwrap_or_else(|| config.source.location.clone());

    let handler = Handler::new(
        source,
        Duration::from_secs(config.cache.ttl_secs),
        Arc::new(MemoryCache::new()),
        LifecycleResolver::new(architecture),
        QueryRanker::default(),
    );

    let installed = load_installed(args)?;
    if !handler.init(&installed).await {
        let offered: Vec<_> = handler
            .actions(query)
            .iter()
            .map(|a| format!("{a:?}").to_lowercase())
            .collect();
        bail!(
            "invalid plugin source '{}': make sure the URL or path is valid (try: {})",
            handler.source(),
            offered.join(", ")
        );
    }
    Ok(handler)
}

pub async fn handle_query(args: QueryArgs, config: &PlugdexConfig) -> Result<()> {
    let handler = init_handler(&args.runtime, config, &args.text).await?;
    let theme = args.runtime.theme.unwrap_or(config.runtime.theme);
    let pairs = handler.query(&args.text);

    if args.json {
        let results: Vec<_> = pairs
            .iter()
            .map(|pair| QueryResult {
                id: pair.plugin.id.as_deref().unwrap_or_default(),
                name: pair.plugin.display_name(),
                description: pair.plugin.description.as_deref().unwrap_or_default(),
                score: pair.score,
                state: state(pair),
                icon: display::icon_path(pair, theme),
                actions: available_actions(pair),
                tooltip: pair.tooltip_text(),
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&results)?);
        return Ok(());
    }

    if pairs.is_empty() {
        eprintln!("No plugins match '{}'.", args.text);
    }
    for pair in &pairs {
        println!(
            "{:>5}  {:<32} {:<18} {}",
            pair.score,
            pair.plugin.display_name(),
            state(pair),
            pair.plugin.description.as_deref().unwrap_or_default()
        );
    }
    for action in handler.actions(&args.text) {
        eprintln!("Available: {action:?}");
    }
    Ok(())
}

/// Prints requests instead of running installers or opening browsers.
struct DryRunExecutor;

#[async_trait]
impl ActionExecutor for DryRunExecutor {
    async fn execute(&self, request: &ActionRequest) -> plugdex_lifecycle::Result<()> {
        println!("{}", serde_json::to_string_pretty(request)?);
        Ok(())
    }
}

pub async fn handle_actions(args: ActionsArgs, config: &PlugdexConfig) -> Result<()> {
    let handler = init_handler(&args.runtime, config, "").await?;
    let Some(pair) = handler.find(&args.id) else {
        bail!("no plugin with identity '{}' in {}", args.id, handler.source());
    };

    match args.run {
        Some(action) => {
            plugdex_lifecycle::dispatch(&DryRunExecutor, &pair, action).await?;
        },
        None => {
            println!("{}", pair.tooltip_title());
            println!("{}\n", pair.tooltip_text());
            let actions = available_actions(&pair);
            if actions.is_empty() {
                println!("No actions available.");
            }
            for action in actions {
                println!("  {:<20} {}", action.as_str(), action.title());
            }
        },
    }
    Ok(())
}
