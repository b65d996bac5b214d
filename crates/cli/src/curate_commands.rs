use std::{path::PathBuf, sync::Arc};

use {
    anyhow::{Context, Result},
    clap::Args,
    plugdex_catalog::{Curator, GitHubClient},
    plugdex_config::PlugdexConfig,
    secrecy::Secret,
    tokio_util::sync::CancellationToken,
    tracing::{info, warn},
};

#[derive(Args)]
pub struct CurateArgs {
    /// Seed catalog: local path or http(s) URL.
    pub input: String,
    /// Where to write the curated document.
    pub output: PathBuf,
    /// GitHub access token (overrides config and PLUGDEX_GITHUB_TOKEN).
    pub token: Option<String>,
    /// Plugins fetched in parallel.
    #[arg(long)]
    pub concurrency: Option<usize>,
    /// GitHub API base URL.
    #[arg(long)]
    pub api_url: Option<String>,
}

pub async fn handle_curate(args: CurateArgs, config: &PlugdexConfig) -> Result<()> {
    let mut github = config.github.clone();
    if let Some(token) = args.token.filter(|t| !t.trim().is_empty()) {
        github.token = Some(Secret::new(token));
    }
    if let Some(api_url) = args.api_url {
        github.api_url = api_url;
    }
    let concurrency = args.concurrency.unwrap_or(github.concurrency);

    let client = GitHubClient::new(&github)?;
    let curator = Curator::new(Arc::new(client)).with_concurrency(concurrency);

    let cancel = CancellationToken::new();
    let on_signal = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("interrupt received, cancelling curation");
            on_signal.cancel();
        }
    });

    let curated = plugdex_catalog::run(
        &curator,
        &reqwest::Client::new(),
        &args.input,
        &args.output,
        &cancel,
    )
    .await
    .with_context(|| format!("curating {}", args.input))?;

    let mut stdout = std::io::stdout().lock();
    curated.write_report(&mut stdout)?;

    info!(
        plugins = curated.catalog.plugins.len(),
        warnings = curated.warning_count(),
        output = %args.output.display(),
        "curation complete"
    );
    Ok(())
}
