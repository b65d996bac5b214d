use {
    anyhow::{Context, Result},
    clap::Args,
    plugdex_catalog::{RepoRef, validate::validate},
    plugdex_config::PlugdexConfig,
};

#[derive(Args)]
pub struct ValidateArgs {
    /// Catalog document to check: local path or http(s) URL (overrides config).
    #[arg(long)]
    pub source: Option<String>,
    /// Also list plugins without issues.
    #[arg(long)]
    pub verbose: bool,
}

/// ANSI color codes.
const RED: &str = "\x1b[31m";
const YELLOW: &str = "\x1b[33m";
const BOLD: &str = "\x1b[1m";
const RESET: &str = "\x1b[0m";

pub async fn handle_validate(args: ValidateArgs, config: &PlugdexConfig) -> Result<()> {
    let source = args
        .source
        .unwrap_or_else(|| config.source.location.clone());
    eprintln!("Checking {source}\n");

    let catalog = plugdex_common::source::load_catalog(&reqwest::Client::new(), &source)
        .await
        .with_context(|| format!("loading {source}"))?;

    let mut errors = 0;
    let mut warnings = 0;
    for plugin in &catalog.plugins {
        let website = plugin
            .website
            .as_deref()
            .map(RepoRef::from_website)
            .and_then(|parsed| parsed.err());
        let missing = validate(plugin);
        if website.is_none() && missing.is_empty() && !args.verbose {
            continue;
        }

        println!("{}", plugin.display_name());
        if let Some(e) = website {
            println!(" {BOLD}{RED}error{RESET} {e}");
            errors += 1;
        }
        for message in &missing {
            println!(" {BOLD}{YELLOW}warning{RESET} {message}");
        }
        warnings += missing.len();
    }

    eprintln!();
    if errors == 0 && warnings == 0 {
        eprintln!("{} plugin(s), no issues found.", catalog.plugins.len());
    } else {
        eprintln!(
            "{} plugin(s), {errors} error(s), {warnings} warning(s)",
            catalog.plugins.len()
        );
    }

    if errors > 0 {
        std::process::exit(1);
    }
    Ok(())
}
