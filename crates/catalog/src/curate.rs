//! Batch curation: fetch, map, prune, validate and publish the catalog.

use std::{
    io::Write,
    path::{Path, PathBuf},
    sync::Arc,
};

use {
    futures::{StreamExt, stream},
    tokio_util::sync::CancellationToken,
    tracing::{info, warn},
};

use plugdex_common::{Catalog, Plugin, Repository};

use crate::{
    error::{Context, Error, Result},
    github::{GitHubApi, RepoRef},
    map::map_release,
    validate::validate,
};

/// Outcome for one plugin: what was fetched and what an operator should see.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PluginReport {
    pub name: String,
    /// Transport or not-found failures for this plugin.
    pub failures: Vec<String>,
    /// Missing-field diagnostics after mapping.
    pub warnings: Vec<String>,
}

impl PluginReport {
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty() && self.warnings.is_empty()
    }
}

/// A curated catalog plus its per-plugin reports, in seed order.
#[derive(Debug, Clone)]
pub struct CuratedCatalog {
    pub catalog: Catalog,
    pub reports: Vec<PluginReport>,
}

impl CuratedCatalog {
    /// Operator report: the plugin name, then one indented line per issue.
    pub fn write_report(&self, out: &mut impl Write) -> std::io::Result<()> {
        for report in &self.reports {
            writeln!(out, "{}", report.name)?;
            for line in report.failures.iter().chain(&report.warnings) {
                writeln!(out, " {line}")?;
            }
        }
        Ok(())
    }

    pub fn warning_count(&self) -> usize {
        self.reports
            .iter()
            .map(|r| r.failures.len() + r.warnings.len())
            .sum()
    }
}

/// Drives curation of a whole catalog against a [`GitHubApi`].
pub struct Curator {
    api: Arc<dyn GitHubApi>,
    concurrency: usize,
}

impl Curator {
    pub fn new(api: Arc<dyn GitHubApi>) -> Self {
        Self {
            api,
            concurrency: 1,
        }
    }

    #[must_use]
    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }

    /// Curate every seed.
    ///
    /// All websites are parsed before any request is made; one malformed
    /// website fails the run. Fetch failures stay with their plugin.
    /// Cancellation returns [`Error::Cancelled`] and discards partial work.
    pub async fn curate(
        &self,
        seeds: Vec<Plugin>,
        cancel: &CancellationToken,
    ) -> Result<CuratedCatalog> {
        let jobs = seeds
            .into_iter()
            .map(|seed| {
                RepoRef::from_website(seed.website.as_deref().unwrap_or_default())
                    .map(|repo| (seed, repo))
            })
            .collect::<Result<Vec<_>>>()?;

        info!(plugins = jobs.len(), concurrency = self.concurrency, "curating catalog");

        let work = stream::iter(jobs)
            .map(|(seed, repo)| self.curate_one(seed, repo))
            .buffered(self.concurrency)
            .collect::<Vec<_>>();

        let results = tokio::select! {
            biased;
            () = cancel.cancelled() => return Err(Error::Cancelled),
            results = work => results,
        };

        let (plugins, reports) = results.into_iter().unzip();
        Ok(CuratedCatalog {
            catalog: Catalog::new(plugins),
            reports,
        })
    }

    async fn curate_one(&self, mut plugin: Plugin, repo: RepoRef) -> (Plugin, PluginReport) {
        let (repository, release) = tokio::join!(
            self.api.get_repository(&repo),
            self.api.get_latest_release(&repo)
        );

        let mut failures = Vec::new();
        plugin.repository = match repository {
            Ok(api) => Some(Repository::from(api)),
            Err(e) => {
                warn!(owner = %repo.owner, repo = %repo.repo, error = %e, "repository unavailable");
                failures.push(format!("Repository unavailable: {e}"));
                None
            },
        };
        plugin.release = match release {
            Ok(api) => Some(map_release(api, plugin.display_name())),
            Err(e) => {
                warn!(owner = %repo.owner, repo = %repo.repo, error = %e, "latest release unavailable");
                failures.push(format!("Release unavailable: {e}"));
                None
            },
        };

        let report = PluginReport {
            name: plugin.display_name().to_string(),
            failures,
            warnings: validate(&plugin),
        };
        (plugin, report)
    }
}

/// Write the catalog document to `output`, replacing any previous one only
/// once the new content is fully on disk.
pub async fn publish(catalog: &Catalog, output: &Path) -> Result<()> {
    if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent).await?;
    }

    let tmp = temp_path(output);
    let content = catalog.to_json()?;
    tokio::fs::write(&tmp, content)
        .await
        .with_context(|| format!("writing {}", tmp.display()))?;
    tokio::fs::rename(&tmp, output)
        .await
        .with_context(|| format!("replacing {}", output.display()))?;

    info!(path = %output.display(), plugins = catalog.plugins.len(), "published catalog");
    Ok(())
}

fn temp_path(output: &Path) -> PathBuf {
    let mut name = output.file_name().unwrap_or_default().to_os_string();
    name.push(".tmp");
    output.with_file_name(name)
}

/// Load seeds from `input`, curate them and publish to `output`.
pub async fn run(
    curator: &Curator,
    http: &reqwest::Client,
    input: &str,
    output: &Path,
    cancel: &CancellationToken,
) -> Result<CuratedCatalog> {
    let seeds = plugdex_common::source::load_catalog(http, input).await?;
    let curated = curator.curate(seeds.plugins, cancel).await?;
    publish(&curated.catalog, output).await?;
    Ok(curated)
}
