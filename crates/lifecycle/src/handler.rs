//! Runtime entry point: load the catalog, cache pairs, answer queries.

use std::{sync::Arc, time::Duration};

use {
    plugdex_common::{InstalledMetadata, source},
    plugdex_config::PlugdexConfig,
    serde::Serialize,
    tracing::{error, info},
};

use crate::{
    cache::{PAIRS_KEY, PairCache},
    error::{Error, Result},
    pair::Pair,
    ranker::QueryRanker,
    resolver::LifecycleResolver,
};

/// Query keyword that offers a catalog reload.
pub const RELOAD_KEYWORD: &str = "reload";

/// Handler-level actions, independent of any single plugin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionType {
    /// Check the configured plugin source.
    Validate,
    /// Load the plugin source again.
    Reload,
}

/// Ties the source, resolver, ranker and cache together for one host.
pub struct Handler {
    source: String,
    ttl: Duration,
    http: reqwest::Client,
    cache: Arc<dyn PairCache>,
    resolver: LifecycleResolver,
    ranker: QueryRanker,
}

impl Handler {
    pub fn new(
        source: impl Into<String>,
        ttl: Duration,
        cache: Arc<dyn PairCache>,
        resolver: LifecycleResolver,
        ranker: QueryRanker,
    ) -> Self {
        Self {
            source: source.into(),
            ttl,
            http: reqwest::Client::new(),
            cache,
            resolver,
            ranker,
        }
    }

    pub fn from_config(config: &PlugdexConfig, cache: Arc<dyn PairCache>) -> Self {
        Self::new(
            config.source.location.clone(),
            Duration::from_secs(config.cache.ttl_secs),
            cache,
            LifecycleResolver::new(config.runtime.architecture()),
            QueryRanker::default(),
        )
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    /// Load the source, join it with `installed` and cache the pairs.
    ///
    /// Failures are logged and reported as `false`; the previous cache entry
    /// is left alone.
    pub async fn init(&self, installed: &[InstalledMetadata]) -> bool {
        match self.load(installed).await {
            Ok(pairs) => {
                info!(
                    source = %self.source,
                    plugins = pairs.len(),
                    installed = installed.len(),
                    "plugin catalog loaded"
                );
                self.cache.insert(PAIRS_KEY, pairs, self.ttl);
                true
            },
            Err(e) => {
                error!(source = %self.source, error = %e, "init failed");
                false
            },
        }
    }

    async fn load(&self, installed: &[InstalledMetadata]) -> Result<Vec<Pair>> {
        let catalog = source::load_catalog(&self.http, &self.source)
            .await
            .map_err(|e| Error::invalid_source(&self.source, e))?;
        Ok(self.resolver.resolve(&catalog.plugins, installed))
    }

    /// Cached pairs, if the catalog has been loaded and has not expired.
    pub fn pairs(&self) -> Option<Vec<Pair>> {
        self.cache.get(PAIRS_KEY)
    }

    /// `true` once a non-empty catalog is cached.
    pub fn is_valid(&self) -> bool {
        self.pairs().is_some_and(|pairs| !pairs.is_empty())
    }

    /// Handler-level actions for `query`.
    pub fn actions(&self, query: &str) -> Vec<ActionType> {
        let empty = !self.is_valid();
        let mut actions = Vec::new();
        if empty {
            actions.push(ActionType::Validate);
        }
        if empty || query.trim().eq_ignore_ascii_case(RELOAD_KEYWORD) {
            actions.push(ActionType::Reload);
        }
        actions
    }

    /// Score every cached pair and keep those with a repository and a
    /// positive score, best first. Ties keep catalog order.
    pub fn query(&self, query: &str) -> Vec<Pair> {
        let Some(mut pairs) = self.pairs() else {
            return Vec::new();
        };
        self.ranker.rank(&mut pairs, query);
        pairs.retain(|pair| pair.has_repository() && pair.score > 0);
        pairs.sort_by(|a, b| b.score.cmp(&a.score));
        pairs
    }

    /// First cached pair whose plugin identity matches `id`.
    pub fn find(&self, id: &str) -> Option<Pair> {
        self.pairs()?
            .into_iter()
            .find(|pair| pair.plugin.has_id(id))
    }
}
