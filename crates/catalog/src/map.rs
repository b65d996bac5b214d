//! API shapes → catalog records.

use plugdex_common::{Asset, Release, Repository, asset};

use crate::github::{ApiAsset, ApiRelease, ApiRepository};

impl From<ApiRepository> for Repository {
    fn from(api: ApiRepository) -> Self {
        Self {
            url: api.html_url,
            owner: api.owner.and_then(|o| o.login),
            name: api.name,
            full_name: api.full_name,
            description: api.description,
            topics: api.topics,
            license: api.license.and_then(|l| l.name),
            stargazers_count: api.stargazers_count,
            watchers_count: api.watchers_count,
            forks_count: api.forks_count,
            size: api.size,
            created_at: api.created_at,
            updated_at: api.updated_at,
        }
    }
}

impl From<ApiAsset> for Asset {
    fn from(api: ApiAsset) -> Self {
        Self {
            url: api.browser_download_url,
            name: api.name,
            size: api.size,
            download_count: api.download_count,
            created_at: api.created_at,
            updated_at: api.updated_at,
        }
    }
}

/// Map a release and prune its assets for `plugin_name`.
pub fn map_release(api: ApiRelease, plugin_name: &str) -> Release {
    let assets: Vec<Asset> = api
        .assets
        .unwrap_or_default()
        .into_iter()
        .map(Asset::from)
        .collect();

    Release {
        url: api.html_url,
        tag_name: api.tag_name,
        name: api.name,
        created_at: api.created_at,
        published_at: api.published_at,
        assets: asset::prune_for_catalog(&assets, plugin_name),
    }
}
