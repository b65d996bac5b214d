//! Required-field checks for curated records.
//!
//! Each record type lists its fields next to a presence test. A missing
//! field yields one `"<Field> missing"` diagnostic; nothing here fails.

use plugdex_common::{Asset, Plugin, Release, Repository};

type FieldCheck<T> = (&'static str, fn(&T) -> bool);

const PLUGIN_FIELDS: &[FieldCheck<Plugin>] = &[
    ("ID", |p| p.id.is_some()),
    ("Name", |p| p.name.is_some()),
    ("Description", |p| p.description.is_some()),
    ("Author", |p| p.author.is_some()),
    ("Website", |p| p.website.is_some()),
    ("Repository", |p| p.repository.is_some()),
    ("Release", |p| p.release.is_some()),
];

const REPOSITORY_FIELDS: &[FieldCheck<Repository>] = &[
    ("Url", |r| r.url.is_some()),
    ("Owner", |r| r.owner.is_some()),
    ("Name", |r| r.name.is_some()),
    ("FullName", |r| r.full_name.is_some()),
    ("Description", |r| r.description.is_some()),
    ("Topics", |r| r.topics.as_ref().is_some_and(|t| !t.is_empty())),
    ("License", |r| r.license.is_some()),
    ("CreatedAt", |r| r.created_at.is_some()),
    ("UpdatedAt", |r| r.updated_at.is_some()),
];

const RELEASE_FIELDS: &[FieldCheck<Release>] = &[
    ("Url", |r| r.url.is_some()),
    ("TagName", |r| r.tag_name.is_some()),
    ("Name", |r| r.name.is_some()),
    ("CreatedAt", |r| r.created_at.is_some()),
    ("PublishedAt", |r| r.published_at.is_some()),
    ("Assets", |r| !r.assets.is_empty()),
];

const ASSET_FIELDS: &[FieldCheck<Asset>] = &[
    ("Url", |a| a.url.is_some()),
    ("Name", |a| a.name.is_some()),
    ("CreatedAt", |a| a.created_at.is_some()),
    ("UpdatedAt", |a| a.updated_at.is_some()),
];

fn missing<'a, T>(record: &'a T, fields: &'a [FieldCheck<T>]) -> impl Iterator<Item = String> + 'a {
    fields
        .iter()
        .filter(move |(_, present)| !present(record))
        .map(|(name, _)| format!("{name} missing"))
}

/// Every missing field on the plugin and its nested records, in record order.
pub fn validate(plugin: &Plugin) -> Vec<String> {
    let mut diagnostics: Vec<String> = missing(plugin, PLUGIN_FIELDS).collect();

    if let Some(repository) = &plugin.repository {
        diagnostics.extend(missing(repository, REPOSITORY_FIELDS));
    }
    if let Some(release) = &plugin.release {
        diagnostics.extend(missing(release, RELEASE_FIELDS));
        for asset in &release.assets {
            diagnostics.extend(missing(asset, ASSET_FIELDS));
        }
    }

    diagnostics
}
