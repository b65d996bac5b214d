use {
    plugdex_common::{Architecture, Theme},
    secrecy::Secret,
    serde::{Deserialize, Serialize},
};

/// Catalog served by the upstream project when nothing else is configured.
pub const DEFAULT_SOURCE: &str = "https://install.ptrun.net/awesome.json";

pub const DEFAULT_API_URL: &str = "https://api.github.com";

/// Root configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PlugdexConfig {
    pub source: SourceConfig,
    pub github: GitHubConfig,
    pub cache: CacheConfig,
    pub runtime: RuntimeConfig,
}

/// Where the catalog document is read from.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    /// Local path or `http(s)://` URL.
    pub location: String,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            location: DEFAULT_SOURCE.to_string(),
        }
    }
}

/// Hosting API settings used by curation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GitHubConfig {
    pub api_url: String,
    /// Personal access token for higher rate limits.
    #[serde(
        serialize_with = "serialize_redacted",
        skip_serializing_if = "Option::is_none"
    )]
    pub token: Option<Secret<String>>,
    pub timeout_secs: u64,
    pub user_agent: String,
    /// Plugins curated in parallel.
    pub concurrency: usize,
}

impl Default for GitHubConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            token: None,
            timeout_secs: 5,
            user_agent: "plugdex".to_string(),
            concurrency: 8,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// How long resolved pairs stay cached before a reload is forced.
    pub ttl_secs: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl_secs: 24 * 60 * 60,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RuntimeConfig {
    pub theme: Theme,
    /// Overrides the process architecture used for asset selection.
    pub architecture: Option<Architecture>,
}

impl RuntimeConfig {
    pub fn architecture(&self) -> Architecture {
        self.architecture.clone().unwrap_or_else(Architecture::current)
    }
}

fn serialize_redacted<S: serde::Serializer>(
    secret: &Option<Secret<String>>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    match secret {
        Some(_) => serializer.serialize_some("[REDACTED]"),
        None => serializer.serialize_none(),
    }
}

#[cfg(test)]
mod tests {
    use {super::*, secrecy::ExposeSecret};

    #[test]
    fn defaults_point_at_public_catalog() {
        let config = PlugdexConfig::default();
        assert_eq!(config.source.location, DEFAULT_SOURCE);
        assert_eq!(config.github.api_url, DEFAULT_API_URL);
        assert_eq!(config.github.timeout_secs, 5);
        assert_eq!(config.cache.ttl_secs, 86_400);
        assert_eq!(config.runtime.theme, Theme::Dark);
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let config: PlugdexConfig = toml::from_str(
            r#"
[github]
token = "ghp_example"

[runtime]
theme = "high_contrast_white"
architecture = "arm64"
"#,
        )
        .unwrap();
        assert_eq!(
            config.github.token.as_ref().map(|t| t.expose_secret().as_str()),
            Some("ghp_example")
        );
        assert_eq!(config.github.concurrency, 8);
        assert_eq!(config.runtime.theme, Theme::HighContrastWhite);
        assert_eq!(config.runtime.architecture(), Architecture::Arm64);
    }

    #[test]
    fn architecture_accepts_aliases_and_any_case() {
        for (name, expected) in [
            ("X64", Architecture::X64),
            ("amd64", Architecture::X64),
            ("aarch64", Architecture::Arm64),
        ] {
            let config: PlugdexConfig =
                toml::from_str(&format!("[runtime]\narchitecture = \"{name}\"")).unwrap();
            assert_eq!(config.runtime.architecture(), expected, "{name}");
        }
    }

    #[test]
    fn token_is_redacted_on_output() {
        let mut config = PlugdexConfig::default();
        config.github.token = Some(Secret::new("ghp_example".to_string()));
        let rendered = toml::to_string(&config).unwrap();
        assert!(rendered.contains("[REDACTED]"));
        assert!(!rendered.contains("ghp_example"));
    }
}
