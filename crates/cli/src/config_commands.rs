use std::path::Path;

use {anyhow::Result, plugdex_config::PlugdexConfig};

/// Print the effective configuration as TOML; the token is redacted.
pub fn handle_config(config: &PlugdexConfig, explicit: Option<&Path>) -> Result<()> {
    match explicit
        .map(Path::to_path_buf)
        .or_else(plugdex_config::find_config_file)
    {
        Some(path) => eprintln!("# loaded from {}", path.display()),
        None => eprintln!("# no config file found; showing defaults"),
    }
    print!("{}", toml::to_string_pretty(config)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]

    use {secrecy::Secret, std::io::Write};

    #[test]
    fn rendered_config_round_trips_without_secret() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            "[source]\nlocation = \"./awesome.json\"\n\n[github]\nconcurrency = 2"
        )
        .unwrap();

        let mut config = plugdex_config::load_config(file.path()).unwrap();
        config.github.token = Some(Secret::new("ghp_secret".into()));

        let rendered = toml::to_string_pretty(&config).unwrap();
        assert!(rendered.contains("location = \"./awesome.json\""));
        assert!(rendered.contains("concurrency = 2"));
        assert!(!rendered.contains("ghp_secret"));
    }
}
