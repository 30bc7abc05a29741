use std::{fs, io, path::Path};

use anyhow::{bail, Context};
use serde::Deserialize;
use url::Url;

pub const SETTINGS_FILE: &str = "gallery.toml";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientSettings {
    pub catalog_url: String,
    pub request_timeout_secs: u64,
    pub log_filter: String,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            catalog_url: "http://127.0.0.1:8080".into(),
            request_timeout_secs: 15,
            log_filter: "info".into(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct FileSettings {
    catalog_url: Option<String>,
    request_timeout_secs: Option<u64>,
    log_filter: Option<String>,
}

/// Loads settings from defaults, `gallery.toml` in the working directory, then
/// the process environment.
pub fn load_settings() -> anyhow::Result<ClientSettings> {
    load_settings_with(Path::new(SETTINGS_FILE), |name| std::env::var(name).ok())
}

pub fn load_settings_with(
    file: &Path,
    env: impl Fn(&str) -> Option<String>,
) -> anyhow::Result<ClientSettings> {
    let mut settings = ClientSettings::default();

    match fs::read_to_string(file) {
        Ok(raw) => {
            let file_cfg: FileSettings = toml::from_str(&raw)
                .with_context(|| format!("failed to parse settings file '{}'", file.display()))?;
            if let Some(v) = file_cfg.catalog_url {
                settings.catalog_url = v;
            }
            if let Some(v) = file_cfg.request_timeout_secs {
                settings.request_timeout_secs = v;
            }
            if let Some(v) = file_cfg.log_filter {
                settings.log_filter = v;
            }
        }
        Err(err) if err.kind() == io::ErrorKind::NotFound => {}
        Err(err) => {
            return Err(err)
                .with_context(|| format!("failed to read settings file '{}'", file.display()));
        }
    }

    if let Some(v) = env("CATALOG_URL") {
        settings.catalog_url = v;
    }
    if let Some(v) = env("APP__CATALOG_URL") {
        settings.catalog_url = v;
    }

    if let Some(v) = env("APP__REQUEST_TIMEOUT_SECS") {
        settings.request_timeout_secs = v
            .trim()
            .parse()
            .with_context(|| format!("APP__REQUEST_TIMEOUT_SECS must be an integer, got '{v}'"))?;
    }

    if let Some(v) = env("RUST_LOG") {
        if !v.trim().is_empty() {
            settings.log_filter = v;
        }
    }

    settings.validate()?;
    Ok(settings)
}

impl ClientSettings {
    /// Applies command-line overrides on top of the loaded settings.
    pub fn with_overrides(
        mut self,
        catalog_url: Option<String>,
        request_timeout_secs: Option<u64>,
    ) -> anyhow::Result<Self> {
        if let Some(v) = catalog_url {
            self.catalog_url = v;
        }
        if let Some(v) = request_timeout_secs {
            self.request_timeout_secs = v;
        }
        self.validate()?;
        Ok(self)
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        let url = Url::parse(self.catalog_url.trim())
            .with_context(|| format!("invalid catalog url '{}'", self.catalog_url))?;
        if !matches!(url.scheme(), "http" | "https") {
            bail!(
                "catalog url '{}' must use http or https, not '{}'",
                self.catalog_url,
                url.scheme()
            );
        }
        if self.request_timeout_secs == 0 {
            bail!("request timeout must be at least one second");
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
