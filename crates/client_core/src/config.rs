use std::{fs, io, path::Path};

use anyhow::{bail, Context};
use serde::Deserialize;
use tracing::debug;
use url::Url;

/// Build-time default, overridable with `NEUROPHRASE_BASE_URL` at compile time.
pub const DEFAULT_BASE_URL: &str = match option_env!("NEUROPHRASE_BASE_URL") {
    Some(url) => url,
    None => "http://localhost:8000",
};
pub const SETTINGS_FILE: &str = "neurophrase.toml";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub base_url: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct FileSettings {
    base_url: Option<String>,
}

impl Settings {
    pub fn override_base_url(&mut self, raw: &str) -> anyhow::Result<()> {
        self.base_url = normalize_base_url(raw)?;
        Ok(())
    }
}

/// Reads `neurophrase.toml` from the working directory and the process
/// environment.
pub fn load_settings() -> anyhow::Result<Settings> {
    let file_contents = read_settings_file(Path::new(SETTINGS_FILE))?;
    resolve_settings(file_contents.as_deref(), |name| std::env::var(name).ok())
}

/// Precedence, lowest first: built-in default, settings file,
/// `NEUROPHRASE_BASE_URL`, `APP__BASE_URL`.
pub fn resolve_settings(
    file_contents: Option<&str>,
    lookup_env: impl Fn(&str) -> Option<String>,
) -> anyhow::Result<Settings> {
    let mut settings = Settings::default();

    if let Some(raw) = file_contents {
        let file_cfg: FileSettings =
            toml::from_str(raw).with_context(|| format!("failed to parse {SETTINGS_FILE}"))?;
        if let Some(v) = file_cfg.base_url {
            settings.base_url = v;
        }
    }

    if let Some(v) = lookup_env("NEUROPHRASE_BASE_URL") {
        settings.base_url = v;
    }
    if let Some(v) = lookup_env("APP__BASE_URL") {
        settings.base_url = v;
    }

    settings.base_url = normalize_base_url(&settings.base_url)?;
    debug!(base_url = %settings.base_url, "resolved client settings");
    Ok(settings)
}

fn read_settings_file(path: &Path) -> anyhow::Result<Option<String>> {
    match fs::read_to_string(path) {
        Ok(raw) => Ok(Some(raw)),
        Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(err) => {
            Err(err).with_context(|| format!("failed to read settings file '{}'", path.display()))
        }
    }
}

pub fn normalize_base_url(raw: &str) -> anyhow::Result<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        bail!("base url must not be empty");
    }

    let parsed = Url::parse(trimmed).with_context(|| format!("invalid base url '{trimmed}'"))?;
    if !matches!(parsed.scheme(), "http" | "https") {
        bail!(
            "base url '{trimmed}' must use http or https, not '{}'",
            parsed.scheme()
        );
    }

    Ok(trimmed.trim_end_matches('/').to_string())
}
