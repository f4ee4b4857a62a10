//! Server configuration — a TOML file with [storage], [jwt], and [site]
//! sections.

use std::path::{Path, PathBuf};

use serde::Deserialize;

/// Top-level server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub storage: StorageConfig,
    pub jwt: JwtConfig,
    #[serde(default)]
    pub site: SiteConfig,
}

/// Storage paths.
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    /// Directory holding the SQLite database.
    pub data_dir: String,
}

/// JWT session signing.
#[derive(Debug, Clone, Deserialize)]
pub struct JwtConfig {
    /// Signing secret.
    pub secret: String,
    /// Session lifetime in seconds.
    #[serde(default = "default_expire_secs")]
    pub expire_secs: u64,
}

/// Site presentation.
#[derive(Debug, Clone, Deserialize)]
pub struct SiteConfig {
    /// Name shown in page titles and the nav bar.
    #[serde(default = "default_site_name")]
    pub name: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            name: default_site_name(),
        }
    }
}

fn default_expire_secs() -> u64 {
    1_209_600 // 14 days
}

fn default_site_name() -> String {
    "Chirp".to_string()
}

impl ServerConfig {
    /// Resolve a config argument to a path.
    ///
    /// A bare name maps to `/etc/chirp/<name>.toml`; anything with a
    /// `/` or `.` is used as a path directly.
    pub fn resolve_path(arg: &str) -> PathBuf {
        if arg.contains('/') || arg.contains('.') {
            PathBuf::from(arg)
        } else {
            PathBuf::from(format!("/etc/chirp/{}.toml", arg))
        }
    }

    /// Load and parse a config file.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("failed to read {}: {}", path.display(), e))?;
        let config: Self = toml::from_str(&raw)
            .map_err(|e| anyhow::anyhow!("failed to parse {}: {}", path.display(), e))?;
        Ok(config)
    }
}
