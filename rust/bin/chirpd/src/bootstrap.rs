//! Bootstrap — startup checks before the server binds.

use crate::config::ServerConfig;

/// Verify server configuration is ready for use.
pub fn verify_config(config: &ServerConfig) -> anyhow::Result<()> {
    if config.jwt.secret.is_empty() {
        anyhow::bail!("JWT secret is empty in configuration.");
    }
    if config.storage.data_dir.is_empty() {
        anyhow::bail!("Storage data_dir is empty in configuration.");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{JwtConfig, SiteConfig, StorageConfig};

    fn config(secret: &str, data_dir: &str) -> ServerConfig {
        ServerConfig {
            storage: StorageConfig {
                data_dir: data_dir.to_string(),
            },
            jwt: JwtConfig {
                secret: secret.to_string(),
                expire_secs: 3600,
            },
            site: SiteConfig::default(),
        }
    }

    #[test]
    fn test_verify_config_ok() {
        assert!(verify_config(&config("s3cret", "/tmp/chirp")).is_ok());
    }

    #[test]
    fn test_verify_config_empty_secret() {
        assert!(verify_config(&config("", "/tmp/chirp")).is_err());
    }

    #[test]
    fn test_verify_config_empty_data_dir() {
        assert!(verify_config(&config("s3cret", "")).is_err());
    }
}
