use crate::constants::{DEFAULT_BIND_ADDRESS, DEFAULT_DOWNLOAD_BUFFER_SIZE, DEFAULT_ROOT_DIR};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::net::IpAddr;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ServerConfig {
    pub bind_address: String,
    pub root_dir: PathBuf,
    pub download_buffer_size: Option<usize>, // Optional to allow default value
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: String::from(DEFAULT_BIND_ADDRESS),
            root_dir: PathBuf::from(DEFAULT_ROOT_DIR),
            download_buffer_size: Some(DEFAULT_DOWNLOAD_BUFFER_SIZE),
        }
    }
}

impl Config {
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let config_str = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read configuration file: {}", path.display()))?;
        let mut config: Config = toml::from_str(&config_str)
            .with_context(|| format!("Failed to parse configuration file: {}", path.display()))?;

        // Set defaults if not specified
        if config.server.download_buffer_size.is_none() {
            config.server.download_buffer_size = Some(DEFAULT_DOWNLOAD_BUFFER_SIZE);
        }

        // Fail at startup rather than on the first session
        config.bind_address()?;

        Ok(config)
    }

    pub fn bind_address(&self) -> Result<IpAddr> {
        self.server
            .bind_address
            .parse()
            .with_context(|| format!("Invalid bind address: {}", self.server.bind_address))
    }

    pub fn download_buffer_size(&self) -> usize {
        match self.server.download_buffer_size {
            Some(0) | None => DEFAULT_DOWNLOAD_BUFFER_SIZE,
            Some(size) => size,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.server.bind_address, "0.0.0.0");
        assert_eq!(config.server.root_dir, PathBuf::from("."));
        assert_eq!(config.download_buffer_size(), 128 * 1024);
        assert!(config.bind_address().unwrap().is_unspecified());
    }

    #[test]
    fn test_load_partial_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[server]\nroot_dir = \"/srv/files\"").unwrap();

        let config = Config::load_from_file(file.path()).unwrap();
        assert_eq!(config.server.root_dir, PathBuf::from("/srv/files"));
        assert_eq!(config.server.bind_address, "0.0.0.0");
        assert_eq!(config.download_buffer_size(), 128 * 1024);
    }

    #[test]
    fn test_load_full_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "[server]\nbind_address = \"127.0.0.1\"\nroot_dir = \"data\"\ndownload_buffer_size = 4096"
        )
        .unwrap();

        let config = Config::load_from_file(file.path()).unwrap();
        assert_eq!(config.bind_address().unwrap().to_string(), "127.0.0.1");
        assert_eq!(config.download_buffer_size(), 4096);
    }

    #[test]
    fn test_invalid_bind_address_rejected() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[server]\nbind_address = \"not-an-ip\"").unwrap();

        assert!(Config::load_from_file(file.path()).is_err());
    }

    #[test]
    fn test_missing_file_rejected() {
        let err = Config::load_from_file(Path::new("/nonexistent/ftserver.conf")).unwrap_err();
        assert!(err.to_string().contains("Failed to read configuration file"));
    }
}
