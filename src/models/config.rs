use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use crate::utils::path::{get_config_path, get_database_path};

/// Serverinställningar, laddas från config.toml med miljövariabler som överskrider
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    pub bind_address: String,
    pub port: u16,
    pub database_path: PathBuf,
    /// Standardnivå för loggning (RUST_LOG har företräde)
    pub log_level: String,
    pub allow_any_origin: bool,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0".to_string(),
            port: 5000,
            database_path: get_database_path(),
            log_level: "info".to_string(),
            allow_any_origin: true,
        }
    }
}

impl ServerSettings {
    /// Ladda inställningar. `VACINA_CONFIG` pekar ut en annan config-fil.
    pub fn load() -> anyhow::Result<Self> {
        let config_path = std::env::var("VACINA_CONFIG")
            .map(PathBuf::from)
            .unwrap_or_else(|_| get_config_path());

        let mut settings = Self::load_from(&config_path)?;
        settings.apply_overrides(|key| std::env::var(key).ok())?;
        Ok(settings)
    }

    /// Ladda från fil. En saknad fil ger standardvärden.
    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)?;
        let settings = toml::from_str(&content)?;
        Ok(settings)
    }

    pub fn save_to(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;

        Ok(())
    }

    /// Applicera överskridningar från miljön
    pub fn apply_overrides<F>(&mut self, lookup: F) -> anyhow::Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(bind) = lookup("VACINA_BIND") {
            self.bind_address = bind;
        }

        if let Some(port) = lookup("VACINA_PORT") {
            self.port = port
                .parse()
                .map_err(|e| anyhow::anyhow!("Ogiltig VACINA_PORT '{}': {}", port, e))?;
        }

        if let Some(db) = lookup("VACINA_DATABASE") {
            self.database_path = PathBuf::from(db);
        }

        if let Some(level) = lookup("VACINA_LOG") {
            self.log_level = level;
        }

        Ok(())
    }

    pub fn socket_addr(&self) -> anyhow::Result<SocketAddr> {
        let addr = format!("{}:{}", self.bind_address, self.port);
        addr.parse()
            .map_err(|e| anyhow::anyhow!("Ogiltig adress '{}': {}", addr, e))
    }
}
