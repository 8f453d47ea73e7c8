use crate::session::FileSessionStore;
use config::builder::DefaultState;
use config::{Config, ConfigBuilder, Environment, File as ConfigFile, FileFormat};
use eyre::{eyre, Context, Result};
use std::fs::{create_dir_all, File};
use std::io::Write;
use std::path::PathBuf;
use std::time::Duration;

const EXAMPLE_CONFIG: &str = include_str!("../config.toml");
pub const DEFAULT_SERVER_ADDRESS: &str = "http://localhost:8000/api";
const DEFAULT_TIMEOUT_SECS: u64 = 10;

// TODO: the session file is plain text next to the data dir. Move it to the OS keyring once
// there is a need to support shared machines.
#[derive(Debug, serde::Deserialize, serde::Serialize)]
pub struct Settings {
    pub server_address: String,
    pub session_path: String,
    pub timeout: u64,
}

impl Settings {
    pub fn config_dir() -> PathBuf {
        std::env::var("LIFEPLAN_CONFIG_DIR")
            .map_or_else(|_| lifeplan_common::utils::config_dir(), PathBuf::from)
    }

    pub fn config_file() -> PathBuf {
        Self::config_dir().join("config.toml")
    }

    pub fn session_store(&self) -> FileSessionStore {
        FileSessionStore::new(&self.session_path)
    }

    pub fn has_session(&self) -> bool {
        PathBuf::from(&self.session_path).exists()
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.timeout)
    }

    pub fn builder() -> Result<ConfigBuilder<DefaultState>> {
        let data_dir = lifeplan_common::utils::data_dir();
        let session_path = data_dir.join("session");

        Ok(Config::builder()
            .set_default("server_address", DEFAULT_SERVER_ADDRESS)?
            .set_default("session_path", session_path.to_str())?
            .set_default("timeout", DEFAULT_TIMEOUT_SECS)?
            .add_source(
                Environment::with_prefix("lifeplan")
                    .prefix_separator("_")
                    .separator("__"),
            ))
    }

    pub fn new() -> Result<Self> {
        let config_dir = Self::config_dir();
        let data_dir = lifeplan_common::utils::data_dir();

        create_dir_all(&config_dir)
            .wrap_err_with(|| format!("Failed to create dir {config_dir:?}"))?;
        create_dir_all(&data_dir).wrap_err_with(|| format!("Failed to create dir {data_dir:?}"))?;

        let config_file = Self::config_file();

        let mut config_builder = Self::builder()?;
        config_builder = if config_file.exists() {
            config_builder.add_source(ConfigFile::from(config_file.as_path()).format(FileFormat::Toml))
        } else {
            let mut file = File::create(&config_file).wrap_err("Failed to create config file")?;
            file.write_all(EXAMPLE_CONFIG.as_bytes())
                .wrap_err("Failed to write default config file")?;
            config_builder
        };

        let mut settings: Settings = config_builder
            .build()?
            .try_deserialize()
            .map_err(|e| eyre!("Failed to deserialize {}", e))?;

        settings.session_path = expand_shell(&settings.session_path)?;
        settings.server_address = settings.server_address.trim_end_matches('/').to_string();

        Ok(settings)
    }
}

fn expand_shell(value: &str) -> Result<String> {
    Ok(shellexpand::full(value)?.to_string())
}
