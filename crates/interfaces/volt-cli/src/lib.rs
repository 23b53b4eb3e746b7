pub mod actions;
pub mod cli;
pub mod commands;
pub mod render;

use std::sync::Arc;
use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use camino::Utf8PathBuf;
use volt_app_core::{ConsoleSettings, FilePersistence, SettingsRepo};
use volt_core::Session;
use volt_infra::ApiClient;

pub use cli::{Cli, CliExportFormat, Command};

/// Resolved settings plus the client built from them.
pub struct CliContext {
    pub settings: ConsoleSettings,
    persistence: FilePersistence,
    station_override: Option<String>,
    api: Arc<ApiClient>,
}

impl CliContext {
    /// File settings first, then `VOLT_API_URL`, then explicit flags.
    pub fn load(
        config_dir: Option<Utf8PathBuf>,
        api: Option<String>,
        station: Option<String>,
        timeout_secs: Option<u64>,
    ) -> Result<Self> {
        let persistence = match config_dir {
            Some(dir) => FilePersistence::at(dir.into_std_path_buf()),
            None => FilePersistence::new(),
        };
        let mut settings = persistence.load()?.with_env_overrides();
        if let Some(url) = api {
            settings.api_base_url = url;
        }
        if let Some(secs) = timeout_secs {
            settings.request_timeout_secs = secs;
        }
        let client = ApiClient::with_timeout(&settings.api_base_url, settings.request_timeout())
            .context("Failed to build API client")?;
        Ok(Self {
            settings,
            persistence,
            station_override: station,
            api: Arc::new(client),
        })
    }

    /// Context around an already-built client (used by tests and embedding code).
    pub fn with_client(api: ApiClient, station: Option<String>, persistence: FilePersistence) -> Self {
        Self {
            settings: ConsoleSettings::default(),
            persistence,
            station_override: station,
            api: Arc::new(api),
        }
    }

    pub fn api(&self) -> &Arc<ApiClient> {
        &self.api
    }

    pub fn persistence(&self) -> &FilePersistence {
        &self.persistence
    }

    pub fn refresh_interval(&self) -> Duration {
        self.settings.refresh_interval()
    }

    pub fn station_id(&self) -> Result<String> {
        self.station_override
            .clone()
            .or_else(|| self.settings.default_station_id.clone())
            .ok_or_else(|| {
                anyhow!("No station selected; pass --station or run `volt login` first")
            })
    }

    pub fn session(&self) -> Result<Session> {
        Ok(Session::for_station(self.station_id()?))
    }
}
