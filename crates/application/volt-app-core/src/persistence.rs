use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use directories::ProjectDirs;

use crate::domain::ConsoleSettings;
use crate::ports::SettingsRepo;

const QUALIFIER: &str = "com";
const ORG: &str = "volt";
const APP: &str = "console";

/// JSON files under the platform config directory (or an explicit root).
pub struct FilePersistence {
    root: Option<PathBuf>,
}

impl Default for FilePersistence {
    fn default() -> Self {
        Self::new()
    }
}

impl FilePersistence {
    pub fn new() -> Self {
        Self { root: None }
    }

    /// Store files in `root` instead of the platform config directory.
    pub fn at(root: impl Into<PathBuf>) -> Self {
        Self {
            root: Some(root.into()),
        }
    }

    fn config_dir(&self) -> Result<PathBuf> {
        let dir = match &self.root {
            Some(root) => root.clone(),
            None => ProjectDirs::from(QUALIFIER, ORG, APP)
                .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?
                .config_dir()
                .to_path_buf(),
        };
        if !dir.exists() {
            fs::create_dir_all(&dir)
                .with_context(|| format!("Failed to create {}", dir.display()))?;
        }
        Ok(dir)
    }

    pub fn settings_path(&self) -> Result<PathBuf> {
        Ok(self.config_dir()?.join("settings.json"))
    }

    pub fn load_settings(&self) -> Result<ConsoleSettings> {
        let path = self.settings_path()?;
        if !path.exists() {
            return Ok(ConsoleSettings::default());
        }
        let content = fs::read_to_string(&path).context("Failed to read settings")?;
        let settings = serde_json::from_str(&content)
            .with_context(|| format!("Invalid settings file {}", path.display()))?;
        Ok(settings)
    }

    pub fn save_settings(&self, settings: &ConsoleSettings) -> Result<()> {
        let path = self.settings_path()?;
        let json = serde_json::to_string_pretty(settings)?;
        atomic_write(&path, json.as_bytes()).context("Failed to write settings")?;
        Ok(())
    }
}

impl SettingsRepo for FilePersistence {
    fn load(&self) -> Result<ConsoleSettings> {
        self.load_settings()
    }

    fn save(&self, settings: &ConsoleSettings) -> Result<()> {
        self.save_settings(settings)
    }
}

fn atomic_write(path: &Path, contents: &[u8]) -> Result<()> {
    let tmp_path = {
        let mut name = path.as_os_str().to_os_string();
        name.push(".tmp");
        PathBuf::from(name)
    };

    let mut file = fs::File::create(&tmp_path)
        .with_context(|| format!("Failed to create temp file {}", tmp_path.display()))?;
    file.write_all(contents)
        .with_context(|| format!("Failed to write temp file {}", tmp_path.display()))?;
    file.sync_all()
        .with_context(|| format!("Failed to sync temp file {}", tmp_path.display()))?;
    drop(file);

    if let Err(e) = fs::rename(&tmp_path, path) {
        if e.kind() != std::io::ErrorKind::AlreadyExists {
            return Err(e).with_context(|| {
                format!(
                    "Failed to rename {} to {}",
                    tmp_path.display(),
                    path.display()
                )
            });
        }
        fs::remove_file(path).ok();
        fs::rename(&tmp_path, path)
            .with_context(|| format!("Failed to replace {}", path.display()))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let repo = FilePersistence::at(dir.path());
        assert_eq!(repo.load().unwrap(), ConsoleSettings::default());
    }

    #[test]
    fn save_then_load_and_no_temp_left_behind() {
        let dir = tempfile::tempdir().unwrap();
        let repo = FilePersistence::at(dir.path().join("nested"));
        let settings = ConsoleSettings {
            default_station_id: Some("STN007".into()),
            request_timeout_secs: 30,
            ..Default::default()
        };
        repo.save(&settings).unwrap();
        repo.save(&settings).unwrap();

        assert_eq!(repo.load().unwrap(), settings);
        let names: Vec<_> = fs::read_dir(dir.path().join("nested"))
            .unwrap()
            .map(|e| e.unwrap().file_name().into_string().unwrap())
            .collect();
        assert_eq!(names, vec!["settings.json".to_string()]);
    }

    #[test]
    fn corrupt_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("settings.json"), "{not json").unwrap();
        assert!(FilePersistence::at(dir.path()).load().is_err());
    }
}
