use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::core::refresh::MAX_PERIOD;

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub dashboard: Dashboard,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Dashboard {
    /// Seconds between refreshes in `watch` mode.
    #[serde(default = "default_refresh_secs")]
    pub refresh_secs: u64,
    /// Snapshot file to read; the built-in mock snapshot is used when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<PathBuf>,
    /// Activity label overriding the one reported by the snapshot.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub activity: Option<String>,
}

fn default_refresh_secs() -> u64 {
    60
}

impl Default for Dashboard {
    fn default() -> Self {
        Self {
            refresh_secs: default_refresh_secs(),
            source: None,
            activity: None,
        }
    }
}

impl Config {
    /// Load config from the standard path, or return defaults.
    pub fn load() -> anyhow::Result<Self> {
        let path = Self::path();
        if path.exists() {
            let contents = std::fs::read_to_string(&path)?;
            Ok(toml::from_str(&contents)?)
        } else {
            Ok(Self::default())
        }
    }

    /// Save config to the standard path, readable by the owner only.
    pub fn save(&self) -> anyhow::Result<()> {
        let path = Self::path();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
            #[cfg(unix)]
            {
                use std::os::unix::fs::PermissionsExt;
                std::fs::set_permissions(parent, std::fs::Permissions::from_mode(0o700))?;
            }
        }
        write_private(&path, &toml::to_string_pretty(self)?)
    }

    /// Apply a `config set` key.
    pub fn set(&mut self, key: &str, value: &str) -> anyhow::Result<()> {
        match key {
            "refresh_secs" => {
                let secs: u64 = value
                    .parse()
                    .map_err(|_| anyhow::anyhow!("refresh_secs must be a whole number"))?;
                self.dashboard.refresh_secs = check_refresh_secs("refresh_secs", secs)?;
            }
            "source" => {
                self.dashboard.source = if value.is_empty() {
                    None
                } else {
                    Some(PathBuf::from(value))
                };
            }
            "activity" => {
                self.dashboard.activity = if value.is_empty() {
                    None
                } else {
                    Some(value.to_string())
                };
            }
            _ => anyhow::bail!("unknown config key: {}", key),
        }
        Ok(())
    }

    pub fn data_dir() -> PathBuf {
        if let Ok(home) = std::env::var("VITALBOARD_HOME") {
            return PathBuf::from(home);
        }
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".vitalboard")
    }

    pub fn path() -> PathBuf {
        Self::data_dir().join("config.toml")
    }
}

/// Validate a refresh period in seconds. `what` names the setting in errors.
pub fn check_refresh_secs(what: &str, secs: u64) -> anyhow::Result<u64> {
    let max = MAX_PERIOD.as_secs();
    if !(1..=max).contains(&secs) {
        anyhow::bail!("{} must be between 1 and {} seconds, got {}", what, max, secs);
    }
    Ok(secs)
}

/// Write `contents` to `path` with mode 0600 on unix, fixing the mode of an
/// existing file too.
fn write_private(path: &Path, contents: &str) -> anyhow::Result<()> {
    #[cfg(unix)]
    {
        use std::fs::OpenOptions;
        use std::io::Write;
        use std::os::unix::fs::{OpenOptionsExt, PermissionsExt};

        let mut file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .mode(0o600)
            .open(path)?;
        file.write_all(contents.as_bytes())?;
        std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o600))?;
    }
    #[cfg(not(unix))]
    std::fs::write(path, contents)?;

    Ok(())
}
