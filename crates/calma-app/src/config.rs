use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Current config version. Bump this when adding fields or changing shape.
/// Each bump requires a corresponding entry in [`migrate`].
const CURRENT_VERSION: u32 = 1;

const DEFAULT_TICK_INTERVAL_MS: u64 = 1000;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalmaConfig {
    /// Schema version. Missing or 0 = pre-versioned config.
    #[serde(default)]
    pub config_version: u32,
    /// Root directory of the local record store.
    pub data_dir: PathBuf,
    #[serde(default)]
    pub log: LogConfig,
    /// Period of the session ticker. Added in v1.
    ///
    /// Every tick counts as one elapsed second, so anything other than the
    /// default only makes sense for tests that run sessions faster.
    #[serde(default = "default_tick_interval_ms")]
    pub tick_interval_ms: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogConfig {
    pub level: String,
    #[serde(default)]
    pub json: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
        }
    }
}

fn default_tick_interval_ms() -> u64 {
    DEFAULT_TICK_INTERVAL_MS
}

impl CalmaConfig {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            config_version: CURRENT_VERSION,
            data_dir: data_dir.into(),
            log: LogConfig::default(),
            tick_interval_ms: DEFAULT_TICK_INTERVAL_MS,
        }
    }

    /// Defaults for the current user, storing data under the platform data
    /// directory.
    pub fn default_for_user() -> eyre::Result<Self> {
        let base = dirs::data_dir().ok_or_else(|| eyre::eyre!("no data directory found"))?;
        Ok(Self::new(base.join("calma")))
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms.max(1))
    }
}

fn config_dir() -> eyre::Result<PathBuf> {
    let base = dirs::config_dir().ok_or_else(|| eyre::eyre!("no config directory found"))?;
    Ok(base.join("calma"))
}

fn config_path() -> eyre::Result<PathBuf> {
    Ok(config_dir()?.join("config.json"))
}

pub fn has_config() -> bool {
    config_path().map(|p| p.exists()).unwrap_or(false)
}

pub fn load_config() -> eyre::Result<CalmaConfig> {
    load_config_from(&config_path()?)
}

/// Load the user's config, or defaults when none has been saved yet.
pub fn load_or_default() -> eyre::Result<CalmaConfig> {
    load_or_default_from(&config_path()?)
}

pub fn load_or_default_from(path: &Path) -> eyre::Result<CalmaConfig> {
    if path.exists() {
        load_config_from(path)
    } else {
        tracing::debug!(path = %path.display(), "no config file, using defaults");
        CalmaConfig::default_for_user()
    }
}

pub fn load_config_from(path: &Path) -> eyre::Result<CalmaConfig> {
    let contents = std::fs::read_to_string(path)
        .map_err(|e| eyre::eyre!("failed to read config at {}: {e}", path.display()))?;

    // Parse as raw JSON so we can run migrations before deserializing.
    let json: serde_json::Value = serde_json::from_str(&contents)?;
    let on_disk_version = match json.get("config_version") {
        None | Some(serde_json::Value::Null) => 0,
        Some(v) => v
            .as_u64()
            .and_then(|n| u32::try_from(n).ok())
            .ok_or_else(|| eyre::eyre!("invalid config_version {v}"))?,
    };

    let migrated = migrate(json, on_disk_version)?;
    let config: CalmaConfig = serde_json::from_value(migrated)?;
    Ok(config)
}

/// Run sequential migrations from `from_version` up to [`CURRENT_VERSION`].
///
/// Each migration is a pure transform on the raw JSON value.
fn migrate(mut json: serde_json::Value, from_version: u32) -> eyre::Result<serde_json::Value> {
    if from_version > CURRENT_VERSION {
        return Err(eyre::eyre!(
            "config_version {from_version} is newer than this build supports ({CURRENT_VERSION}). \
             Please update Calma."
        ));
    }

    // v0 → v1: add tick_interval_ms
    if from_version < 1 {
        let obj = json
            .as_object_mut()
            .ok_or_else(|| eyre::eyre!("config is not a JSON object"))?;
        obj.entry("tick_interval_ms")
            .or_insert(serde_json::Value::Number(DEFAULT_TICK_INTERVAL_MS.into()));
        obj.insert(
            "config_version".to_string(),
            serde_json::Value::Number(1.into()),
        );
        tracing::info!("migrated config v0 → v1 (added tick_interval_ms)");
    }

    Ok(json)
}

pub fn save_config(config: &CalmaConfig) -> eyre::Result<()> {
    save_config_to(&config_dir()?, config)
}

pub fn save_config_to(dir: &Path, config: &CalmaConfig) -> eyre::Result<()> {
    std::fs::create_dir_all(dir)?;

    // Always write the current version, regardless of what was loaded.
    let mut stamped = config.clone();
    stamped.config_version = CURRENT_VERSION;

    let path = dir.join("config.json");
    let json = serde_json::to_string_pretty(&stamped)?;

    // Write to a temp file then rename for atomicity
    let tmp_path = dir.join("config.json.tmp");
    std::fs::write(&tmp_path, json.as_bytes())?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        std::fs::set_permissions(&tmp_path, std::fs::Permissions::from_mode(0o600))?;
    }

    std::fs::rename(&tmp_path, &path)?;

    tracing::info!(path = %path.display(), "config saved");
    Ok(())
}

pub fn delete_config() -> eyre::Result<()> {
    let path = config_path()?;
    if path.exists() {
        std::fs::remove_file(&path)?;
        tracing::info!(path = %path.display(), "config deleted");
    }
    Ok(())
}
