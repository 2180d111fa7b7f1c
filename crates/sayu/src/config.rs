use directories::ProjectDirs;
use notify::{EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use sayu_core::MenuOptions;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Config {
    #[serde(default)]
    pub menu: MenuOptions,
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to determine config directory")]
    ConfigDirNotFound,
    #[error("Config error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("Notify error: {0}")]
    Notify(#[from] notify::Error),
}

pub fn get_config_path() -> Result<PathBuf, ConfigError> {
    let proj_dirs =
        ProjectDirs::from("org", "sayu", "sayu").ok_or(ConfigError::ConfigDirNotFound)?;
    Ok(proj_dirs.config_dir().join("config.toml"))
}

pub fn resolve_config_path(explicit: Option<&Path>) -> Result<PathBuf, ConfigError> {
    match explicit {
        Some(path) => Ok(path.to_path_buf()),
        None => get_config_path(),
    }
}

pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    let s = config::Config::builder()
        .add_source(config::File::from(path).required(false))
        .add_source(config::Environment::with_prefix("SAYU").separator("__"))
        .build()?;

    Ok(s.try_deserialize()?)
}

pub fn builtin_config() -> Result<Config, ConfigError> {
    let s = config::Config::builder()
        .add_source(config::File::from_str(
            DEFAULT_CONFIG,
            config::FileFormat::Toml,
        ))
        .build()?;

    Ok(s.try_deserialize()?)
}

/// Loads `path`, writing the default file first if there is none. Falls back
/// to the bundled defaults when the file cannot be used.
pub fn load_or_setup(path: &Path) -> Config {
    if !path.exists()
        && let Err(e) = write_default_config(path)
    {
        log::warn!("Failed to write default config to {}: {}", path.display(), e);
    }

    match load_config(path) {
        Ok(c) if !c.menu.items.is_empty() => c,
        Ok(_) => {
            log::warn!("{} defines no menu items, using defaults", path.display());
            fallback()
        }
        Err(e) => {
            log::error!("Failed to load {}: {}", path.display(), e);
            fallback()
        }
    }
}

fn fallback() -> Config {
    builtin_config().unwrap_or_else(|e| {
        log::error!("Bundled config is invalid: {}", e);
        Config::default()
    })
}

pub fn write_default_config(path: &Path) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        fs_err::create_dir_all(parent)?;
    }
    if !path.exists() {
        fs_err::write(path, DEFAULT_CONFIG)?;
    }
    Ok(())
}

const DEFAULT_CONFIG: &str = include_str!("default_config.toml");

use crate::events::AppEvent;
use async_channel::Sender;

pub async fn run_async_watcher(config_path: PathBuf, tx: Sender<AppEvent>) {
    let config_dir = match config_path.parent() {
        Some(p) => p.to_path_buf(),
        None => return,
    };

    if let Err(e) = fs_err::create_dir_all(&config_dir) {
        log::error!("Failed to create config directory for watching: {}", e);
        return;
    }

    let (bridge_tx, bridge_rx) = async_channel::unbounded();

    let mut watcher = match RecommendedWatcher::new(
        move |res| {
            let _ = bridge_tx.send_blocking(res);
        },
        notify::Config::default(),
    ) {
        Ok(w) => w,
        Err(e) => {
            log::error!("Failed to create watcher: {}", e);
            return;
        }
    };

    if let Err(e) = watcher.watch(&config_dir, RecursiveMode::NonRecursive) {
        log::error!("Failed to watch config directory: {}", e);
        return;
    }

    while let Ok(res) = bridge_rx.recv().await {
        match res {
            Ok(event) => {
                let meaningful_event = matches!(
                    event.kind,
                    EventKind::Modify(_) | EventKind::Create(_) | EventKind::Remove(_)
                );

                if meaningful_event
                    && event.paths.iter().any(|p| p == &config_path)
                    && tx.send(AppEvent::ConfigReload).await.is_err()
                {
                    break;
                }
            }
            Err(e) => log::error!("Watch error: {}", e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sayu_core::{SectorOffset, TriggerKey};

    #[test]
    fn test_bundled_config_is_valid() {
        let config = builtin_config().unwrap();
        assert_eq!(config.menu.items.len(), 6);
        assert!(config.menu.clone().normalize().is_ok());
    }

    #[test]
    fn test_config_deserialization() {
        let json = r#"{
            "menu": {
                "inner": 600,
                "outer": 900,
                "trigger_offset": 100,
                "trigger_key": "ctrl",
                "sector_offset": { "fixed": 0.0 },
                "items": [
                    { "title": "Account", "content": "Account settings" },
                    { "title": "Setting" }
                ]
            }
        }"#;

        let config: Config = serde_json::from_str(json).unwrap();
        assert_eq!(config.menu.trigger_key, TriggerKey::Control);
        assert_eq!(config.menu.bounds().inner_radius, 200.0);
        assert!(matches!(config.menu.sector_offset, SectorOffset::Fixed(_)));
        assert_eq!(config.menu.items[1].content, "");
    }
}
