use std::env::{current_exe};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::Mutex;
use directories_next::{ProjectDirs};
use tokio::fs::{File};
use tokio::io::{AsyncReadExt, AsyncSeekExt, AsyncWriteExt};
use serde_json;
use fd_lock::{RwLock, RwLockWriteGuard};
use log::{info, warn};
use std::fs::OpenOptions;
use std::str;

use crate::config::types::Config;
use crate::error::ConfigError;

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("org", "oximeter", "oximeter-dashboard")
}

// creates a path to a .json file with the same name as the executable, in the same directory
// this could be useful for usb sticks
fn get_portable_config_path() -> Option<PathBuf> {
    match current_exe() {
        Ok(mut path) => {
            // F:\oximeter-dashboard.exe => F:\oximeter-dashboard.json
            if !path.set_extension("json") {
                warn!("current exe has no filename: {}", path.to_string_lossy());
                return None
            }

            Some(path)
        },
        Err(err) => {
            warn!("failed to get current exe path: {:?}", err);
            None
        },
    }
}

// creates a path to oximeter-dashboard.json in an os dependent standard directory, such as
// %AppData% on windows.
fn get_local_config_path() -> Option<PathBuf> {
    project_dirs().map(|dirs| {
        dirs.config_dir().join("oximeter-dashboard.json")
    })
}

fn get_config_path() -> Result<PathBuf, ConfigError> {
    if let Some(path) = get_portable_config_path() {
        match std::fs::metadata(&path) {
            Ok(attr) => {
                if attr.is_file() {
                    return Ok(path);
                }
            }
            Err(err) => {
                info!("Could not read metadata of: {}; Using local path instead. ({:?})", path.to_string_lossy(), err);
            },
        }
    }

    match get_local_config_path() {
        None => Err(ConfigError::NoConfigPath),
        Some(path) => Ok(path),
    }
}

/// Directory for files the application creates for the user, such as shared reports.
pub fn get_data_dir() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.data_dir().to_path_buf())
}

pub struct ConfigIOLocker {
    rw_lock: RwLock<std::fs::File>,
}

impl ConfigIOLocker {
    pub fn lock(&mut self) -> Result<RwLockWriteGuard<std::fs::File>, ConfigError> {
        match self.rw_lock.try_write() {
            Ok(guard) => Ok(guard),
            Err(source) => Err(ConfigError::CanNotLock { source }),
        }
    }
}

struct ConfigIOInner {
    file: std::fs::File,
}

#[derive(Clone)]
pub struct ConfigIO {
    inner: Arc<Mutex<ConfigIOInner>>,
}

impl ConfigIO {
    /// Opens the config file at its default location.
    pub fn new_sync() -> Result<Self, ConfigError> {
        let path = get_config_path()?;
        Self::open_sync(&path)
    }

    /// Opens (and creates if needed) the config file at `path`.
    pub fn open_sync(path: &Path) -> Result<Self, ConfigError> {
        info!("Using config file {}", path.to_string_lossy());

        if let Some(directory) = path.parent() {
            std::fs::create_dir_all(directory)?;
        }

        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .truncate(false)
            .append(false)
            .create(true)
            .open(path)?;

        let inner = ConfigIOInner {
            file,
        };
        Ok(ConfigIO { inner: Arc::new(Mutex::new(inner)) })
    }

    // obtain an exclusive file lock so that this config file is used by only one instance of
    // this application.
    pub fn locker(&mut self) -> Result<ConfigIOLocker, ConfigError> {
        let file = self.clone_std_file()?;

        Ok(ConfigIOLocker {
            rw_lock: RwLock::new(file),
        })
    }

    fn clone_std_file(&self) -> Result<std::fs::File, ConfigError> {
        let inner = self.inner.lock().map_err(|_| ConfigError::Poisoned)?;
        Ok(inner.file.try_clone()?)
    }

    // The File returned from here should never be closed!
    fn get_file(&self) -> Result<File, ConfigError> {
        let file = self.clone_std_file()?; // std File
        Ok(File::from_std(file)) // tokio File
    }

    pub async fn read(&self) -> Result<Config, ConfigError> {
        let mut file = self.get_file()?;
        info!("Reading config file");

        let mut content = vec![];
        file.rewind().await?;
        file.read_to_end(&mut content).await?;

        if content.is_empty() {
            return Ok(Config::default());
        }

        let content = str::from_utf8(&content)?;
        let config: Config = serde_json::from_str(content)?;
        Ok(config)
    }

    pub async fn save(&self, config: Config) -> Result<(), ConfigError> {
        let mut file = self.get_file()?;
        info!("Saving config");

        let content = serde_json::to_string_pretty(&config)?;
        file.rewind().await?;
        file.set_len(0).await?;
        file.write_all(content.as_bytes()).await?;
        file.flush().await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::types::ThemeMode;
    use tempfile::TempDir;

    #[tokio::test]
    async fn empty_file_reads_as_default() {
        let dir = TempDir::new().unwrap();
        let config_io = ConfigIO::open_sync(&dir.path().join("config.json")).unwrap();

        assert_eq!(config_io.read().await.unwrap(), Config::default());
    }

    #[tokio::test]
    async fn creates_missing_directories() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("deeper").join("config.json");

        ConfigIO::open_sync(&path).unwrap();
        assert!(path.is_file());
    }

    #[tokio::test]
    async fn shorter_content_replaces_longer_content() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{"theme":"light",  "padding": "xxxxxxxxxxxxxxxx"}"#).unwrap();

        let config_io = ConfigIO::open_sync(&path).unwrap();
        config_io.save(Config { theme: Some(ThemeMode::Dark) }).await.unwrap();

        let config = config_io.read().await.unwrap();
        assert_eq!(config.theme, Some(ThemeMode::Dark));
    }

    #[tokio::test]
    async fn invalid_json_is_reported() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, "{not json").unwrap();

        let config_io = ConfigIO::open_sync(&path).unwrap();
        let err = config_io.read().await.unwrap_err();
        assert!(matches!(err, ConfigError::JsonError { .. }));
        assert!(!err.is_file_not_found_error());
    }

    #[test]
    fn second_lock_on_the_same_file_fails() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");

        let mut first = ConfigIO::open_sync(&path).unwrap();
        let mut first_locker = first.locker().unwrap();
        let _guard = first_locker.lock().unwrap();

        let mut second = ConfigIO::open_sync(&path).unwrap();
        let mut second_locker = second.locker().unwrap();
        assert!(matches!(second_locker.lock(), Err(ConfigError::CanNotLock { .. })));
    }
}
