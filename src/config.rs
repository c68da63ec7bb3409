use anyhow::{Context, Result};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// SQLite file; relative paths resolve against the config directory
    #[serde(default = "default_database_file")]
    pub database_file: PathBuf,
    /// Log file written by the CLI, truncated on each run
    #[serde(default = "default_log_file")]
    pub log_file: PathBuf,
}

fn default_database_file() -> PathBuf {
    PathBuf::from("contacts.db")
}

fn default_log_file() -> PathBuf {
    PathBuf::from("option-persist.log")
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_file: default_database_file(),
            log_file: default_log_file(),
        }
    }
}

impl Config {
    pub fn get_config_dir() -> Result<PathBuf> {
        let config_dir = if cfg!(target_os = "linux") {
            // Use XDG config directory on Linux
            dirs::config_dir()
                .context("Failed to get XDG config directory")?
                .join("option-persist")
        } else {
            // Use home directory with dot prefix on Windows/Mac
            dirs::home_dir()
                .context("Failed to get home directory")?
                .join(".option-persist")
        };

        if !config_dir.exists() {
            fs::create_dir_all(&config_dir)
                .with_context(|| format!("Failed to create config directory: {:?}", config_dir))?;
            info!("Created config directory: {:?}", config_dir);
        }

        Ok(config_dir)
    }

    pub fn get_config_path() -> Result<PathBuf> {
        Ok(Self::get_config_dir()?.join("config.toml"))
    }

    pub fn load() -> Result<Self> {
        Self::load_from(&Self::get_config_path()?)
    }

    pub fn load_from(config_path: &Path) -> Result<Self> {
        debug!("Loading config from: {:?}", config_path);

        if !config_path.exists() {
            info!("Config file doesn't exist, using defaults");
            return Ok(Self::default());
        }

        let config_content = fs::read_to_string(config_path)
            .with_context(|| format!("Failed to read config file: {:?}", config_path))?;

        let config: Config = toml::from_str(&config_content)
            .with_context(|| format!("Failed to parse config file: {:?}", config_path))?;

        debug!("Loaded config: {:?}", config);
        Ok(config)
    }

    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        debug!("Saving config to: {:?}", config_path);

        let config_content =
            toml::to_string_pretty(self).context("Failed to serialize config to TOML")?;

        fs::write(config_path, config_content)
            .with_context(|| format!("Failed to write config file: {:?}", config_path))?;

        info!("Config saved successfully");
        Ok(())
    }

    /// Database path, resolved against `base` when relative
    pub fn database_path(&self, base: &Path) -> PathBuf {
        resolve(base, &self.database_file)
    }

    pub fn log_path(&self, base: &Path) -> PathBuf {
        resolve(base, &self.log_file)
    }
}

fn resolve(base: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_from(&dir.path().join("config.toml")).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "database_file = \"/var/lib/people.db\"\n").unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.database_file, PathBuf::from("/var/lib/people.db"));
        assert_eq!(config.log_file, default_log_file());
    }

    #[test]
    fn test_save_and_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let config = Config {
            database_file: PathBuf::from("other.db"),
            log_file: PathBuf::from("other.log"),
        };
        config.save_to(&path).unwrap();

        assert_eq!(Config::load_from(&path).unwrap(), config);
    }

    #[test]
    fn test_invalid_toml_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "database_file = [").unwrap();

        let err = Config::load_from(&path).unwrap_err();
        assert!(err.to_string().contains("Failed to parse config file"));
    }

    #[test]
    fn test_path_resolution() {
        let config = Config::default();
        let base = Path::new("/home/user/.config/option-persist");
        assert_eq!(config.database_path(base), base.join("contacts.db"));

        let config = Config {
            database_file: PathBuf::from("/tmp/abs.db"),
            ..Config::default()
        };
        assert_eq!(config.database_path(base), PathBuf::from("/tmp/abs.db"));
    }
}
