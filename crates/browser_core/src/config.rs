use std::{
    fs,
    path::{Path, PathBuf},
    time::Duration,
};

use serde::Deserialize;
use thiserror::Error;

pub const CONFIG_FILE_NAME: &str = "userbrowser.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config file {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct BrowserConfig {
    /// TOML or JSON file replacing the built-in directory.
    pub directory_path: Option<PathBuf>,
    pub media_probe_timeout_secs: u64,
    pub log_filter: String,
    pub window_title: String,
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self {
            directory_path: None,
            media_probe_timeout_secs: 10,
            log_filter: "info".into(),
            window_title: "User Browser".into(),
        }
    }
}

impl BrowserConfig {
    /// Defaults, then the config file, then environment overrides.
    ///
    /// An explicit path must exist. Without one, `userbrowser.toml` in the
    /// working directory is tried first, then the platform config directory;
    /// missing discovered files are skipped.
    pub fn load(explicit_path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = match explicit_path {
            Some(path) => Self::from_file(path)?,
            None => match discover_config_file() {
                Some(path) => Self::from_file(&path)?,
                None => Self::default(),
            },
        };
        config.apply_env_from(|name| std::env::var(name).ok());
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config = toml::from_str::<Self>(&raw).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::debug!(path = %path.display(), "loaded browser config");
        Ok(config)
    }

    /// Unparseable or empty values are ignored.
    pub fn apply_env_from(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(v) = lookup("USERBROWSER_DIRECTORY").filter(|v| !v.trim().is_empty()) {
            self.directory_path = Some(PathBuf::from(v));
        }
        if let Some(v) = lookup("APP__DIRECTORY_PATH").filter(|v| !v.trim().is_empty()) {
            self.directory_path = Some(PathBuf::from(v));
        }

        if let Some(v) = lookup("APP__MEDIA_PROBE_TIMEOUT_SECS") {
            if let Ok(parsed) = v.trim().parse::<u64>() {
                self.media_probe_timeout_secs = parsed;
            }
        }

        if let Some(v) = lookup("APP__LOG_FILTER").filter(|v| !v.trim().is_empty()) {
            self.log_filter = v;
        }
    }

    pub fn media_probe_timeout(&self) -> Duration {
        Duration::from_secs(self.media_probe_timeout_secs.max(1))
    }
}

fn discover_config_file() -> Option<PathBuf> {
    let local = PathBuf::from(CONFIG_FILE_NAME);
    if local.is_file() {
        return Some(local);
    }
    dirs::config_dir()
        .map(|base| base.join("userbrowser").join(CONFIG_FILE_NAME))
        .filter(|path| path.is_file())
}

#[cfg(test)]
mod tests {
    use std::{
        collections::HashMap,
        env,
        time::{SystemTime, UNIX_EPOCH},
    };

    use super::*;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn partial_file_keeps_defaults_for_missing_keys() {
        let config: BrowserConfig =
            toml::from_str("media_probe_timeout_secs = 3").expect("partial config");
        assert_eq!(config.media_probe_timeout_secs, 3);
        assert_eq!(config.log_filter, "info");
        assert_eq!(config.directory_path, None);
    }

    #[test]
    fn env_overrides_file_values() {
        let mut config = BrowserConfig::default();
        config.apply_env_from(lookup_from(&[
            ("USERBROWSER_DIRECTORY", "/tmp/users.toml"),
            ("APP__MEDIA_PROBE_TIMEOUT_SECS", "4"),
            ("APP__LOG_FILTER", "debug"),
        ]));
        assert_eq!(config.directory_path, Some(PathBuf::from("/tmp/users.toml")));
        assert_eq!(config.media_probe_timeout(), Duration::from_secs(4));
        assert_eq!(config.log_filter, "debug");
    }

    #[test]
    fn unparseable_env_values_are_ignored() {
        let mut config = BrowserConfig::default();
        config.apply_env_from(lookup_from(&[
            ("APP__MEDIA_PROBE_TIMEOUT_SECS", "soon"),
            ("APP__LOG_FILTER", "   "),
        ]));
        assert_eq!(config, BrowserConfig::default());
    }

    #[test]
    fn zero_timeout_is_clamped() {
        let config = BrowserConfig {
            media_probe_timeout_secs: 0,
            ..BrowserConfig::default()
        };
        assert_eq!(config.media_probe_timeout(), Duration::from_secs(1));
    }

    #[test]
    fn explicit_config_file_is_read() {
        let suffix = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("clock")
            .as_nanos();
        let root = env::temp_dir().join(format!("userbrowser_config_test_{suffix}"));
        fs::create_dir_all(&root).expect("temp root");
        let path = root.join(CONFIG_FILE_NAME);
        fs::write(&path, "window_title = \"Reports\"\nlog_filter = \"warn\"\n").expect("write");

        let config = BrowserConfig::from_file(&path).expect("config");
        assert_eq!(config.window_title, "Reports");
        assert_eq!(config.log_filter, "warn");

        fs::write(&path, "log_filter = [").expect("write broken");
        assert!(matches!(
            BrowserConfig::from_file(&path),
            Err(ConfigError::Parse { .. })
        ));

        fs::remove_dir_all(root).expect("cleanup");
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        let err = BrowserConfig::load(Some(Path::new("/no/such/userbrowser.toml")))
            .expect_err("missing file");
        assert!(matches!(err, ConfigError::Read { .. }));
    }
}
