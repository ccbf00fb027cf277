//! Configuration loading and management.

use std::fmt;
use std::path::{Path, PathBuf};

use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use serde::{Deserialize, Serialize};

/// Application configuration.
#[derive(Clone, Serialize, Deserialize)]
pub struct Config {
    /// Default path for the merged operation log.
    pub output_path: PathBuf,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("output_path", &self.output_path)
            .finish()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            output_path: PathBuf::from("ops.csv"),
        }
    }
}

impl Config {
    /// Loads configuration, optionally from a specific file.
    #[expect(
        clippy::result_large_err,
        reason = "figment::Error is large but only returned at startup"
    )]
    pub fn load_from(config_path: Option<&Path>) -> Result<Self, figment::Error> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        // Load from default config location
        if let Some(config_dir) = dirs_config_path() {
            figment = figment.merge(Toml::file(config_dir.join("config.toml")));
        }

        // Load from specified config file
        if let Some(path) = config_path {
            figment = figment.merge(Toml::file(path));
        }

        // Load from environment variables (BK_*)
        figment = figment.merge(Env::prefixed("BK_"));

        figment.extract()
    }
}

/// Returns the platform-specific config directory for bk.
fn dirs_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("bk"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_output_path_is_ops_csv() {
        let config = Config::default();
        assert_eq!(config.output_path, PathBuf::from("ops.csv"));
    }

    #[test]
    fn explicit_config_file_overrides_default() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("config.toml");
        std::fs::write(&path, "output_path = \"/tmp/log.csv\"\n").unwrap();

        let config = Config::load_from(Some(&path)).unwrap();
        assert_eq!(config.output_path, PathBuf::from("/tmp/log.csv"));
    }
}
