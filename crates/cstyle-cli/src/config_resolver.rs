//! Locating and loading `cstyle.toml`.
//!
//! Lookup order, first hit wins:
//!
//! 1. `--config` flag (or `CSTYLE_CONFIG`)
//! 2. `cstyle.toml`, then `.cstyle.toml`, in the project directory
//! 3. `config.toml` in `$CSTYLE_CONFIG_DIR`, else in `~/.cstyle/`
//! 4. built-in defaults

use anyhow::{Context, Result};
use cstyle_core::Config;
use std::path::{Path, PathBuf};

const PROJECT_FILES: [&str; 2] = ["cstyle.toml", ".cstyle.toml"];
const GLOBAL_FILE: &str = "config.toml";

/// Where the configuration came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// Given on the command line.
    Explicit(PathBuf),
    /// Found in the project directory.
    Project(PathBuf),
    /// Found in the user's global config directory.
    Global(PathBuf),
    /// Nothing found.
    Default,
}

impl ConfigSource {
    /// Path of the file to load, if any.
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::Explicit(p) | Self::Project(p) | Self::Global(p) => Some(p),
            Self::Default => None,
        }
    }

    /// Loads the configuration this source points at.
    ///
    /// # Errors
    ///
    /// Fails if the file cannot be read or is not valid configuration.
    pub fn load(&self) -> Result<Config> {
        let Some(path) = self.path() else {
            tracing::debug!("No config file found, using defaults");
            return Ok(Config::default());
        };
        if matches!(self, Self::Global(_)) {
            tracing::info!("Using global config: {}", path.display());
        }
        Config::from_file(path).with_context(|| format!("Failed to load config: {}", path.display()))
    }
}

/// Resolves the configuration source for `project_dir`.
#[must_use]
pub fn resolve(project_dir: &Path, explicit: Option<&Path>) -> ConfigSource {
    let global = std::env::var_os("CSTYLE_CONFIG_DIR")
        .map(PathBuf::from)
        .or_else(|| home::home_dir().map(|home| home.join(".cstyle")));
    resolve_with(project_dir, explicit, global.as_deref())
}

fn resolve_with(project_dir: &Path, explicit: Option<&Path>, global: Option<&Path>) -> ConfigSource {
    if let Some(path) = explicit {
        return ConfigSource::Explicit(path.to_path_buf());
    }
    if let Some(found) = PROJECT_FILES
        .iter()
        .map(|name| project_dir.join(name))
        .find(|candidate| candidate.is_file())
    {
        tracing::debug!("Found project config: {}", found.display());
        return ConfigSource::Project(found);
    }
    if let Some(found) = global
        .map(|dir| dir.join(GLOBAL_FILE))
        .filter(|candidate| candidate.is_file())
    {
        tracing::debug!("Found global config: {}", found.display());
        return ConfigSource::Global(found);
    }
    ConfigSource::Default
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn explicit_path_is_trusted_without_probing() {
        let project = TempDir::new().unwrap();
        fs::write(project.path().join("cstyle.toml"), "").unwrap();

        let source = resolve_with(project.path(), Some(Path::new("/nowhere/c.toml")), None);
        assert_eq!(source, ConfigSource::Explicit(PathBuf::from("/nowhere/c.toml")));
        assert!(source.load().is_err());
    }

    #[test]
    fn plain_name_beats_dot_name() {
        let project = TempDir::new().unwrap();
        fs::write(project.path().join(".cstyle.toml"), "").unwrap();
        assert_eq!(
            resolve_with(project.path(), None, None),
            ConfigSource::Project(project.path().join(".cstyle.toml"))
        );

        fs::write(project.path().join("cstyle.toml"), "").unwrap();
        assert_eq!(
            resolve_with(project.path(), None, None),
            ConfigSource::Project(project.path().join("cstyle.toml"))
        );
    }

    #[test]
    fn global_dir_is_the_last_resort() {
        let project = TempDir::new().unwrap();
        let global = TempDir::new().unwrap();
        assert_eq!(
            resolve_with(project.path(), None, Some(global.path())),
            ConfigSource::Default
        );

        fs::write(global.path().join("config.toml"), "fail_on = \"error\"\n").unwrap();
        let source = resolve_with(project.path(), None, Some(global.path()));
        assert_eq!(source, ConfigSource::Global(global.path().join("config.toml")));
        assert_eq!(source.load().unwrap().fail_on.as_deref(), Some("error"));

        fs::write(project.path().join("cstyle.toml"), "").unwrap();
        assert!(matches!(
            resolve_with(project.path(), None, Some(global.path())),
            ConfigSource::Project(_)
        ));
    }

    #[test]
    fn default_source_loads_defaults() {
        let config = ConfigSource::Default.load().unwrap();
        assert!(config.rules.is_empty());
        assert!(ConfigSource::Default.path().is_none());
    }
}
