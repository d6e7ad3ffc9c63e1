//! Optional bootstrapper settings stored in `bootstrapper.toml`.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow};
use serde::{Deserialize, Serialize};

/// Settings file looked up in the current directory when `--config` is absent.
pub const DEFAULT_SETTINGS_FILE: &str = "bootstrapper.toml";

/// Bootstrapper settings (TOML).
///
/// Every field is optional. Anything left out falls back to the built-in
/// default, and command-line flags override whatever is set here.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    pub auto: Option<bool>,
    pub arch: Option<String>,
    pub bootstrap_src_dir: Option<PathBuf>,
    pub main_src_dir: Option<PathBuf>,
    pub repo_url: Option<String>,
    pub main_branch: Option<String>,
    pub bootstrap_branch: Option<String>,
    pub installed_prefix: Option<PathBuf>,
    pub out_dir: Option<PathBuf>,

    pub build: BuildSettings,
}

/// How the bootstrap sources are compiled.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct BuildSettings {
    /// CMake generator (`-G`).
    pub generator: String,
    /// `CMAKE_BUILD_TYPE` for the bootstrap build.
    pub build_type: String,
}

impl Default for BuildSettings {
    fn default() -> Self {
        Self {
            generator: "Ninja".to_string(),
            build_type: "RelWithDebInfo".to_string(),
        }
    }
}

impl BuildSettings {
    pub fn validate(&self) -> Result<()> {
        if self.generator.trim().is_empty() {
            return Err(anyhow!("build.generator must not be empty"));
        }
        if self.build_type.trim().is_empty() {
            return Err(anyhow!("build.build_type must not be empty"));
        }
        Ok(())
    }
}

/// Load settings from a TOML file.
///
/// If the file is missing and `required` is false, returns
/// `Settings::default()`.
pub fn load_settings(path: &Path, required: bool) -> Result<Settings> {
    if !path.exists() {
        if required {
            return Err(anyhow!("settings file {} does not exist", path.display()));
        }
        return Ok(Settings::default());
    }
    let contents = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let settings: Settings =
        toml::from_str(&contents).with_context(|| format!("parse {}", path.display()))?;
    settings.build.validate()?;
    Ok(settings)
}
