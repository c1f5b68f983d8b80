use std::ffi::OsString;
use std::path::{Path, PathBuf};

use anyhow::Context;

use crate::foundation::error::{CardError, CardResult};
use crate::text::fonts::FontLibrary;
use crate::theme::registry::ThemeRegistry;

/// Environment variable holding extra font directories (platform path-list syntax).
pub const FONT_DIRS_ENV: &str = "CARDSMITH_FONT_DIRS";

/// Process-level render settings.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RenderConfig {
    /// Directories searched for font files, in order.
    #[serde(default = "default_font_dirs")]
    pub font_dirs: Vec<PathBuf>,
    /// Replacement theme catalog (JSON). `None` uses the built-in catalog.
    #[serde(default)]
    pub themes: Option<PathBuf>,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            font_dirs: default_font_dirs(),
            themes: None,
        }
    }
}

impl RenderConfig {
    /// Parse a JSON config; missing fields take their defaults.
    pub fn from_json(json: &str) -> CardResult<Self> {
        serde_json::from_str(json)
            .map_err(|e| CardError::validation(format!("invalid config: {e}")))
    }

    /// Read and parse a JSON config file.
    pub fn from_path(path: &Path) -> CardResult<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("read config '{}'", path.display()))?;
        Self::from_json(&json)
    }

    /// Resolve fonts from [`RenderConfig::font_dirs`].
    pub fn font_library(&self) -> FontLibrary {
        FontLibrary::discover(&self.font_dirs)
    }

    /// Load the replacement theme catalog, if one is configured.
    pub fn load_themes(&self) -> CardResult<Option<ThemeRegistry>> {
        self.themes
            .as_deref()
            .map(ThemeRegistry::from_path)
            .transpose()
    }
}

/// `$CARDSMITH_FONT_DIRS`, then `./fonts`, then the platform font directories.
pub fn default_font_dirs() -> Vec<PathBuf> {
    font_dirs_from(std::env::var_os(FONT_DIRS_ENV), home_dir())
}

fn font_dirs_from(env: Option<OsString>, home: Option<PathBuf>) -> Vec<PathBuf> {
    let mut dirs: Vec<PathBuf> = env
        .map(|v| std::env::split_paths(&v).filter(|p| !p.as_os_str().is_empty()).collect())
        .unwrap_or_default();
    dirs.push(PathBuf::from("fonts"));
    dirs.extend(platform_font_dirs(home.as_deref()));
    dirs
}

fn home_dir() -> Option<PathBuf> {
    std::env::var_os("HOME")
        .or_else(|| std::env::var_os("USERPROFILE"))
        .map(PathBuf::from)
}

#[cfg(target_os = "macos")]
fn platform_font_dirs(home: Option<&Path>) -> Vec<PathBuf> {
    let mut dirs = vec![
        PathBuf::from("/System/Library/Fonts"),
        PathBuf::from("/Library/Fonts"),
    ];
    if let Some(home) = home {
        dirs.push(home.join("Library/Fonts"));
    }
    dirs
}

#[cfg(windows)]
fn platform_font_dirs(home: Option<&Path>) -> Vec<PathBuf> {
    let windir = std::env::var_os("WINDIR")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("C:\\Windows"));
    let mut dirs = vec![windir.join("Fonts")];
    if let Some(home) = home {
        dirs.push(home.join("AppData\\Local\\Microsoft\\Windows\\Fonts"));
    }
    dirs
}

#[cfg(not(any(target_os = "macos", windows)))]
fn platform_font_dirs(home: Option<&Path>) -> Vec<PathBuf> {
    let mut dirs = vec![
        PathBuf::from("/usr/share/fonts"),
        PathBuf::from("/usr/local/share/fonts"),
    ];
    if let Some(home) = home {
        dirs.push(home.join(".local/share/fonts"));
        dirs.push(home.join(".fonts"));
    }
    dirs
}

#[cfg(test)]
#[path = "../../tests/unit/config/settings.rs"]
mod tests;
