use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::geometry::Point;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("neither XDG_CONFIG_HOME nor HOME is set")]
    MissingHomeDirectory,
}

const APP_DIR: &str = "sticker-editor";
const APP_CONFIG_FILE: &str = "config.json";

const DEFAULT_SCALE_MIN: f64 = 0.1;
const DEFAULT_SCALE_MAX: f64 = 5.0;
const DEFAULT_MIN_SIZE: f64 = 20.0;
const DEFAULT_WHEEL_SHRINK: f64 = 0.9;
const DEFAULT_WHEEL_GROW: f64 = 1.1;
const DEFAULT_WHEEL_COMMIT_DELAY_MS: u64 = 500;
const DEFAULT_POSITION: Point = Point::new(100.0, 100.0);

/// Editor tuning from `config.json`. Every field is optional in the file.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    pub scale_min: f64,
    pub scale_max: f64,
    pub min_size: f64,
    pub wheel_shrink_factor: f64,
    pub wheel_grow_factor: f64,
    pub wheel_commit_delay_ms: u64,
    /// Oldest undo entries beyond this count are dropped. `None` keeps everything.
    pub history_limit: Option<usize>,
    pub default_position: Point,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            scale_min: DEFAULT_SCALE_MIN,
            scale_max: DEFAULT_SCALE_MAX,
            min_size: DEFAULT_MIN_SIZE,
            wheel_shrink_factor: DEFAULT_WHEEL_SHRINK,
            wheel_grow_factor: DEFAULT_WHEEL_GROW,
            wheel_commit_delay_ms: DEFAULT_WHEEL_COMMIT_DELAY_MS,
            history_limit: None,
            default_position: DEFAULT_POSITION,
        }
    }
}

impl EditorConfig {
    /// Replaces values that would break clamping or scaling with defaults.
    pub fn sanitized(mut self) -> Self {
        let defaults = Self::default();
        if !(self.scale_min.is_finite() && self.scale_min > 0.0) {
            tracing::warn!(value = self.scale_min, "invalid scale_min; using default");
            self.scale_min = defaults.scale_min;
        }
        if !(self.scale_max.is_finite() && self.scale_max >= self.scale_min) {
            tracing::warn!(value = self.scale_max, "invalid scale_max; using default");
            self.scale_max = defaults.scale_max.max(self.scale_min);
        }
        if !(self.min_size.is_finite() && self.min_size >= 0.0) {
            self.min_size = defaults.min_size;
        }
        if !(self.wheel_shrink_factor.is_finite() && self.wheel_shrink_factor > 0.0) {
            self.wheel_shrink_factor = defaults.wheel_shrink_factor;
        }
        if !(self.wheel_grow_factor.is_finite() && self.wheel_grow_factor > 0.0) {
            self.wheel_grow_factor = defaults.wheel_grow_factor;
        }
        if self.history_limit == Some(0) {
            self.history_limit = None;
        }
        self
    }
}

pub fn load_editor_config() -> EditorConfig {
    let (xdg_config_home, home) = config_env_dirs();
    load_editor_config_with(xdg_config_home.as_deref(), home.as_deref())
}

pub(crate) fn load_editor_config_with(
    xdg_config_home: Option<&Path>,
    home: Option<&Path>,
) -> EditorConfig {
    let path = match app_config_path(APP_DIR, APP_CONFIG_FILE, xdg_config_home, home) {
        Ok(p) => p,
        Err(_) => return EditorConfig::default(),
    };
    if !path.exists() {
        return EditorConfig::default();
    }
    let config = match std::fs::read_to_string(&path) {
        Ok(contents) => serde_json::from_str(&contents).unwrap_or_else(|err| {
            tracing::warn!(?err, ?path, "failed to parse config.json; using defaults");
            EditorConfig::default()
        }),
        Err(err) => {
            tracing::warn!(?err, ?path, "failed to read config.json; using defaults");
            EditorConfig::default()
        }
    };
    config.sanitized()
}

pub(crate) fn config_env_dirs() -> (Option<PathBuf>, Option<PathBuf>) {
    (
        std::env::var_os("XDG_CONFIG_HOME").map(PathBuf::from),
        std::env::var_os("HOME").map(PathBuf::from),
    )
}

pub(crate) fn app_config_path(
    app_dir: &str,
    file_name: &str,
    xdg_config_home: Option<&Path>,
    home: Option<&Path>,
) -> Result<PathBuf, ConfigError> {
    let mut path = config_root(xdg_config_home, home)?;
    path.push(app_dir);
    path.push(file_name);
    Ok(path)
}

fn config_root(xdg_config_home: Option<&Path>, home: Option<&Path>) -> Result<PathBuf, ConfigError> {
    if let Some(xdg) = xdg_config_home.filter(|path| !path.as_os_str().is_empty()) {
        return Ok(xdg.to_path_buf());
    }

    let home = home.ok_or(ConfigError::MissingHomeDirectory)?;
    Ok(home.join(".config"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_config(root: &Path, contents: &str) {
        let dir = root.join(APP_DIR);
        std::fs::create_dir_all(&dir).expect("config dir should be creatable");
        std::fs::write(dir.join(APP_CONFIG_FILE), contents).expect("config should be writable");
    }

    #[test]
    fn app_config_path_prefers_xdg_config_home() {
        let path = app_config_path(
            "sticker-editor",
            "config.json",
            Some(Path::new("/tmp/config-root")),
            Some(Path::new("/tmp/home")),
        )
        .expect("path should resolve");

        assert_eq!(
            path,
            PathBuf::from("/tmp/config-root/sticker-editor/config.json")
        );
    }

    #[test]
    fn app_config_path_falls_back_to_home_dot_config() {
        let path = app_config_path(
            "sticker-editor",
            "config.json",
            Some(Path::new("")),
            Some(Path::new("/tmp/home")),
        )
        .expect("path should resolve");

        assert_eq!(
            path,
            PathBuf::from("/tmp/home/.config/sticker-editor/config.json")
        );
    }

    #[test]
    fn app_config_path_errors_when_home_missing_and_xdg_unset() {
        let error = app_config_path("sticker-editor", "config.json", None, None).unwrap_err();
        assert_eq!(error, ConfigError::MissingHomeDirectory);
    }

    #[test]
    fn missing_config_file_yields_defaults() {
        let root = tempfile::tempdir().expect("tempdir should be created");
        let config = load_editor_config_with(Some(root.path()), None);
        assert_eq!(config, EditorConfig::default());
        assert_eq!(config.scale_min, 0.1);
        assert_eq!(config.scale_max, 5.0);
        assert_eq!(config.min_size, 20.0);
        assert_eq!(config.wheel_commit_delay_ms, 500);
    }

    #[test]
    fn partial_config_overrides_only_named_fields() {
        let root = tempfile::tempdir().expect("tempdir should be created");
        write_config(
            root.path(),
            r#"{ "scale_max": 3.0, "history_limit": 50, "default_position": { "x": 150, "y": 150 } }"#,
        );

        let config = load_editor_config_with(Some(root.path()), None);
        assert_eq!(config.scale_max, 3.0);
        assert_eq!(config.scale_min, 0.1);
        assert_eq!(config.history_limit, Some(50));
        assert_eq!(config.default_position, Point::new(150.0, 150.0));
    }

    #[test]
    fn malformed_config_falls_back_to_defaults() {
        let root = tempfile::tempdir().expect("tempdir should be created");
        write_config(root.path(), "{ not json");
        assert_eq!(
            load_editor_config_with(Some(root.path()), None),
            EditorConfig::default()
        );
    }

    #[test]
    fn sanitized_repairs_inverted_or_non_positive_ranges() {
        let config = EditorConfig {
            scale_min: -1.0,
            scale_max: 0.05,
            wheel_grow_factor: 0.0,
            history_limit: Some(0),
            ..EditorConfig::default()
        }
        .sanitized();

        assert_eq!(config.scale_min, 0.1);
        assert_eq!(config.scale_max, 5.0);
        assert_eq!(config.wheel_grow_factor, 1.1);
        assert_eq!(config.history_limit, None);
    }
}
