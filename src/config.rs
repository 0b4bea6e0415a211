//! Application configuration: TOML file loading, CLI overrides, and defaults.
//!
//! Resolution order (first found wins, values merge/override):
//! 1. CLI flags (`--config`, `--columns`, `--no-icons`, server URL)
//! 2. `$INVB_CONFIG` environment variable (path to config file)
//! 3. Project-local `.invb.toml` in the current working directory
//! 4. Global `~/.config/invb/config.toml`
//! 5. Built-in defaults

use std::path::{Path, PathBuf};

use serde::Deserialize;

/// Backend connection settings.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct ServerConfig {
    /// Base URL of the invoice storage server.
    pub url: Option<String>,
    /// Name of the storage root folder the column browser starts from.
    pub root_segment: Option<String>,
    /// Per-request timeout in seconds.
    pub timeout_secs: Option<u64>,
}

/// Navigation and rendering settings.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct UiConfig {
    /// Starting variant: "tree" or "columns".
    pub view: Option<String>,
    /// Use nerd font icons (false = ASCII fallback).
    pub use_icons: Option<bool>,
    /// Confirm before delete operations.
    pub confirm_delete: Option<bool>,
}

/// Custom color overrides for the "custom" scheme.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct ThemeColorsConfig {
    pub selected_bg: Option<String>,
    pub selected_fg: Option<String>,
    pub folder_fg: Option<String>,
    pub file_fg: Option<String>,
    pub border_fg: Option<String>,
    pub status_bg: Option<String>,
    pub status_fg: Option<String>,
    pub url_fg: Option<String>,
}

/// Theme configuration section.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct ThemeConfig {
    /// Color scheme: "dark", "light", "custom".
    pub scheme: Option<String>,
    pub custom: Option<ThemeColorsConfig>,
}

/// Top-level application configuration.
///
/// All fields are optional so that partial configs from different sources
/// can be merged together (CLI overrides file, file overrides defaults).
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub ui: UiConfig,
    pub theme: ThemeConfig,
}

/// Default server base URL (the backend's development address).
pub const DEFAULT_SERVER_URL: &str = "http://localhost:8080";
/// Default storage root folder name.
pub const DEFAULT_ROOT_SEGMENT: &str = "pdf-storage";
/// Default per-request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 5;

/// Return the list of candidate config file paths in priority order.
///
/// Does NOT include the CLI `--config` path — that is handled separately.
fn candidate_paths() -> Vec<PathBuf> {
    let mut paths = Vec::new();

    if let Ok(env_path) = std::env::var("INVB_CONFIG") {
        paths.push(PathBuf::from(env_path));
    }
    if let Ok(cwd) = std::env::current_dir() {
        paths.push(cwd.join(".invb.toml"));
    }
    if let Some(config_dir) = dirs::config_dir() {
        paths.push(config_dir.join("invb").join("config.toml"));
    }

    paths
}

/// Try to read and parse a TOML config file. Returns `None` if the file
/// doesn't exist or can't be parsed (with a warning printed to stderr).
fn load_file(path: &Path) -> Option<AppConfig> {
    let content = std::fs::read_to_string(path).ok()?;
    match toml::from_str::<AppConfig>(&content) {
        Ok(cfg) => Some(cfg),
        Err(e) => {
            eprintln!(
                "Warning: failed to parse config file {}: {}",
                path.display(),
                e
            );
            None
        }
    }
}

impl AppConfig {
    /// Merge `other` on top of `self` — `other`'s `Some` values win.
    pub fn merge(self, other: &AppConfig) -> AppConfig {
        AppConfig {
            server: ServerConfig {
                url: other.server.url.clone().or(self.server.url),
                root_segment: other.server.root_segment.clone().or(self.server.root_segment),
                timeout_secs: other.server.timeout_secs.or(self.server.timeout_secs),
            },
            ui: UiConfig {
                view: other.ui.view.clone().or(self.ui.view),
                use_icons: other.ui.use_icons.or(self.ui.use_icons),
                confirm_delete: other.ui.confirm_delete.or(self.ui.confirm_delete),
            },
            theme: ThemeConfig {
                scheme: other.theme.scheme.clone().or(self.theme.scheme),
                custom: match (&self.theme.custom, &other.theme.custom) {
                    (_, Some(o)) => Some(o.clone()),
                    (Some(s), None) => Some(s.clone()),
                    (None, None) => None,
                },
            },
        }
    }

    /// Load the final merged configuration.
    ///
    /// `cli_config_path` is an explicit config file path from `--config`.
    /// `cli_overrides` are partial overrides derived from CLI flags.
    pub fn load(cli_config_path: Option<&Path>, cli_overrides: Option<&AppConfig>) -> AppConfig {
        let mut config = AppConfig::default();

        // Walk candidates in reverse so that higher priority overwrites.
        for path in candidate_paths().iter().rev() {
            if let Some(file_cfg) = load_file(path) {
                config = config.merge(&file_cfg);
            }
        }

        if let Some(cli_path) = cli_config_path {
            if let Some(file_cfg) = load_file(cli_path) {
                config = config.merge(&file_cfg);
            }
        }

        if let Some(overrides) = cli_overrides {
            config = config.merge(overrides);
        }

        config
    }

    // Convenience getters with built-in defaults.

    pub fn server_url(&self) -> &str {
        self.server.url.as_deref().unwrap_or(DEFAULT_SERVER_URL)
    }

    pub fn root_segment(&self) -> &str {
        self.server
            .root_segment
            .as_deref()
            .unwrap_or(DEFAULT_ROOT_SEGMENT)
    }

    pub fn timeout_secs(&self) -> u64 {
        self.server.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS)
    }

    /// Starting variant: "tree" or "columns".
    pub fn view(&self) -> &str {
        self.ui.view.as_deref().unwrap_or("tree")
    }

    pub fn use_icons(&self) -> bool {
        self.ui.use_icons.unwrap_or(true)
    }

    pub fn confirm_delete(&self) -> bool {
        self.ui.confirm_delete.unwrap_or(true)
    }

    /// Theme scheme: "dark", "light", or "custom".
    pub fn theme_scheme(&self) -> &str {
        self.theme.scheme.as_deref().unwrap_or("dark")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_values() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.server_url(), "http://localhost:8080");
        assert_eq!(cfg.root_segment(), "pdf-storage");
        assert_eq!(cfg.timeout_secs(), 5);
        assert_eq!(cfg.view(), "tree");
        assert!(cfg.use_icons());
        assert!(cfg.confirm_delete());
        assert_eq!(cfg.theme_scheme(), "dark");
    }

    #[test]
    fn toml_parsing_full() {
        let toml = r#"
[server]
url = "https://invoices.example.com"
root_segment = "archive"
timeout_secs = 10

[ui]
view = "columns"
use_icons = false
confirm_delete = false

[theme]
scheme = "light"
"#;
        let cfg: AppConfig = toml::from_str(toml).expect("parse failed");
        assert_eq!(cfg.server_url(), "https://invoices.example.com");
        assert_eq!(cfg.root_segment(), "archive");
        assert_eq!(cfg.timeout_secs(), 10);
        assert_eq!(cfg.view(), "columns");
        assert!(!cfg.use_icons());
        assert!(!cfg.confirm_delete());
        assert_eq!(cfg.theme_scheme(), "light");
    }

    #[test]
    fn toml_parsing_partial_falls_back_to_defaults() {
        let toml = r#"
[ui]
view = "columns"
"#;
        let cfg: AppConfig = toml::from_str(toml).expect("parse failed");
        assert_eq!(cfg.view(), "columns");
        assert_eq!(cfg.server_url(), "http://localhost:8080");
        assert!(cfg.confirm_delete());
    }

    #[test]
    fn toml_parsing_empty() {
        let cfg: AppConfig = toml::from_str("").expect("parse failed");
        assert_eq!(cfg.view(), "tree");
    }

    #[test]
    fn merge_overrides() {
        let base = AppConfig {
            server: ServerConfig {
                url: Some("http://a".into()),
                timeout_secs: Some(3),
                ..Default::default()
            },
            ..Default::default()
        };
        let over = AppConfig {
            server: ServerConfig {
                url: Some("http://b".into()),
                // timeout_secs not set — should keep base
                ..Default::default()
            },
            ..Default::default()
        };
        let merged = base.merge(&over);
        assert_eq!(merged.server_url(), "http://b");
        assert_eq!(merged.timeout_secs(), 3);
    }

    #[test]
    fn merge_none_does_not_clear_some() {
        let base = AppConfig {
            ui: UiConfig {
                use_icons: Some(false),
                confirm_delete: Some(false),
                ..Default::default()
            },
            ..Default::default()
        };
        let merged = base.merge(&AppConfig::default());
        assert!(!merged.use_icons());
        assert!(!merged.confirm_delete());
    }

    #[test]
    fn load_from_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let cfg_path = dir.path().join("config.toml");
        std::fs::write(
            &cfg_path,
            r#"
[server]
url = "http://10.0.0.2:9000"

[ui]
use_icons = false
"#,
        )
        .expect("write");

        let cfg = load_file(&cfg_path).expect("load");
        assert_eq!(cfg.server_url(), "http://10.0.0.2:9000");
        assert!(!cfg.use_icons());
        assert_eq!(cfg.root_segment(), "pdf-storage");
    }

    #[test]
    fn load_missing_file_returns_none() {
        assert!(load_file(Path::new("/nonexistent/config.toml")).is_none());
    }

    #[test]
    fn load_invalid_toml_returns_none() {
        let dir = tempfile::tempdir().expect("tempdir");
        let cfg_path = dir.path().join("bad.toml");
        std::fs::write(&cfg_path, "this is { not valid toml").expect("write");
        assert!(load_file(&cfg_path).is_none());
    }

    #[test]
    fn load_with_cli_overrides() {
        let dir = tempfile::tempdir().expect("tempdir");
        let cfg_path = dir.path().join("config.toml");
        std::fs::write(
            &cfg_path,
            r#"
[server]
url = "http://file-config:8080"

[ui]
view = "columns"
"#,
        )
        .expect("write");

        let cli_overrides = AppConfig {
            server: ServerConfig {
                url: Some("http://cli-wins:8080".into()),
                ..Default::default()
            },
            ..Default::default()
        };

        let cfg = AppConfig::load(Some(&cfg_path), Some(&cli_overrides));
        assert_eq!(cfg.server_url(), "http://cli-wins:8080");
        assert_eq!(cfg.view(), "columns");
    }

    #[test]
    fn theme_custom_colors() {
        let toml = r##"
[theme]
scheme = "custom"

[theme.custom]
selected_bg = "#0e7490"
folder_fg = "#7aa2f7"
"##;
        let cfg: AppConfig = toml::from_str(toml).expect("parse");
        assert_eq!(cfg.theme_scheme(), "custom");
        let custom = cfg.theme.custom.as_ref().expect("custom present");
        assert_eq!(custom.selected_bg.as_deref(), Some("#0e7490"));
        assert_eq!(custom.folder_fg.as_deref(), Some("#7aa2f7"));
        assert!(custom.url_fg.is_none());
    }
}
