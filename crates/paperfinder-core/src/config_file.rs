use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::query::{DEFAULT_BASE_URL, QueryOptions};
use crate::render::{DEFAULT_ALT_LOOKUP_BASE, LinkOptions};
use crate::store::JsonFileStore;

/// On-disk TOML configuration structure.
/// All fields are optional so partial configs work (merge with defaults).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConfigFile {
    pub api: Option<ApiConfig>,
    pub storage: Option<StorageConfig>,
    pub export: Option<ExportConfig>,
    pub links: Option<LinksConfig>,
    pub display: Option<DisplayConfig>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ApiConfig {
    pub base_url: Option<String>,
    pub mailto: Option<String>,
    pub request_links: Option<bool>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StorageConfig {
    pub state_path: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExportConfig {
    pub download_dir: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LinksConfig {
    pub alt_lookup_base: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DisplayConfig {
    pub theme: Option<String>,
}

/// Platform config directory path: `<config_dir>/paperfinder/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("paperfinder").join("config.toml"))
}

/// Load config by cascading CWD `.paperfinder.toml` over platform config.
/// CWD values override platform values.
pub fn load_config() -> ConfigFile {
    let platform = config_path().and_then(|p| load_from_path(&p));
    let cwd = load_from_path(Path::new(".paperfinder.toml"));

    match (platform, cwd) {
        (None, None) => ConfigFile::default(),
        (Some(p), None) => p,
        (None, Some(c)) => c,
        (Some(p), Some(c)) => merge(p, c),
    }
}

/// Load a config from a specific path. Returns `None` if the file doesn't
/// exist or can't be parsed.
pub fn load_from_path(path: &Path) -> Option<ConfigFile> {
    let content = std::fs::read_to_string(path).ok()?;
    match toml::from_str(&content) {
        Ok(config) => Some(config),
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "ignoring unparseable config");
            None
        }
    }
}

/// Merge two configs: `overlay` values take precedence over `base`.
pub fn merge(base: ConfigFile, overlay: ConfigFile) -> ConfigFile {
    ConfigFile {
        api: Some(ApiConfig {
            base_url: overlay
                .api
                .as_ref()
                .and_then(|a| a.base_url.clone())
                .or_else(|| base.api.as_ref().and_then(|a| a.base_url.clone())),
            mailto: overlay
                .api
                .as_ref()
                .and_then(|a| a.mailto.clone())
                .or_else(|| base.api.as_ref().and_then(|a| a.mailto.clone())),
            request_links: overlay
                .api
                .as_ref()
                .and_then(|a| a.request_links)
                .or_else(|| base.api.as_ref().and_then(|a| a.request_links)),
        }),
        storage: Some(StorageConfig {
            state_path: overlay
                .storage
                .as_ref()
                .and_then(|s| s.state_path.clone())
                .or_else(|| base.storage.as_ref().and_then(|s| s.state_path.clone())),
        }),
        export: Some(ExportConfig {
            download_dir: overlay
                .export
                .as_ref()
                .and_then(|e| e.download_dir.clone())
                .or_else(|| base.export.as_ref().and_then(|e| e.download_dir.clone())),
        }),
        links: Some(LinksConfig {
            alt_lookup_base: overlay
                .links
                .as_ref()
                .and_then(|l| l.alt_lookup_base.clone())
                .or_else(|| {
                    base.links
                        .as_ref()
                        .and_then(|l| l.alt_lookup_base.clone())
                }),
        }),
        display: Some(DisplayConfig {
            theme: overlay
                .display
                .as_ref()
                .and_then(|d| d.theme.clone())
                .or_else(|| base.display.as_ref().and_then(|d| d.theme.clone())),
        }),
    }
}

/// Save the current config to the platform config directory.
pub fn save_config(config: &ConfigFile) -> Result<PathBuf, String> {
    let path = config_path().ok_or_else(|| "Could not determine config directory".to_string())?;
    save_to_path(config, &path)?;
    Ok(path)
}

pub fn save_to_path(config: &ConfigFile, path: &Path) -> Result<(), String> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .map_err(|e| format!("Failed to create config directory: {}", e))?;
    }
    let content =
        toml::to_string_pretty(config).map_err(|e| format!("Failed to serialize config: {}", e))?;
    std::fs::write(path, content).map_err(|e| format!("Failed to write config: {}", e))
}

/// Fully resolved runtime settings.
#[derive(Debug, Clone)]
pub struct Settings {
    pub query: QueryOptions,
    pub links: LinkOptions,
    pub state_path: PathBuf,
    pub download_dir: PathBuf,
    pub theme: String,
}

/// Values that override the config file (CLI flags, then environment).
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub mailto: Option<String>,
    pub state_path: Option<PathBuf>,
    pub download_dir: Option<PathBuf>,
    pub theme: Option<String>,
}

impl Overrides {
    /// Fill unset fields from `CROSSREF_MAILTO`, `PAPERFINDER_STATE` and
    /// `PAPERFINDER_DOWNLOAD_DIR`.
    pub fn with_env(mut self) -> Self {
        self.mailto = self
            .mailto
            .or_else(|| std::env::var("CROSSREF_MAILTO").ok());
        self.state_path = self
            .state_path
            .or_else(|| std::env::var("PAPERFINDER_STATE").ok().map(PathBuf::from));
        self.download_dir = self.download_dir.or_else(|| {
            std::env::var("PAPERFINDER_DOWNLOAD_DIR")
                .ok()
                .map(PathBuf::from)
        });
        self
    }
}

impl Settings {
    /// Overrides > config file > defaults.
    pub fn resolve(config: &ConfigFile, overrides: Overrides) -> Self {
        let api = config.api.clone().unwrap_or_default();
        let query = QueryOptions {
            base_url: api.base_url.unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            request_links: api.request_links.unwrap_or(true),
            mailto: overrides.mailto.or(api.mailto).filter(|m| !m.is_empty()),
        };

        let links = LinkOptions {
            alt_lookup_base: config
                .links
                .as_ref()
                .and_then(|l| l.alt_lookup_base.clone())
                .unwrap_or_else(|| DEFAULT_ALT_LOOKUP_BASE.to_string()),
        };

        let state_path = overrides
            .state_path
            .or_else(|| {
                config
                    .storage
                    .as_ref()
                    .and_then(|s| s.state_path.clone())
                    .map(PathBuf::from)
            })
            .or_else(JsonFileStore::default_path)
            .unwrap_or_else(|| PathBuf::from(".paperfinder-storage.json"));

        let download_dir = overrides
            .download_dir
            .or_else(|| {
                config
                    .export
                    .as_ref()
                    .and_then(|e| e.download_dir.clone())
                    .map(PathBuf::from)
            })
            .or_else(dirs::download_dir)
            .unwrap_or_else(|| PathBuf::from("."));

        let theme = overrides
            .theme
            .or_else(|| config.display.as_ref().and_then(|d| d.theme.clone()))
            .unwrap_or_else(|| "hacker".to_string());

        Self {
            query,
            links,
            state_path,
            download_dir,
            theme,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_toml_parses() {
        let toml_str = "[api]\nmailto = \"me@example.org\"\n";
        let parsed: ConfigFile = toml::from_str(toml_str).unwrap();
        assert_eq!(parsed.api.unwrap().mailto.unwrap(), "me@example.org");
        assert!(parsed.storage.is_none());
    }

    #[test]
    fn merge_overlay_wins() {
        let base = ConfigFile {
            api: Some(ApiConfig {
                mailto: Some("base@example.org".to_string()),
                request_links: Some(false),
                ..Default::default()
            }),
            ..Default::default()
        };
        let overlay = ConfigFile {
            api: Some(ApiConfig {
                mailto: Some("cwd@example.org".to_string()),
                ..Default::default()
            }),
            ..Default::default()
        };
        let merged = merge(base, overlay);
        let api = merged.api.unwrap();
        assert_eq!(api.mailto.unwrap(), "cwd@example.org");
        assert_eq!(api.request_links, Some(false));
    }

    #[test]
    fn merge_base_preserved_when_overlay_absent() {
        let base = ConfigFile {
            export: Some(ExportConfig {
                download_dir: Some("/base/downloads".to_string()),
            }),
            ..Default::default()
        };
        let merged = merge(base, ConfigFile::default());
        assert_eq!(merged.export.unwrap().download_dir.unwrap(), "/base/downloads");
    }

    #[test]
    fn resolve_defaults() {
        let settings = Settings::resolve(&ConfigFile::default(), Overrides::default());
        assert_eq!(settings.query.base_url, DEFAULT_BASE_URL);
        assert!(settings.query.request_links);
        assert!(settings.query.mailto.is_none());
        assert_eq!(settings.links.alt_lookup_base, DEFAULT_ALT_LOOKUP_BASE);
        assert_eq!(settings.theme, "hacker");
    }

    #[test]
    fn resolve_overrides_beat_config() {
        let config = ConfigFile {
            api: Some(ApiConfig {
                mailto: Some("file@example.org".into()),
                ..Default::default()
            }),
            storage: Some(StorageConfig {
                state_path: Some("/from/config.json".into()),
            }),
            ..Default::default()
        };
        let settings = Settings::resolve(
            &config,
            Overrides {
                mailto: Some("flag@example.org".into()),
                ..Default::default()
            },
        );
        assert_eq!(settings.query.mailto.as_deref(), Some("flag@example.org"));
        assert_eq!(settings.state_path, PathBuf::from("/from/config.json"));
    }

    #[test]
    fn save_and_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let config = ConfigFile {
            display: Some(DisplayConfig {
                theme: Some("modern".into()),
            }),
            ..Default::default()
        };
        save_to_path(&config, &path).unwrap();
        let loaded = load_from_path(&path).unwrap();
        assert_eq!(loaded.display.unwrap().theme.unwrap(), "modern");
    }
}
