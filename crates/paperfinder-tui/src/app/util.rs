use std::path::PathBuf;

use paperfinder_core::config_file::{self, ConfigFile, DisplayConfig};

/// Persist the theme choice into the platform config, keeping every other
/// setting already there.
pub(super) fn save_theme(theme: &str) -> Result<PathBuf, String> {
    let path = config_file::config_path()
        .ok_or_else(|| "Could not determine config directory".to_string())?;
    let mut config = config_file::load_from_path(&path).unwrap_or_default();
    set_theme(&mut config, theme);
    config_file::save_to_path(&config, &path)?;
    tracing::info!(path = %path.display(), theme, "saved theme");
    Ok(path)
}

fn set_theme(config: &mut ConfigFile, theme: &str) {
    config
        .display
        .get_or_insert_with(DisplayConfig::default)
        .theme = Some(theme.to_string());
}

#[cfg(test)]
mod tests {
    use super::*;
    use paperfinder_core::config_file::ApiConfig;

    #[test]
    fn set_theme_keeps_other_sections() {
        let mut config = ConfigFile {
            api: Some(ApiConfig {
                mailto: Some("me@example.org".into()),
                ..Default::default()
            }),
            ..Default::default()
        };
        set_theme(&mut config, "modern");
        assert_eq!(config.display.unwrap().theme.as_deref(), Some("modern"));
        assert_eq!(config.api.unwrap().mailto.as_deref(), Some("me@example.org"));
    }
}
