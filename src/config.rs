//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/grouptree/grouptree.toml`
//! 3. Local config: `<dir>/.grouptree.toml` (usually the working directory)
//! 4. Environment variables: `GROUPTREE_*` prefix, `__` between sections

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::application::ApplicationError;
use crate::util::path::expand_env_vars;

/// How trees are rendered on the terminal.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct DisplayConfig {
    /// Append `#id` to every line
    pub show_ids: bool,
    /// List attached types under their group
    pub show_types: bool,
    /// Ignore expand state and show every level
    pub expand_all: bool,
    /// Prefix of the selected line
    pub selected_marker: String,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            show_ids: true,
            show_types: true,
            expand_all: false,
            selected_marker: "*".into(),
        }
    }
}

/// Raw display config for intermediate parsing (`None` → not specified, inherit).
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawDisplayConfig {
    pub show_ids: Option<bool>,
    pub show_types: Option<bool>,
    pub expand_all: Option<bool>,
    pub selected_marker: Option<String>,
}

/// Raw settings for intermediate parsing.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawSettings {
    pub catalog: Option<PathBuf>,
    pub display: RawDisplayConfig,
}

impl DisplayConfig {
    /// Overlay wins field by field where specified.
    pub fn merge(&self, overlay: &RawDisplayConfig) -> Self {
        Self {
            show_ids: overlay.show_ids.unwrap_or(self.show_ids),
            show_types: overlay.show_types.unwrap_or(self.show_types),
            expand_all: overlay.expand_all.unwrap_or(self.expand_all),
            selected_marker: overlay
                .selected_marker
                .clone()
                .unwrap_or_else(|| self.selected_marker.clone()),
        }
    }
}

/// Unified configuration for grouptree.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(default)]
pub struct Settings {
    /// Default catalog file (TOML or JSON)
    pub catalog: Option<PathBuf>,
    /// Rendering options
    pub display: DisplayConfig,
}

/// Get the XDG config directory for grouptree.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "grouptree").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("grouptree.toml"))
}

/// Get the path to the local config file in a directory.
pub fn local_config_path(dir: &Path) -> PathBuf {
    dir.join(".grouptree.toml")
}

/// Load a TOML file into RawSettings for manual merging.
fn load_raw_settings(path: &Path) -> Result<RawSettings, ApplicationError> {
    let content = std::fs::read_to_string(path).map_err(|e| ApplicationError::Config {
        message: format!("read {}: {}", path.display(), e),
    })?;
    toml::from_str(&content).map_err(|e| ApplicationError::Config {
        message: format!("parse {}: {}", path.display(), e),
    })
}

impl Settings {
    /// Expand shell variables and tilde in the catalog path.
    fn expand_paths(&mut self) {
        if let Some(catalog) = &self.catalog {
            let expanded = expand_env_vars(catalog.to_string_lossy().as_ref());
            self.catalog = Some(PathBuf::from(expanded));
        }
    }

    /// Merge overlay config onto self: scalars win where the overlay specifies them.
    ///
    /// A relative catalog path in a config file is resolved against the
    /// directory holding that file.
    fn merge_with(&self, overlay: &RawSettings, config_dir: Option<&Path>) -> Self {
        let catalog = overlay.catalog.as_ref().map(|p| match config_dir {
            Some(dir) if p.is_relative() && !p.to_string_lossy().starts_with(['~', '$']) => {
                dir.join(p)
            }
            _ => p.clone(),
        });
        Self {
            catalog: catalog.or_else(|| self.catalog.clone()),
            display: self.display.merge(&overlay.display),
        }
    }

    /// Load settings with layered precedence.
    ///
    /// # Arguments
    /// * `local_dir` - Optional directory searched for `.grouptree.toml`
    pub fn load(local_dir: Option<&Path>) -> Result<Self, ApplicationError> {
        // 1. Start with defaults
        let mut current = Self::default();

        // 2. Global config
        if let Some(global_path) = global_config_path() {
            if global_path.exists() {
                let raw = load_raw_settings(&global_path)?;
                current = current.merge_with(&raw, global_path.parent());
            }
        }

        // 3. Local config
        if let Some(dir) = local_dir {
            let local_path = local_config_path(dir);
            if local_path.exists() {
                let raw = load_raw_settings(&local_path)?;
                current = current.merge_with(&raw, Some(dir));
            }
        }

        // 4. Environment variables (explicit override)
        current = Self::apply_env_overrides(current, None)?;

        current.expand_paths();

        Ok(current)
    }

    /// Apply GROUPTREE_* environment variables as explicit overrides.
    ///
    /// `vars` replaces the process environment when given (used by tests).
    pub fn apply_env_overrides(
        mut settings: Self,
        vars: Option<HashMap<String, String>>,
    ) -> Result<Self, ApplicationError> {
        let builder = Config::builder().add_source(
            Environment::with_prefix("GROUPTREE")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true)
                .source(vars),
        );

        let config = builder.build().map_err(config_err)?;

        if let Ok(val) = config.get_string("catalog") {
            settings.catalog = Some(PathBuf::from(val));
        }
        if let Ok(val) = config.get_bool("display.show_ids") {
            settings.display.show_ids = val;
        }
        if let Ok(val) = config.get_bool("display.show_types") {
            settings.display.show_types = val;
        }
        if let Ok(val) = config.get_bool("display.expand_all") {
            settings.display.expand_all = val;
        }
        if let Ok(val) = config.get_string("display.selected_marker") {
            settings.display.selected_marker = val;
        }

        Ok(settings)
    }

    /// Show the effective configuration as TOML.
    pub fn to_toml(&self) -> Result<String, ApplicationError> {
        toml::to_string_pretty(self).map_err(|e| ApplicationError::Config {
            message: format!("serialize config: {e}"),
        })
    }

    /// Generate a template config file.
    pub fn template() -> String {
        r#"# grouptree configuration
#
# Locations (by precedence, lowest to highest):
#   Global: ~/.config/grouptree/grouptree.toml
#   Local:  ./.grouptree.toml
#   Env:    GROUPTREE_* environment variables (e.g. GROUPTREE_DISPLAY__SHOW_IDS=false)

# Catalog file with [[groups]] and [[types]] (TOML, or JSON by extension)
# catalog = "~/catalogs/groups.toml"

[display]
# show_ids = true
# show_types = true
# expand_all = false
# selected_marker = "*"
"#
        .to_string()
    }
}

fn config_err(e: ConfigError) -> ApplicationError {
    ApplicationError::Config {
        message: e.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_no_overrides_when_defaults_then_collapsed_with_ids() {
        let settings = Settings::default();
        assert_eq!(settings.catalog, None);
        assert!(settings.display.show_ids);
        assert!(!settings.display.expand_all);
        assert_eq!(settings.display.selected_marker, "*");
    }

    #[test]
    fn given_partial_overlay_when_merging_display_then_unspecified_fields_inherit() {
        let base = DisplayConfig::default();
        let overlay = RawDisplayConfig {
            expand_all: Some(true),
            ..RawDisplayConfig::default()
        };

        let result = base.merge(&overlay);

        assert!(result.expand_all);
        assert!(result.show_ids);
        assert!(result.show_types);
    }

    #[test]
    fn given_env_map_when_applying_overrides_then_values_replace() {
        let vars = HashMap::from([
            ("GROUPTREE_CATALOG".to_string(), "/tmp/catalog.json".to_string()),
            ("GROUPTREE_DISPLAY__SHOW_IDS".to_string(), "false".to_string()),
            ("GROUPTREE_DISPLAY__SELECTED_MARKER".to_string(), ">".to_string()),
        ]);

        let settings = Settings::apply_env_overrides(Settings::default(), Some(vars)).unwrap();

        assert_eq!(settings.catalog, Some(PathBuf::from("/tmp/catalog.json")));
        assert!(!settings.display.show_ids);
        assert_eq!(settings.display.selected_marker, ">");
        assert!(settings.display.show_types);
    }

    #[test]
    fn given_tilde_in_catalog_when_expand_paths_then_expands_to_home() {
        let mut settings = Settings {
            catalog: Some(PathBuf::from("~/catalog.toml")),
            ..Settings::default()
        };

        settings.expand_paths();

        let home = std::env::var("HOME").expect("HOME should be set");
        let catalog = settings.catalog.unwrap();
        assert!(
            catalog.to_string_lossy().starts_with(&home),
            "catalog should start with home dir: {}",
            catalog.display()
        );
    }

    #[test]
    fn given_settings_when_to_toml_then_round_trips_display() {
        let toml = Settings::default().to_toml().unwrap();
        assert!(toml.contains("[display]"));
        assert!(toml.contains("show_ids = true"));
    }
}
