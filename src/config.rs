//! Dashboard configuration: grid defaults, the signed-in user and the sidebar.
//!
//! A default configuration is compiled into the binary. A file given with
//! `--config` replaces it; sections left out of the file fall back to the
//! built-in sidebar.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::{debug, info};

use crate::grid::DEFAULT_PAGE_SIZE;
use crate::nav::NavSection;

const BUILTIN: &str = include_str!("../config/default.toml");

#[derive(Debug)]
pub enum ConfigError {
    Io { path: PathBuf, source: std::io::Error },
    Parse { path: PathBuf, source: toml::de::Error },
    Invalid(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io { path, source } => {
                write!(f, "cannot read config '{}': {}", path.display(), source)
            }
            ConfigError::Parse { path, source } => {
                write!(f, "cannot parse config '{}': {}", path.display(), source)
            }
            ConfigError::Invalid(msg) => write!(f, "invalid config: {}", msg),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io { source, .. } => Some(source),
            ConfigError::Parse { source, .. } => Some(source),
            ConfigError::Invalid(_) => None,
        }
    }
}

fn default_page_size() -> usize {
    DEFAULT_PAGE_SIZE
}

#[derive(Debug, Clone, Deserialize)]
pub struct GridConfig {
    #[serde(default = "default_page_size")]
    pub page_size: usize,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

/// Profile shown in the header user menu.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UserProfile {
    pub name: String,
    pub email: String,
    pub workspace: String,
    pub workspace_url: String,
    pub role: String,
}

impl Default for UserProfile {
    fn default() -> Self {
        Self {
            name: "user".to_string(),
            email: String::new(),
            workspace: "My Workspace".to_string(),
            workspace_url: "myworkspace.slack.com".to_string(),
            role: "Admin".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub grid: GridConfig,
    #[serde(default)]
    pub user: UserProfile,
    #[serde(default)]
    pub sections: Vec<NavSection>,
}

impl Config {
    /// Built-in configuration.
    pub fn builtin() -> Result<Self, ConfigError> {
        Self::parse(BUILTIN, Path::new("<builtin>"))
    }

    /// Loads `path`, or the built-in configuration when `None`.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let Some(path) = path else {
            return Self::builtin();
        };
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let mut config = Self::parse(&content, path)?;
        if config.sections.is_empty() {
            info!("config '{}' has no sidebar sections, using built-in", path.display());
            config.sections = Self::builtin()?.sections;
        }
        Ok(config)
    }

    fn parse(content: &str, path: &Path) -> Result<Self, ConfigError> {
        let mut config: Config = toml::from_str(content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        debug!(
            path = %path.display(),
            sections = config.sections.len(),
            page_size = config.grid.page_size,
            "config loaded"
        );
        Ok(config)
    }

    fn validate(&mut self) -> Result<(), ConfigError> {
        if self.grid.page_size == 0 {
            return Err(ConfigError::Invalid("grid.page_size must be at least 1".to_string()));
        }
        for section in &mut self.sections {
            section.normalize().map_err(ConfigError::Invalid)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nav::{NavItem, NavVariant};
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_config(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn builtin_config_parses() {
        let config = Config::load(None).unwrap();
        assert_eq!(config.grid.page_size, 10);
        assert_eq!(config.user.role, "Admin");
        assert_eq!(config.sections.len(), 2);
        assert_eq!(config.sections[0].variant, NavVariant::Menu);
        assert_eq!(config.sections[1].variant, NavVariant::Collapsible);
        assert!(matches!(
            &config.sections[1].items[1],
            NavItem::Group(g) if g.default_open && g.items[0].title == "Categories"
        ));
    }

    #[test]
    fn file_without_sections_keeps_builtin_sidebar() {
        let file = write_config(
            r#"
            [grid]
            page_size = 25

            [user]
            name = "alice"
            "#,
        );
        let config = Config::load(Some(file.path())).unwrap();
        assert_eq!(config.grid.page_size, 25);
        assert_eq!(config.user.name, "alice");
        assert_eq!(config.user.workspace, "My Workspace");
        assert_eq!(config.sections.len(), 2);
    }

    #[test]
    fn zero_page_size_is_invalid() {
        let file = write_config("[grid]\npage_size = 0\n");
        let err = Config::load(Some(file.path())).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn variant_mismatch_is_invalid() {
        let file = write_config(
            r#"
            [[sections]]
            label = "Menus"
            variant = "menu"

            [[sections.items]]
            kind = "group"
            title = "Post"
            items = [{ title = "List Post", url = "/dashboard/posts" }]
            "#,
        );
        let err = Config::load(Some(file.path())).unwrap_err();
        assert!(err.to_string().contains("menu variant cannot hold group 'Post'"));
    }

    #[test]
    fn unknown_item_kind_is_a_parse_error() {
        let file = write_config(
            r#"
            [[sections]]
            [[sections.items]]
            kind = "banner"
            name = "x"
            url = "/x"
            "#,
        );
        assert!(matches!(
            Config::load(Some(file.path())),
            Err(ConfigError::Parse { .. })
        ));
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.toml");
        let err = Config::load(Some(&path)).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
        assert!(err.to_string().contains("absent.toml"));
    }
}
