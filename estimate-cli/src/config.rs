//! Settings file for the `estimate` command.
//!
//! ```toml
//! [store]
//! backend = "sqlite"
//! connection_string = "estimate.db"
//!
//! [logging]
//! level = "debug"
//! file = "estimate.log"
//!
//! [display]
//! locale = "ru"
//!
//! [user]
//! id = "estimator"
//! ```
//!
//! Every section and key is optional.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use estimate_core::NumberLocale;
use estimate_core::store::StoreConfig;
use serde::Deserialize;

/// Environment variable naming the settings file.
pub const CONFIG_ENV: &str = "ESTIMATE_CONFIG";

/// Settings file picked up from the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "estimate.toml";

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    pub store: StoreSection,
    pub logging: LoggingSection,
    pub display: DisplaySection,
    pub user: UserSection,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StoreSection {
    pub backend: String,
    pub connection_string: String,
}

impl Default for StoreSection {
    fn default() -> Self {
        Self {
            backend: "sqlite".to_string(),
            connection_string: "estimate.db".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggingSection {
    /// Level or `EnvFilter` directive; `RUST_LOG` takes precedence.
    pub level: Option<String>,
    /// Log file, appended to alongside stderr output.
    pub file: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DisplaySection {
    pub locale: String,
}

impl Default for DisplaySection {
    fn default() -> Self {
        Self {
            locale: "ru".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct UserSection {
    /// Scope of the stored coefficient profile.
    pub id: Option<String>,
}

/// Values given on the command line; each one replaces its file setting.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub backend: Option<String>,
    pub connection_string: Option<String>,
    pub user: Option<String>,
    pub log_level: Option<String>,
}

impl AppConfig {
    pub fn from_toml_str(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config: {}", path.display()))?;
        Self::from_toml_str(&text)
            .with_context(|| format!("Failed to parse config: {}", path.display()))
    }

    /// Loads the settings file chosen by [`resolve_config_path`], or the
    /// defaults when there is none.
    pub fn load(explicit: Option<&Path>) -> Result<(Self, Option<PathBuf>)> {
        let env = std::env::var_os(CONFIG_ENV).map(PathBuf::from);
        match resolve_config_path(explicit, env, Path::new(".")) {
            Some(path) => Ok((Self::from_file(&path)?, Some(path))),
            None => Ok((Self::default(), None)),
        }
    }

    pub fn apply(
        &mut self,
        overrides: Overrides,
    ) {
        if let Some(backend) = overrides.backend {
            self.store.backend = backend;
        }
        if let Some(connection_string) = overrides.connection_string {
            self.store.connection_string = connection_string;
        }
        if let Some(user) = overrides.user {
            self.user.id = Some(user);
        }
        if let Some(level) = overrides.log_level {
            self.logging.level = Some(level);
        }
    }

    pub fn store_config(&self) -> StoreConfig {
        StoreConfig {
            backend: self.store.backend.trim().to_ascii_lowercase(),
            connection_string: self.store.connection_string.clone(),
        }
    }

    pub fn locale(&self) -> Result<NumberLocale> {
        NumberLocale::from_tag(&self.display.locale)
            .with_context(|| format!("unsupported display locale '{}'", self.display.locale))
    }

    pub fn user_scope(&self) -> Option<&str> {
        self.user.id.as_deref()
    }
}

/// Picks the settings file: the explicit path, then the environment
/// variable, then `estimate.toml` in `dir` if it exists.
pub fn resolve_config_path(
    explicit: Option<&Path>,
    env: Option<PathBuf>,
    dir: &Path,
) -> Option<PathBuf> {
    if let Some(path) = explicit {
        return Some(path.to_path_buf());
    }
    if let Some(path) = env.filter(|p| !p.as_os_str().is_empty()) {
        return Some(path);
    }
    let local = dir.join(DEFAULT_CONFIG_FILE);
    local.is_file().then_some(local)
}
