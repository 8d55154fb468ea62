//! Bot configuration.
//!
//! Sources, later overriding earlier:
//! 1. Bundled defaults (`croupier.toml` shipped with the crate)
//! 2. `~/.config/croupier/croupier.toml`
//! 3. `./croupier.toml`
//! 4. An explicit file passed on the command line
//! 5. `CROUPIER_*` environment variables, `__` separating nested keys
//! 6. Programmatic overrides (command-line flags)

use config::{Config, Environment, File, FileFormat};
use croupier_core::{Alias, LogFormat};
use croupier_error::{ConfigError, CroupierError, CroupierResult};
use croupier_social::GroupMeConfig;
use croupier_storage::StorageConfig;
use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, instrument, warn};

const DEFAULT_CONFIG: &str = include_str!("../../../croupier.toml");

/// Which ledger implementation records past selections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, derive_more::Display)]
#[serde(rename_all = "lowercase")]
pub enum LedgerKind {
    /// PostgreSQL `posts` table
    #[default]
    #[display("postgres")]
    Postgres,
    /// Process-local map, lost on restart
    #[display("memory")]
    Memory,
}

/// Ledger database settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct DatabaseConfig {
    #[serde(default)]
    ledger: LedgerKind,
    #[serde(default)]
    url: Option<String>,
    #[serde(default = "default_pool_size")]
    pool_size: u32,
}

fn default_pool_size() -> u32 {
    4
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            ledger: LedgerKind::default(),
            url: None,
            pool_size: default_pool_size(),
        }
    }
}

/// HTTP callback server settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    host: String,
    #[serde(default = "default_port")]
    port: u16,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    5000
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

/// Complete bot configuration.
///
/// # Example
///
/// ```no_run
/// use croupier_bot::CroupierConfig;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let config = CroupierConfig::load(None, &[])?;
/// config.validate()?;
/// println!("keyword: {}", config.keyword());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Getters)]
pub struct CroupierConfig {
    #[serde(default = "default_keyword")]
    keyword: String,
    #[serde(default)]
    aliases: Vec<Alias>,
    #[serde(default = "default_wildcards")]
    wildcards: Vec<String>,
    #[serde(default)]
    folder_path: String,
    #[serde(default)]
    not_found_link: String,
    #[serde(default = "default_test_mode")]
    test_mode: bool,
    #[serde(default)]
    log_format: LogFormat,
    #[serde(default)]
    server: ServerConfig,
    #[serde(default)]
    storage: StorageConfig,
    #[serde(default)]
    groupme: GroupMeConfig,
    #[serde(default)]
    database: DatabaseConfig,
}

fn default_keyword() -> String {
    "post".to_string()
}

fn default_wildcards() -> Vec<String> {
    vec!["any".to_string(), "anybody".to_string(), "anyone".to_string()]
}

fn default_test_mode() -> bool {
    true
}

impl CroupierConfig {
    /// Load configuration from every source.
    ///
    /// `explicit` is an optional file layered above the discovered ones.
    /// `overrides` are dotted key/value pairs applied last.
    ///
    /// # Errors
    ///
    /// Returns error if a source cannot be read or the merged result does not
    /// deserialize.
    #[instrument(skip(overrides))]
    pub fn load(explicit: Option<&Path>, overrides: &[(&str, String)]) -> CroupierResult<Self> {
        Self::load_layers(explicit, overrides, environment())
    }

    /// Like [`load`](Self::load), but reads `CROUPIER_*` variables from
    /// `vars` instead of the process environment.
    ///
    /// # Errors
    ///
    /// Returns error if a source cannot be read or the merged result does not
    /// deserialize.
    #[instrument(skip(overrides, vars))]
    pub fn load_with_environment(
        explicit: Option<&Path>,
        overrides: &[(&str, String)],
        vars: impl IntoIterator<Item = (String, String)>,
    ) -> CroupierResult<Self> {
        let vars: config::Map<String, String> = vars.into_iter().collect();
        Self::load_layers(explicit, overrides, environment().source(Some(vars)))
    }

    fn load_layers(
        explicit: Option<&Path>,
        overrides: &[(&str, String)],
        environment: Environment,
    ) -> CroupierResult<Self> {
        debug!("Loading configuration");

        let mut builder =
            Config::builder().add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml));

        if let Some(home) = dirs::home_dir() {
            let home_config = home.join(".config/croupier/croupier.toml");
            builder = builder.add_source(File::from(home_config).required(false));
        }

        builder = builder.add_source(File::with_name("croupier").required(false));

        if let Some(path) = explicit {
            builder = builder.add_source(File::from(path));
        }

        builder = builder.add_source(environment);

        for (key, value) in overrides {
            builder = builder
                .set_override(*key, value.as_str())
                .map_err(|e| config_error("Invalid override", e))?;
        }

        builder
            .build()
            .map_err(|e| config_error("Failed to build configuration", e))?
            .try_deserialize()
            .map_err(|e| config_error("Failed to parse configuration", e))
    }

    /// Load configuration from a single TOML file, on top of the bundled
    /// defaults only.
    ///
    /// # Errors
    ///
    /// Returns error if the file cannot be read or parsed.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> CroupierResult<Self> {
        Config::builder()
            .add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml))
            .add_source(File::from(path.as_ref()))
            .build()
            .map_err(|e| config_error("Failed to read configuration", e))?
            .try_deserialize()
            .map_err(|e| config_error("Failed to parse configuration", e))
    }

    /// Check that the loaded values can drive the bot.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] naming the first invalid key.
    pub fn validate(&self) -> CroupierResult<()> {
        let keyword = self.keyword.trim();
        if keyword.is_empty() || keyword.split_whitespace().count() != 1 {
            return Err(ConfigError::new("keyword must be a single word").into());
        }
        if self.folder_path.trim().is_empty() {
            return Err(ConfigError::new("folder_path must not be empty").into());
        }
        if self.not_found_link.trim().is_empty() {
            return Err(ConfigError::new("not_found_link must not be empty").into());
        }
        if self.aliases.iter().any(|a| a.alias.is_empty()) {
            return Err(ConfigError::new("aliases must not contain an empty alias").into());
        }

        if self.test_mode {
            warn!("Test mode enabled, messages will not be sent");
        } else {
            if self.groupme.token.is_empty() {
                return Err(ConfigError::new("groupme.token is required").into());
            }
            if self.groupme.bot_id.is_empty() {
                return Err(ConfigError::new("groupme.bot_id is required").into());
            }
        }
        Ok(())
    }
}

/// `CROUPIER_KEYWORD` sets `keyword`; `CROUPIER_STORAGE__PROVIDER` sets
/// `storage.provider`.
fn environment() -> Environment {
    Environment::with_prefix("CROUPIER")
        .prefix_separator("_")
        .separator("__")
        .try_parsing(true)
}

fn config_error(context: &str, err: config::ConfigError) -> CroupierError {
    ConfigError::new(format!("{}: {}", context, err)).into()
}
