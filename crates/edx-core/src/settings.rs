//! Global settings loaded from TOML.
//!
//! - `init_custom(toml_content)` sets a custom TOML before first `settings()` call
//! - `settings()` returns `&'static Settings` (lazy-init singleton)
//! - Default values are embedded via `include_str!("default_settings.toml")`

use std::sync::OnceLock;
use std::time::Duration;

use serde::Deserialize;

use crate::dict::DictionaryKind;

pub const DEFAULT_SETTINGS_TOML: &str = include_str!("default_settings.toml");

static CUSTOM_TOML: OnceLock<String> = OnceLock::new();

/// Set custom TOML before first `settings()` call.
pub fn init_custom(toml_content: String) -> Result<(), SettingsError> {
    parse_settings_toml(&toml_content)?;
    CUSTOM_TOML
        .set(toml_content)
        .map_err(|_| SettingsError::AlreadyInitialized)
}

/// Get or initialize the global settings singleton.
pub fn settings() -> &'static Settings {
    static INSTANCE: OnceLock<Settings> = OnceLock::new();
    INSTANCE.get_or_init(|| {
        let custom = CUSTOM_TOML
            .get()
            .and_then(|s| parse_settings_toml(s).ok());
        custom.unwrap_or_else(Settings::builtin)
    })
}

/// Returns the embedded default settings TOML content.
pub fn default_toml() -> &'static str {
    DEFAULT_SETTINGS_TOML
}

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("TOML parse error: {0}")]
    Parse(String),
    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: String, reason: String },
    #[error("settings already initialized")]
    AlreadyInitialized,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub files: FileSettings,
    pub index: IndexSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FileSettings {
    pub general_source: String,
    pub names_source: String,
    pub general_cache: String,
    pub names_cache: String,
}

impl FileSettings {
    pub fn source(&self, kind: DictionaryKind) -> &str {
        match kind {
            DictionaryKind::General => &self.general_source,
            DictionaryKind::Names => &self.names_source,
        }
    }

    pub fn cache(&self, kind: DictionaryKind) -> &str {
        match kind {
            DictionaryKind::General => &self.general_cache,
            DictionaryKind::Names => &self.names_cache,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct IndexSettings {
    pub ready_timeout_ms: u64,
}

impl IndexSettings {
    pub fn ready_timeout(&self) -> Duration {
        Duration::from_millis(self.ready_timeout_ms)
    }
}

impl Settings {
    /// Settings parsed from the embedded defaults. `build.rs` checks the file
    /// is valid TOML; the hardcoded fallback only covers a schema drift.
    fn builtin() -> Self {
        parse_settings_toml(DEFAULT_SETTINGS_TOML).unwrap_or_else(|_| Self {
            files: FileSettings {
                general_source: "edict2".to_string(),
                names_source: "enamdict".to_string(),
                general_cache: "edict2.edxc".to_string(),
                names_cache: "enamdict.edxc".to_string(),
            },
            index: IndexSettings {
                ready_timeout_ms: 10_000,
            },
        })
    }
}

pub fn parse_settings_toml(toml_str: &str) -> Result<Settings, SettingsError> {
    let s: Settings = toml::from_str(toml_str).map_err(|e| SettingsError::Parse(e.to_string()))?;
    validate(&s)?;
    Ok(s)
}

fn validate(s: &Settings) -> Result<(), SettingsError> {
    macro_rules! check_file_name {
        ($section:ident . $field:ident) => {
            let value = &s.$section.$field;
            if value.trim().is_empty() {
                return Err(SettingsError::InvalidValue {
                    field: concat!(stringify!($section), ".", stringify!($field)).to_string(),
                    reason: "must not be empty".to_string(),
                });
            }
            if value.contains('/') || value.contains('\\') {
                return Err(SettingsError::InvalidValue {
                    field: concat!(stringify!($section), ".", stringify!($field)).to_string(),
                    reason: "must be a file name, not a path".to_string(),
                });
            }
        };
    }

    check_file_name!(files.general_source);
    check_file_name!(files.names_source);
    check_file_name!(files.general_cache);
    check_file_name!(files.names_cache);

    if s.files.general_cache == s.files.names_cache {
        return Err(SettingsError::InvalidValue {
            field: "files.names_cache".to_string(),
            reason: "must differ from files.general_cache".to_string(),
        });
    }

    for (field, cache) in [
        ("files.general_cache", &s.files.general_cache),
        ("files.names_cache", &s.files.names_cache),
    ] {
        if *cache == s.files.general_source || *cache == s.files.names_source {
            return Err(SettingsError::InvalidValue {
                field: field.to_string(),
                reason: "must differ from the source file names".to_string(),
            });
        }
    }

    if s.index.ready_timeout_ms == 0 {
        return Err(SettingsError::InvalidValue {
            field: "index.ready_timeout_ms".to_string(),
            reason: "must be positive".to_string(),
        });
    }

    Ok(())
}
