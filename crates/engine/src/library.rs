//! Process-wide library initialisation.
//!
//! The engine keeps global state, so it must be initialised exactly once per
//! process before any document is touched. The first configuration wins.

use crate::error::EngineError;
use once_cell::sync::OnceCell;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

static LIBRARY: OnceCell<LibraryConfig> = OnceCell::new();

/// Engine library configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LibraryConfig {
    /// Configuration structure version understood by the engine (2 or 3).
    pub version: u32,
    /// Extra directories searched for non-embedded fonts.
    pub user_font_paths: Vec<PathBuf>,
}

impl Default for LibraryConfig {
    fn default() -> Self {
        Self {
            version: 3,
            user_font_paths: Vec::new(),
        }
    }
}

impl LibraryConfig {
    pub fn validate(&self) -> Result<(), EngineError> {
        if !(2..=3).contains(&self.version) {
            return Err(EngineError::Config(format!(
                "library config version must be 2 or 3, got {}",
                self.version
            )));
        }
        Ok(())
    }
}

/// Initialises the library with `config`.
///
/// # Errors
///
/// Returns [`EngineError::Config`] for an invalid configuration and
/// [`EngineError::AlreadyInitialized`] if the library was set up before; the
/// earlier configuration stays in effect.
pub fn init_library(config: LibraryConfig) -> Result<&'static LibraryConfig, EngineError> {
    config.validate()?;
    let mut fresh = false;
    let stored = LIBRARY.get_or_init(|| {
        fresh = true;
        config
    });
    if !fresh {
        log::warn!("library initialisation requested twice; keeping the first configuration");
        return Err(EngineError::AlreadyInitialized);
    }
    log::info!(
        "library initialised (config version {}, {} user font paths)",
        stored.version,
        stored.user_font_paths.len()
    );
    Ok(stored)
}

/// The active configuration, if the library has been initialised.
pub fn library_config() -> Result<&'static LibraryConfig, EngineError> {
    LIBRARY.get().ok_or(EngineError::NotInitialized)
}

pub fn is_initialized() -> bool {
    LIBRARY.get().is_some()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_version_three() {
        let config = LibraryConfig::default();
        assert_eq!(config.version, 3);
        assert!(config.user_font_paths.is_empty());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn rejects_unknown_versions() {
        let config = LibraryConfig {
            version: 7,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(EngineError::Config(_))));
        assert!(matches!(init_library(config), Err(EngineError::Config(_))));
    }

    #[test]
    fn second_init_keeps_first_config() {
        let _ = init_library(LibraryConfig::default());
        assert!(is_initialized());
        let again = LibraryConfig {
            version: 2,
            ..Default::default()
        };
        assert!(matches!(init_library(again), Err(EngineError::AlreadyInitialized)));
        assert_eq!(library_config().unwrap().version, 3);
    }

    #[test]
    fn config_deserializes_with_defaults() {
        let json = r#"{"user_font_paths": ["/usr/share/fonts"]}"#;
        let config: LibraryConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.version, 3);
        assert_eq!(
            config.user_font_paths,
            vec![PathBuf::from("/usr/share/fonts")]
        );
    }
}
