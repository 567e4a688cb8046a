use crate::error::CoreError;
use pdfext_appearance::AppearanceLimits;
use pdfext_engine::LibraryConfig;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Configuration of the extension layer.
///
/// Engine settings sit at the top level; appearance capacities live under
/// `appearance`:
///
/// ```json
/// { "version": 3, "user_font_paths": [], "appearance": { "appearance_capacity": 512 } }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtensionConfig {
    #[serde(flatten)]
    pub library: LibraryConfig,
    pub appearance: AppearanceLimits,
}

impl ExtensionConfig {
    pub fn from_json_str(json: &str) -> Result<Self, CoreError> {
        let config: ExtensionConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, CoreError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    pub fn validate(&self) -> Result<(), CoreError> {
        self.library.validate()?;
        // Room for at least one character plus the terminator.
        if self.appearance.font_name_capacity < 2 || self.appearance.appearance_capacity < 2 {
            return Err(CoreError::Config(format!(
                "appearance capacities must be at least 2, got {:?}",
                self.appearance
            )));
        }
        Ok(())
    }
}
