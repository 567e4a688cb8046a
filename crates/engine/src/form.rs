//! Form-fill info and environment.
//!
//! The info structure describes the host's form callbacks; this engine has no
//! interactive callbacks, so the info only carries its version. An environment
//! is created from a document plus an info and must be exited before either of
//! them goes away. The boundary layer enforces that ordering.

use crate::error::EngineError;

/// Host-side form-fill description.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormFillInfo {
    /// Structure version; the engine understands 1 and 2.
    pub version: i32,
    /// Whether a JavaScript platform is attached. Always `false` here.
    pub js_platform: bool,
}

impl Default for FormFillInfo {
    fn default() -> Self {
        Self {
            version: 1,
            js_platform: false,
        }
    }
}

impl FormFillInfo {
    pub(crate) fn check_version(&self) -> Result<(), EngineError> {
        match self.version {
            1 | 2 => Ok(()),
            other => Err(EngineError::UnsupportedFormVersion(other)),
        }
    }
}

/// A live form-fill environment for one document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormFillEnvironment {
    pub(crate) info_version: i32,
    pub(crate) has_acroform: bool,
    pub(crate) field_count: usize,
    pub(crate) need_appearances: bool,
}

impl FormFillEnvironment {
    pub fn info_version(&self) -> i32 {
        self.info_version
    }

    /// Whether the document has an interactive form dictionary.
    pub fn has_acroform(&self) -> bool {
        self.has_acroform
    }

    /// Number of top-level form fields.
    pub fn field_count(&self) -> usize {
        self.field_count
    }

    /// The form's `NeedAppearances` flag.
    pub fn need_appearances(&self) -> bool {
        self.need_appearances
    }

    /// Tears the environment down.
    pub fn exit(self) {
        log::debug!(
            "form-fill environment exited ({} fields, acroform: {})",
            self.field_count,
            self.has_acroform
        );
    }
}
