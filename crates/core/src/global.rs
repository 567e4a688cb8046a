//! The process-wide extension instance used by host entry points.
//!
//! [`initialize`] must run once before anything else; every other call fails
//! with [`CoreError::NotInitialized`] until it has. Each call through
//! [`with_extension`] records its outcome as the last error code.

use crate::config::ExtensionConfig;
use crate::error::{CoreError, ErrorCode};
use crate::extension::Extension;
use once_cell::sync::OnceCell;
use std::sync::Mutex;
use std::sync::atomic::{AtomicI32, Ordering};

static EXTENSION: OnceCell<Mutex<Extension>> = OnceCell::new();
static LAST_ERROR: AtomicI32 = AtomicI32::new(ErrorCode::Success as i32);

/// Initialises the engine library and the process-wide extension state.
///
/// # Errors
///
/// Fails on an invalid configuration, and with an engine
/// `AlreadyInitialized` error when called a second time.
pub fn initialize(config: ExtensionConfig) -> Result<(), CoreError> {
    let result = try_initialize(config);
    record(&result);
    result
}

fn try_initialize(config: ExtensionConfig) -> Result<(), CoreError> {
    config.validate()?;
    pdfext_engine::init_library(config.library.clone())?;
    EXTENSION
        .set(Mutex::new(Extension::new(&config)))
        .map_err(|_| CoreError::Engine(pdfext_engine::EngineError::AlreadyInitialized))
}

pub fn is_initialized() -> bool {
    EXTENSION.get().is_some()
}

/// Runs `f` against the process-wide extension.
pub fn with_extension<T>(
    f: impl FnOnce(&mut Extension) -> Result<T, CoreError>,
) -> Result<T, CoreError> {
    let result = EXTENSION
        .get()
        .ok_or(CoreError::NotInitialized)
        .and_then(|state| state.lock().map_err(|_| CoreError::StatePoisoned))
        .and_then(|mut extension| f(&mut *extension));
    record(&result);
    result
}

/// Code of the most recent call's outcome.
pub fn last_error() -> ErrorCode {
    match LAST_ERROR.load(Ordering::Relaxed) {
        0 => ErrorCode::Success,
        1 => ErrorCode::NotInitialized,
        2 => ErrorCode::InvalidHandle,
        3 => ErrorCode::MissingArgument,
        4 => ErrorCode::InvalidArgument,
        5 => ErrorCode::CapacityExceeded,
        6 => ErrorCode::OutOfBounds,
        7 => ErrorCode::ResourceInUse,
        8 => ErrorCode::FontNameUnavailable,
        9 => ErrorCode::Engine,
        10 => ErrorCode::Config,
        _ => ErrorCode::Internal,
    }
}

fn record<T>(result: &Result<T, CoreError>) {
    let code = match result {
        Ok(_) => ErrorCode::Success,
        Err(err) => {
            log::warn!("extension call failed: {err}");
            ErrorCode::from(err)
        }
    };
    LAST_ERROR.store(code.as_i32(), Ordering::Relaxed);
}
