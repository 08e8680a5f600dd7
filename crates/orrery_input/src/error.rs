//! Input error types.

use orrery_core::Fault;
use thiserror::Error;

/// Errors raised while setting up gesture interpretation.
///
/// Frame processing itself never fails; these only come out of
/// configuration and construction.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum InputError {
    #[error("invalid config value for `{field}`: {reason}")]
    InvalidConfig { field: &'static str, reason: String },

    #[error("unknown preset `{0}` (expected `classic` or `orbit-follow`)")]
    UnknownPreset(String),

    #[error("navigator setup failed: {0}")]
    Navigation(#[from] Fault),
}

impl InputError {
    pub(crate) fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        InputError::InvalidConfig {
            field,
            reason: reason.into(),
        }
    }
}
