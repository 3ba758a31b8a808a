use thiserror::Error;
use tracing::{error, warn};

use crate::layout::LayoutError;

/// Errors raised while turning a repository into a bonsai
#[derive(Error, Debug)]
pub enum BonsaiError {
    #[error("Repository error: {message}")]
    Repository { message: String },

    #[error("Repository has no commits reachable from {reference}")]
    EmptyHistory { reference: String },

    #[error("Configuration error: {setting} - {reason}")]
    Configuration { setting: String, reason: String },

    #[error("Layout failed: {0}")]
    Layout(#[from] LayoutError),

    #[error("Git internal error: {0}")]
    Git2(#[from] git2::Error),
}

impl BonsaiError {
    /// Create a repository error
    pub fn repository(message: impl Into<String>) -> Self {
        let message = message.into();
        error!("Repository error: {}", message);
        BonsaiError::Repository { message }
    }

    /// Create an empty history error
    pub fn empty_history(reference: impl Into<String>) -> Self {
        let reference = reference.into();
        warn!("No commits reachable from '{}'", reference);
        BonsaiError::EmptyHistory { reference }
    }

    /// Create a configuration error
    pub fn configuration(setting: impl Into<String>, reason: impl Into<String>) -> Self {
        let setting = setting.into();
        let reason = reason.into();
        warn!("Invalid setting '{}': {}", setting, reason);
        BonsaiError::Configuration { setting, reason }
    }
}
