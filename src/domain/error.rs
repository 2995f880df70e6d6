//! Domain error types.

/// Top-level error type for dipbot.
#[derive(Debug, thiserror::Error)]
pub enum DipbotError {
    #[error("config parse error in {file}: {reason}")]
    ConfigParse { file: String, reason: String },

    #[error("missing config key [{section}] {key}")]
    ConfigMissing { section: String, key: String },

    #[error("invalid config value [{section}] {key}: {reason}")]
    ConfigInvalid {
        section: String,
        key: String,
        reason: String,
    },

    #[error("data fetch error: {reason}")]
    DataFetch { reason: String },

    #[error("invalid timeframe {value:?}")]
    Timeframe { value: String },

    #[error("{sink} sink error: {reason}")]
    Sink { sink: String, reason: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<&DipbotError> for std::process::ExitCode {
    fn from(err: &DipbotError) -> Self {
        let code: u8 = match err {
            DipbotError::Io(_) => 1,
            DipbotError::ConfigParse { .. }
            | DipbotError::ConfigMissing { .. }
            | DipbotError::ConfigInvalid { .. } => 2,
            DipbotError::DataFetch { .. } | DipbotError::Timeframe { .. } => 3,
            DipbotError::Sink { .. } => 4,
        };
        std::process::ExitCode::from(code)
    }
}
