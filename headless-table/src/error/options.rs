//! Options parsing errors

/// Errors raised while reading an options patch.
#[derive(Debug, thiserror::Error)]
pub enum OptionsError {
    /// The patch is not valid JSON or does not match the options schema.
    #[error("Options parse error: {0}")]
    Parse(#[from] serde_json::Error),
}
