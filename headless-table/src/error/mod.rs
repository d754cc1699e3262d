//! Error types

mod options;

pub use options::*;

/// Umbrella error for the fallible surfaces of the crate.
///
/// The table pipeline itself never fails: unresolved ids are no-ops and
/// missing values render as empty. Only options parsing reports errors.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Options could not be parsed.
    #[error(transparent)]
    Options(#[from] OptionsError),
}

/// Result alias using the crate [`Error`].
pub type Result<T, E = Error> = std::result::Result<T, E>;
