//! Error types for the profiles crate.
//!
//! Profile lookups are closed sets; these errors surface from the strict
//! `FromStr` parsers. The lenient `resolve`/`lookup` helpers turn them into a
//! fallback plus a warning instead.

use thiserror::Error;

/// Errors related to profile name resolution.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProfileError {
    /// The machine name is not one of the known machine profiles.
    #[error("Unknown machine type: {0}")]
    UnknownMachine(String),

    /// The drawing profile name is not one of the known presets.
    #[error("Unknown drawing profile: {0}")]
    UnknownDrawingProfile(String),
}

/// Result type alias for profile resolution.
pub type ProfileResult<T> = Result<T, ProfileError>;
