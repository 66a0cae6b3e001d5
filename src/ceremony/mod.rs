//! Ceremony options
//!
//! This module provides the ceremony description types and the transcoder
//! that decodes their binary fields for the platform authenticator.

mod transcode;
mod types;

// Re-exports for public use
pub use transcode::{transcode, FieldError, TranscodeError};
pub use types::*;
