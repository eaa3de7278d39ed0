//! Core types shared across the CLI: the error taxonomy and its
//! user-facing display wrapper.

pub mod error;

pub use error::{CliError, ErrorContext, user_friendly_error};
