//! Cross-platform utilities.

pub mod platform;
