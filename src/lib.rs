//! Tessera CLI - the entrypoint of the Tessera testing platform.
//!
//! The CLI is a thin, single-shot tool: every command performs at most one
//! network round trip or one filesystem operation and exits. There is no
//! daemon, no persistent state machine, and no cross-invocation cache.
//!
//! # Core Modules
//!
//! - [`installer`] - downloads a demo project archive, extracts it in an
//!   isolated staging directory, and commits it to the target path
//! - [`upgrade`] - version comparison and the Homebrew-mediated self-update
//! - [`catalog`] - the static table of installable demo projects
//! - [`cli`] - command definitions and dispatch
//! - [`core`] - error taxonomy and user-facing error display
//! - [`utils`] - per-user directory resolution
//!
//! # Command-Line Usage
//!
//! ```bash
//! # Initialize a new demo project
//! tessera init quickstart .
//!
//! # Launch a test run
//! tessera run --name smoke --tenant acme --username u --password p \
//!   --config registry.io/acme/config:v1 --image registry.io/acme/app:v1 \
//!   --email dev@acme.com
//!
//! # Keep the CLI current
//! tessera update
//! tessera version
//! ```

pub mod catalog;
pub mod cli;
pub mod constants;
pub mod core;
pub mod installer;
pub mod upgrade;
pub mod utils;
