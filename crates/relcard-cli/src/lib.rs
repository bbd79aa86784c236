//! relcard CLI library.
//!
//! Command implementations for the `relcard` binary: one-shot generation to
//! a file and the HTTP endpoint, plus configuration and logging setup.

pub mod commands;
pub mod config;
pub mod logging;
