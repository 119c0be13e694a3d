//! Command-line interface
//!
//! This module contains the CLI commands, argument parsing, and the
//! rendering of each command's output for a network target descriptor.

pub mod commands;

pub use commands::{render, Command, Opt};
