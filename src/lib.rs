//! # Chain Targets - The Network Descriptor My Deploy Tooling Reads
//!
//! This is the typed home for the config my blockchain deployment toolchain
//! reads at startup. When I come back to this code, here's what I need to
//! remember:
//!
//! ## What I Built
//! - **Named Targets**: each target has a chain id (`network_id`) and a host/port
//! - **Default RPC Endpoint**: the host/port I dial when no target is named
//! - **Loaders**: TOML or JSON files, picked by extension, validated as a whole
//! - **Global Descriptor**: loaded once from `CHAIN_TARGETS_CONFIG` (or the
//!   built-in `live` + `rpc` descriptor) and read-only after that
//! - **CLI**: `target`, `rpc`, `resolve`, `list`, `validate`
//!
//! ## How I Organized My Code
//! - `config/`: the descriptor types, lookups, and the TOML/JSON loaders
//! - `error/`: the crate error type
//! - `cli/`: argument parsing and output rendering for the `chain-targets` binary
//!
//! ## Key Design Decisions I Made
//! - A descriptor is all-or-nothing: parsing and validation happen together
//! - Once loaded, a lookup can only fail with `NotFound`
//! - `rpc` is only the fallback for un-named lookups, never a target name
//! - Duplicate target names are load errors, never last-one-wins
//!
//! Remember: the descriptor is never mutated, so I can share it across threads freely.

pub mod cli;
pub mod config;
pub mod error;

pub use cli::{Command, Opt};
pub use config::{ConfigDescriptor, Format, NetworkTarget, Resolved, RpcEndpoint};
pub use error::{ConfigError, Result};
