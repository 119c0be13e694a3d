//! Network target configuration
//!
//! This module holds the descriptor of named deployment targets and the
//! default RPC endpoint, and the loaders that build it from TOML or JSON.
//!
//! A descriptor is validated as a whole at load time. Once loaded it is
//! read-only.

pub mod descriptor;
pub mod loader;

pub use descriptor::{ConfigDescriptor, NetworkTarget, Resolved, RpcEndpoint};
pub use loader::{
    from_json_str, from_toml_str, global, load, load_from_env, Format, CONFIG_PATH_KEY,
};
