use crate::config::ConfigDescriptor;
use crate::error::Result;
use clap::{Parser, Subcommand};
use std::fmt::Write;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "chain-targets")]
pub struct Opt {
    #[arg(
        long = "config",
        global = true,
        help = "Descriptor file (.toml or .json). Defaults to $CHAIN_TARGETS_CONFIG or the built-in descriptor"
    )]
    pub config: Option<PathBuf>,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    #[command(name = "target", about = "Print the coordinates of a named target")]
    Target {
        #[arg(help = "The target name")]
        name: String,
    },
    #[command(name = "rpc", about = "Print the default RPC endpoint")]
    Rpc,
    #[command(
        name = "resolve",
        about = "Print the host:port to dial, using the RPC endpoint when no target is given"
    )]
    Resolve {
        #[arg(help = "Optional target name")]
        name: Option<String>,
    },
    #[command(name = "list", about = "List all targets")]
    List,
    #[command(name = "validate", about = "Load and validate the descriptor")]
    Validate,
}

/// Render the output of `command` against a loaded descriptor.
///
/// Lookup failures (`NotFound`) are returned instead of rendered.
pub fn render(command: &Command, descriptor: &ConfigDescriptor) -> Result<String> {
    let mut out = String::new();
    match command {
        Command::Target { name } => {
            let target = descriptor.get_target(name)?;
            let _ = writeln!(out, "network_id = {}", target.get_network_id());
            let _ = writeln!(out, "host = {}", target.get_host());
            let _ = writeln!(out, "port = {}", target.get_port());
        }
        Command::Rpc => {
            let rpc = descriptor.get_rpc_endpoint();
            let _ = writeln!(out, "host = {}", rpc.get_host());
            let _ = writeln!(out, "port = {}", rpc.get_port());
        }
        Command::Resolve { name } => {
            let resolved = descriptor.resolve(name.as_deref())?;
            let _ = writeln!(out, "{}", resolved.address());
        }
        Command::List => {
            for target in descriptor.targets() {
                let _ = writeln!(out, "{target}");
            }
            let _ = writeln!(out, "{}", descriptor.get_rpc_endpoint());
        }
        Command::Validate => {
            let _ = writeln!(out, "OK ({} targets)", descriptor.len());
        }
    }
    Ok(out)
}
