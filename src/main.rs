// This is my entry point for querying the network targets my deploy tooling dials
use chain_targets::{cli, config, Opt};
use clap::Parser;
use log::{error, LevelFilter};
use std::process;

fn main() {
    // I initialize logging at Info so I can see which descriptor file got loaded
    // RUST_LOG still wins if I export it
    env_logger::builder()
        .filter_level(LevelFilter::Info)
        .parse_default_env()
        .init();

    // I parse the command line arguments using clap
    let opt = Opt::parse();

    // If loading or a lookup fails, I log the error and exit with code 1
    if let Err(e) = run(opt) {
        error!("Error: {e}");
        process::exit(1);
    }
}

// This is where I pick the descriptor and print what the command asked for
fn run(opt: Opt) -> chain_targets::Result<()> {
    // An explicit --config file wins; otherwise I fall back to the process-wide
    // descriptor, which reads CHAIN_TARGETS_CONFIG or uses the built-in one
    let loaded;
    let descriptor = match &opt.config {
        Some(path) => {
            loaded = config::load(path)?;
            &loaded
        }
        None => config::global()?,
    };

    // I render into a String first so a NotFound never leaves half the output printed
    let output = cli::render(&opt.command, descriptor)?;
    print!("{output}");
    Ok(())
}
