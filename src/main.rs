use std::io::{self, Write};

use clap::Parser;

use ipegen::cli::Args;
use ipegen::config::Config;
use ipegen::error::Result;
use ipegen::object::SyntheticHeap;
use ipegen::provenance::ProvenanceBufferBuilder;
use ipegen::{debug, output};

/// Set up SIGPIPE handling for Unix systems
/// This prevents "broken pipe" errors when output is piped to commands like `head`
#[cfg(unix)]
fn setup_sigpipe() {
    unsafe {
        libc::signal(libc::SIGPIPE, libc::SIG_DFL);
    }
}

#[cfg(not(unix))]
fn setup_sigpipe() {
    // Windows doesn't have SIGPIPE
}

fn main() {
    setup_sigpipe();

    if let Err(e) = run() {
        eprintln!("ipegen: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let args = Args::parse();
    let config = Config::from_args(&args)?;

    let mut builder = ProvenanceBufferBuilder::new(SyntheticHeap::new())
        .initial_capacity(config.capacity)
        .value(config.value);

    let head = match config.chunk {
        Some(chunk) => builder.build_chain(config.start, config.end, chunk)?,
        None => builder.build_entries(config.start, config.end)?,
    };

    if config.debug {
        let stderr = io::stderr();
        let mut stderr = stderr.lock();
        debug::debug_nodes(&mut stderr, &head, config.start)?;
        stderr.flush()?;
    }

    let out = output::open_output(&config)?;
    output::write_nodes(out, &head, config.start, config.format)?;

    Ok(())
}
