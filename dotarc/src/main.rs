mod application;
mod presentation {
    pub mod cli;
}

use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::presentation::cli::Cli;

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level)))
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = application::run(cli) {
        tracing::debug!(error = ?e, "command failed");
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
