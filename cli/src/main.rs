//! app-upgrader - upgrade every app with a pending update, one at a time

#![cfg_attr(test, allow(clippy::expect_used))]

use app_upgrader::cli::Cli;
use clap::Parser;
use console::Term;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_ansi(!cli.no_color && Term::stderr().is_term())
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = cli.run().await {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
