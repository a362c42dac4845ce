use std::io::Write;

use anyhow::Result;
use clap::Parser;

use geojitter::cli::Cli;
use geojitter::commands::jitter;

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    jitter::run(&cli)
}

/// Log to stderr; `-v` raises the default level, `RUST_LOG` overrides it.
fn init_logging(verbose: u8) {
    let level = match verbose { 0 => "warn", 1 => "info", _ => "debug" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format(|buf, record| writeln!(buf, "[{}] {}", record.level(), record.args()))
        .init();
}
