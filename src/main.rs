use anyhow::Result;
use clap::Parser;
use glyphword::cli::{self, Cli};

fn main() -> Result<()> {
    // Parse CLI arguments first (before logging init for cleaner output)
    let cli = Cli::parse();
    let config = cli::load_config(cli.config.as_deref())?;

    // CLI --log-level flag takes highest precedence, then RUST_LOG, then config.
    let level = glyphword::debug::init_log_bridge(
        cli.log_level.map(|l| l.to_level_filter()),
        config.log_level,
    );
    log::info!("Starting glyphword {} (log level {})", glyphword::VERSION, level);

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    cli::run_command(cli.command, &config, &mut out)
}
