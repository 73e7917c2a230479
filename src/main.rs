use clap::Parser;

use dbdie_version::cli::{Cli, run};
use dbdie_version::config::{self, AppConfig};
use dbdie_version::logging::{self, LogTarget};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = AppConfig::load(&cli.config.unwrap_or_else(config::config_path))?;
    let target = if cli.log_stderr {
        LogTarget::Stderr
    } else {
        LogTarget::File
    };
    let _guard = logging::init(target, &config.log.level, &config::log_path())?;

    let output = run(cli.command, &config)?;
    println!("{output}");
    Ok(())
}
