use std::process::ExitCode;

use clap::Parser;
use collection_harness::cli::Cli;
use crossterm::tty::IsTty;

fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    if cli.debug {
        let path = std::env::temp_dir().join("collection-harness-debug.log");
        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)?;
        tracing_subscriber::fmt()
            .with_writer(std::sync::Mutex::new(file))
            .with_ansi(false)
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_env("RUST_LOG")
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("debug")),
            )
            .init();
        tracing::info!("collection-harness debug log started, tail -f {}", path.display());
    }

    let config = cli.load_config()?;
    let stdout = std::io::stdout();

    if cli.list {
        collection_harness::list_catalogue(&config, stdout.lock())?;
        return Ok(ExitCode::SUCCESS);
    }

    let is_tty = stdout.is_tty();
    let report = collection_harness::run_catalogue(&config, stdout.lock(), is_tty)?;
    Ok(if report.success() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
