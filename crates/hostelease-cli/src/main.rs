use anyhow::Context as _;
use clap::Parser as _;
use hostelease_cli::{cli::Cli, get_configuration};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if let Err(e) = hostelease_cli::tracing::init(&cli) {
        eprintln!("Failed to start tracing: {e}");
    }

    let configuration = get_configuration().context("failed to read configuration")?;
    let mut stdout = std::io::stdout().lock();
    hostelease_cli::run(cli.command, &configuration, &mut stdout).await
}
