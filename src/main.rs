use clap::Parser;
use tracing::info;
use corpus_market::{
    catalog,
    cli::{self, Cli, Command},
    config::Config,
    utils::{init_logger, LogTarget},
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Load configuration; --data wins over CORPUS_MARKET_DATA
    let mut config = Config::from_env()?;
    if let Some(path) = cli.data.clone() {
        config.data.path = Some(path);
    }

    let command = cli.command_or_default();
    let target = match command {
        Command::Browse => LogTarget::File,
        _ => LogTarget::Stderr,
    };
    let _log_guard = init_logger(&config.logging, target)?;

    if command == Command::Browse {
        return corpus_market::tui::run(config).await;
    }

    let source = catalog::source_from_config(&config);
    info!("Loading catalog from {}", source.describe());
    let catalog = catalog::load_catalog(source.as_ref()).await?;

    let output = cli::execute(&command, &catalog, config.ui.popular_limit)?;
    println!("{}", output.trim_end());

    Ok(())
}
