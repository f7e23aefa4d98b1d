use anyhow::Result;
use overlay_store::config::Config;
use overlay_store::logger::Logger;
use overlay_store::ui;

#[tokio::main]
async fn main() -> Result<()> {
    if std::env::args().any(|arg| arg == "--generate-config") {
        return Config::generate_default_config(Config::get_default_config_path()?);
    }

    let config = Config::load()?;

    let logger = Logger::new();
    logger.install(&config.logging)?;

    // Run the TUI application
    ui::run_app(config, logger).await?;

    Ok(())
}
