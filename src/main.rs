use colored::Colorize;
use tura::{
    app::App,
    config::Config,
    context::AppContext,
    errors::TuraError,
    logging, ui,
};

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let (config, config_error) = match Config::load() {
        Ok(config) => (config, None),
        Err(e) => (Config::default(), Some(e)),
    };

    // Keep the handle alive so the file writer flushes on exit.
    let _logger = match logging::init_logging(&config) {
        Ok(handle) => Some(handle),
        Err(e) => {
            eprintln!("{} {}", "Logging disabled:".yellow(), e);
            None
        }
    };
    log::info!("Starting {} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));

    let started: Result<AppContext, TuraError> = match config_error {
        Some(e) => Err(e),
        None => AppContext::start(&config),
    };
    let (app, context) = match started {
        Ok(context) => (App::new(), Some(context)),
        Err(e) => (App::with_init_error(&e), None),
    };

    if let Err(e) = ui::run(app, context).await {
        log::error!("Fatal error: {:#}", e);
        eprintln!("{} {:#}", "Error:".red().bold(), e);
        return Err(e);
    }
    Ok(())
}
