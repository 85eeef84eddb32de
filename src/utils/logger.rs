use chrono::Local;
use eyre::Result;
use fern::Dispatch;

/// Sets up the console logger.
///
/// # Returns
/// * `Result<()>` - Success or failure of logger setup
///
/// # Errors
/// * If logger configuration fails
pub fn setup_logger() -> Result<()> {
    Dispatch::new()
        // Set logging level from RUST_LOG env var or default to Info
        .level(
            std::env::var("RUST_LOG")
                .map(|level| level.parse().unwrap_or(log::LevelFilter::Info))
                .unwrap_or(log::LevelFilter::Info),
        )
        .chain(std::io::stdout())
        // Format log messages with time and log level
        .format(|out, message, record| {
            out.finish(format_args!(
                "{} [{}] {}",
                Local::now().format("%Y-%m-%d %H:%M:%S"),
                record.level(),
                message
            ));
        })
        .apply()?;
    Ok(())
}
