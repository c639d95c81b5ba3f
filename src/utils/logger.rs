use chrono::Local;
use fern::Dispatch;
use log::LevelFilter;


/// Installs the global logger writing to stderr. The level comes from
/// `RUST_LOG` and defaults to `info`.
pub fn init() {
    let level = std::env::var("RUST_LOG")
        .ok()
        .and_then(|level| level.parse::<LevelFilter>().ok())
        .unwrap_or(LevelFilter::Info);

    let result = Dispatch::new()
        .level(level)
        .level_for("serde_yaml", LevelFilter::Warn)
        .format(|out, message, record| {
            out.finish(format_args!(
                "[{} {} {}] {}",
                Local::now().format("%Y-%m-%d %H:%M:%S"),
                record.level(),
                record.target(),
                message
            ))
        })
        .chain(std::io::stderr())
        .apply();
    if let Err(e) = result {
        eprintln!("Failed to apply logger configuration: {}", e);
    }
}
