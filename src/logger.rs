/// Logging setup for the backend.
/// RUST_LOG overrides the defaults; dependencies are capped at WARN.

use std::io::Write;
use log::LevelFilter;

pub fn init() {
    let mut builder = env_logger::Builder::new();

    if let Ok(log_level) = std::env::var("RUST_LOG") {
        builder.parse_filters(&log_level);
    } else {
        builder.filter_level(LevelFilter::Info);
        builder.filter_module("hyper", LevelFilter::Warn);
        builder.filter_module("reqwest", LevelFilter::Warn);
        builder.filter_module("tower", LevelFilter::Warn);
        builder.filter_module("rusqlite", LevelFilter::Warn);
    }

    // Log format: [HH:MM:SS LEVEL] target - message
    builder.format(|buf, record| {
        let now = chrono::Local::now().format("%H:%M:%S");
        writeln!(
            buf,
            "[{} {}] {} - {}",
            now,
            record.level(),
            record.target(),
            record.args()
        )
    });

    builder.init();

    log::info!("Logging initialized ✓");
}
