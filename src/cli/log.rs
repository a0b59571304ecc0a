//! Logging setup for the CLI.
//!
//! Verbosity maps from the `-v` count (warn by default, then info, debug,
//! trace). Log lines go to stderr so they never mix with query output.

use log::LevelFilter;

pub fn setup(verbose: u8, log_time: bool) -> Result<(), String> {
    let level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };

    let dispatch = fern::Dispatch::new()
        .level(level)
        .format(move |out, message, record| {
            if log_time {
                let format =
                    time::macros::format_description!("[hour]:[minute]:[second].[subsecond digits:3]");
                let now = time::OffsetDateTime::now_local()
                    .unwrap_or_else(|_| time::OffsetDateTime::now_utc());
                out.finish(format_args!(
                    "{} [{}] {}: {}",
                    now.format(&format).unwrap_or_default(),
                    record.level(),
                    record.target(),
                    message
                ))
            } else {
                out.finish(format_args!(
                    "[{}] {}: {}",
                    record.level(),
                    record.target(),
                    message
                ))
            }
        })
        .chain(std::io::stderr());

    dispatch
        .apply()
        .map_err(|e| format!("Failed to initialize logging: {}", e))
}
