use log::LevelFilter;
use simplelog::{ConfigBuilder, WriteLogger};

/// Logs to stderr so stdout stays free for command output
pub fn setup_simple_logger(level: LevelFilter) -> anyhow::Result<()> {
    let logger_config = ConfigBuilder::new()
        .set_time_format_rfc3339()
        .add_filter_allow_str("bt_payments")
        .add_filter_allow_str("scripts")
        .build();

    Ok(WriteLogger::init(level, logger_config, std::io::stderr())?)
}

/// Level for the number of `-v` flags given on the command line
pub fn level_from_verbosity(verbosity: u8) -> LevelFilter {
    match verbosity {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        _ => LevelFilter::Debug,
    }
}
