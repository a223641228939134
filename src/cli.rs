use simplelog::LevelFilter;
use std::io::Read;

fn select_log_level_filter(verbosity: i32) -> LevelFilter {
    match verbosity {
        0 => LevelFilter::Off,
        1 => LevelFilter::Error,
        2 => LevelFilter::Warn,
        3 => LevelFilter::Info,
        4 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

pub fn init_logging(verbosity: i32) -> Result<(), log::SetLoggerError> {
    simplelog::TermLogger::init(
        select_log_level_filter(verbosity),
        simplelog::Config::default(),
        simplelog::TerminalMode::Stderr,
        simplelog::ColorChoice::Auto,
    )
}

/// Read all of standard input as raw bytes (corpus lines may not be valid
/// UTF-8).
pub fn read_stdin() -> Result<Vec<u8>, std::io::Error> {
    let stdin = std::io::stdin();
    let mut buffer = vec![];
    let mut handle = stdin.lock();
    handle.read_to_end(&mut buffer)?;
    Ok(buffer)
}
