use simplelog::{ColorChoice, Config, LevelFilter, SimpleLogger, TermLogger, TerminalMode};

/// Installs the terminal logger, falling back to a plain stdout logger when no
/// terminal is attached. Calling it twice is harmless.
pub fn init_logger(level: LevelFilter) {
    if TermLogger::init(level, Config::default(), TerminalMode::Mixed, ColorChoice::Auto).is_err()
    {
        let _ = SimpleLogger::init(level, Config::default());
    }
}
