//! Logging to stderr, stdout is kept for command output.
use nu_ansi_term::Color;
use tracing::level_filters::LevelFilter;

/// Initialize the global [`tracing`] subscriber.
///
/// # Panics
/// This panics if called more than once.
pub(crate) fn init_logging(level: LevelFilter) {
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

/// Print `s` to stderr in bold red.
pub(crate) fn eprintln_red(s: &str) {
    eprintln!("{}", Color::Red.bold().paint(s));
}
