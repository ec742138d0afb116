//! Logger initialization for binaries.
//!
//! The library only talks to the `log` facade. Binaries call [`init_logger`]
//! once at startup; log lines go to stderr so they never mix with menu output
//! on stdout.

use colored::*;
use log::LevelFilter;
use std::io::Write;

pub const LOG_ENV: &str = "RUST_LOG";

/// Picks the effective level: `--verbose` wins, then `RUST_LOG`, then `warn`.
pub fn effective_level(verbose: bool, env_set: bool) -> Option<LevelFilter> {
    if verbose {
        Some(LevelFilter::Debug)
    } else if env_set {
        None
    } else {
        Some(LevelFilter::Warn)
    }
}

/// Initializes `env_logger` with a compact colored format.
///
/// Uses `try_init`, so calling it twice (as tests may) returns an error
/// instead of panicking.
pub fn init_logger(verbose: bool) -> Result<(), log::SetLoggerError> {
    let mut builder = env_logger::Builder::from_env(LOG_ENV);

    let env_set = std::env::var_os(LOG_ENV).is_some();
    if let Some(level) = effective_level(verbose, env_set) {
        builder.filter_level(level);
    }

    builder.format(|buf, record| {
        let level = record.level();
        let colored_level = match level {
            log::Level::Error => level.to_string().red(),
            log::Level::Warn => level.to_string().yellow(),
            log::Level::Info => level.to_string().green(),
            log::Level::Debug => level.to_string().blue(),
            log::Level::Trace => level.to_string().purple(),
        };

        writeln!(
            buf,
            "{} [{}] {} {}",
            chrono::Local::now().format("%H:%M:%S%.3f").to_string().dimmed(),
            colored_level,
            record.target().cyan(),
            record.args()
        )
    });

    builder.try_init()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verbose_forces_debug() {
        assert_eq!(effective_level(true, true), Some(LevelFilter::Debug));
        assert_eq!(effective_level(true, false), Some(LevelFilter::Debug));
    }

    #[test]
    fn env_is_respected_when_not_verbose() {
        assert_eq!(effective_level(false, true), None);
        assert_eq!(effective_level(false, false), Some(LevelFilter::Warn));
    }

    #[test]
    fn init_does_not_panic_when_repeated() {
        let _ = init_logger(false);
        assert!(init_logger(false).is_err());
    }
}
