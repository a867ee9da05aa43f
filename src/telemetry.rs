//! Tracing initialisation for the `listtrace` binary.
//!
//! Call [`init_tracing`] once at program start. The terminal UI owns the
//! screen while it runs, so logs either go to a file or are held to
//! warnings and above.

use std::fs::File;
use std::sync::Mutex;
use tracing::Level;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

/// Where log lines are written
pub enum LogSink {
    Stderr,
    File(File),
}

/// Initialise the global tracing subscriber.
///
/// * `json`: emit newline-delimited JSON log lines.
/// * `level`: default verbosity when `RUST_LOG` is not set.
/// * `sink`: stderr or an already opened log file.
/// * `ceiling`: hard maximum verbosity that `RUST_LOG` cannot lift.
///
/// Safe to call multiple times; only the first call takes effect.
pub fn init_tracing(json: bool, level: Level, sink: LogSink, ceiling: Option<Level>) {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level.as_str()));

    let registry = tracing_subscriber::registry()
        .with(env_filter)
        .with(ceiling_filter(ceiling));

    match (sink, json) {
        (LogSink::Stderr, true) => registry
            .with(fmt::layer().with_target(false).with_writer(std::io::stderr).json())
            .try_init()
            .ok(),
        (LogSink::Stderr, false) => registry
            .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
            .try_init()
            .ok(),
        (LogSink::File(file), true) => registry
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_ansi(false)
                    .with_writer(Mutex::new(file))
                    .json(),
            )
            .try_init()
            .ok(),
        (LogSink::File(file), false) => registry
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_ansi(false)
                    .with_writer(Mutex::new(file)),
            )
            .try_init()
            .ok(),
    };
}

fn ceiling_filter(ceiling: Option<Level>) -> LevelFilter {
    ceiling.map_or(LevelFilter::TRACE, LevelFilter::from_level)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ceiling_wins_over_env_filter() {
        let subscriber = tracing_subscriber::registry()
            .with(EnvFilter::new("debug"))
            .with(ceiling_filter(Some(Level::WARN)));

        tracing::subscriber::with_default(subscriber, || {
            assert!(!tracing::enabled!(Level::DEBUG));
            assert!(tracing::enabled!(Level::WARN));
        });
    }

    #[test]
    fn test_no_ceiling_is_unrestricted() {
        assert_eq!(ceiling_filter(None), LevelFilter::TRACE);
        assert_eq!(ceiling_filter(Some(Level::WARN)), LevelFilter::WARN);
    }
}
