//! Minimal logger.
//!
//! Prints `[elapsed LEVEL target] message` to stderr. Install it once at
//! startup with `init_with_level`; the `tracing` feature adds a
//! `tracing-subscriber` alternative.
//!
//! The chosen level applies to the `passchart*` crates. Dependencies are
//! capped at `warn`.

use std::io::Write;
use std::sync::OnceLock;
use std::time::Instant;

use log::{LevelFilter, Log, Metadata, Record};

#[cfg(feature = "tracing")]
use tracing_subscriber::fmt::format::FmtSpan;
#[cfg(feature = "tracing")]
use tracing_subscriber::util::SubscriberInitExt;
#[cfg(feature = "tracing")]
use tracing_subscriber::{fmt, EnvFilter};

const OWN_TARGET: &str = "passchart";

/// Level for records outside the `passchart*` crates.
fn dependency_level(level: LevelFilter) -> LevelFilter {
    level.min(LevelFilter::Warn)
}

struct StderrLogger {
    level: LevelFilter,
    started: Instant,
}

impl Log for StderrLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        let limit = if metadata.target().starts_with(OWN_TARGET) {
            self.level
        } else {
            dependency_level(self.level)
        };
        metadata.level() <= limit
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }

        let elapsed = self.started.elapsed().as_secs_f64();
        // Lock once so lines from rayon workers do not interleave.
        let mut stderr = std::io::stderr().lock();
        let _ = writeln!(
            stderr,
            "[{:7.3}s {:>5} {}] {}",
            elapsed,
            record.level(),
            record.target(),
            record.args()
        );
    }

    fn flush(&self) {}
}

static LOGGER: OnceLock<StderrLogger> = OnceLock::new();

/// Install the stderr logger with the provided level filter.
///
/// Calling this more than once is a no-op after the first successful
/// initialization.
pub fn init_with_level(level: LevelFilter) -> Result<(), log::SetLoggerError> {
    if LOGGER.get().is_none() {
        let logger = LOGGER.get_or_init(|| StderrLogger {
            level,
            started: Instant::now(),
        });
        log::set_logger(logger)?;
        log::set_max_level(level);
    }
    Ok(())
}

/// `EnvFilter` directive equivalent to the stderr logger's filtering.
#[cfg(feature = "tracing")]
fn tracing_directive(level: LevelFilter) -> String {
    let own = level.to_string().to_ascii_lowercase();
    let deps = dependency_level(level).to_string().to_ascii_lowercase();
    format!("{deps},{OWN_TARGET}={own}")
}

/// Install a `tracing-subscriber` (JSON lines when `json`). `RUST_LOG`
/// takes precedence over `level`.
#[cfg(feature = "tracing")]
pub fn init_tracing(json: bool, level: LevelFilter) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(tracing_directive(level)));
    if json {
        let _ = fmt()
            .with_env_filter(filter)
            .with_span_events(FmtSpan::CLOSE)
            .json()
            .flatten_event(true)
            .finish()
            .try_init();
    } else {
        let _ = fmt()
            .with_env_filter(filter)
            .with_span_events(FmtSpan::CLOSE)
            .with_timer(fmt::time::Uptime::default())
            .finish()
            .try_init();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use log::Level;

    fn enabled(logger: &StderrLogger, level: Level, target: &str) -> bool {
        logger.enabled(&Metadata::builder().level(level).target(target).build())
    }

    #[test]
    fn dependencies_are_capped_at_warn() {
        let logger = StderrLogger {
            level: LevelFilter::Debug,
            started: Instant::now(),
        };
        assert!(enabled(&logger, Level::Debug, "passchart_markers::kmeans"));
        assert!(enabled(&logger, Level::Debug, "passchart"));
        assert!(!enabled(&logger, Level::Trace, "passchart_core"));
        assert!(!enabled(&logger, Level::Info, "rayon_core"));
        assert!(enabled(&logger, Level::Warn, "image::codecs"));
    }

    #[test]
    fn quiet_level_applies_everywhere() {
        let logger = StderrLogger {
            level: LevelFilter::Error,
            started: Instant::now(),
        };
        assert!(!enabled(&logger, Level::Warn, "passchart_field"));
        assert!(!enabled(&logger, Level::Warn, "image"));
        assert!(enabled(&logger, Level::Error, "image"));
    }

    #[cfg(feature = "tracing")]
    #[test]
    fn tracing_directive_mirrors_logger() {
        assert_eq!(tracing_directive(LevelFilter::Debug), "warn,passchart=debug");
        assert_eq!(tracing_directive(LevelFilter::Error), "error,passchart=error");
        assert_eq!(tracing_directive(LevelFilter::Off), "off,passchart=off");
    }
}
