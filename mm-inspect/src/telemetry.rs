//! Log setup for the binary.
//!
//! Logs go to journald or stderr, never stdout: stdout carries the JSON output.

use std::io::{IsTerminal as _, Write as _};
use tracing::level_filters::LevelFilter;
use tracing_subscriber::{
    layer::SubscriberExt as _, util::SubscriberInitExt as _, EnvFilter,
};

/// Logs at `INFO` unless `RUST_LOG` says otherwise.
#[derive(Debug, Default)]
pub struct TelemetryConfig {
    syslog_identifier: Option<String>,
}

impl TelemetryConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Enables journald with the given syslog identifier.
    ///
    /// Ignored when stderr is a terminal.
    #[must_use]
    pub fn with_journald(self, syslog_identifier: &str) -> Self {
        Self {
            syslog_identifier: Some(syslog_identifier.to_owned()),
            ..self
        }
    }

    pub fn try_init(
        self,
    ) -> Result<TelemetryFlusher, tracing_subscriber::util::TryInitError> {
        let journald_layer = if !std::io::stderr().is_terminal() {
            self.syslog_identifier.and_then(|syslog_identifier| {
                tracing_journald::layer()
                    .inspect_err(|err| {
                        eprintln!(
                            "failed connecting to journald socket. \
                        will write to stderr: {err}"
                        );
                    })
                    .map(|layer| layer.with_syslog_identifier(syslog_identifier))
                    .ok()
            })
        } else {
            None
        };
        let stderr_layer = journald_layer
            .is_none()
            .then(|| tracing_subscriber::fmt::layer().with_writer(std::io::stderr));

        let filter = EnvFilter::builder()
            .with_default_directive(LevelFilter::INFO.into())
            .from_env_lossy();

        tracing_subscriber::registry()
            .with(stderr_layer)
            .with(journald_layer)
            .with(filter)
            .try_init()?;

        Ok(TelemetryFlusher { _private: () })
    }
}

#[must_use = "call .flush at the end of the program, otherwise output may get lost"]
pub struct TelemetryFlusher {
    _private: (),
}

impl TelemetryFlusher {
    /// Call this at the end of the program.
    pub fn flush(self) {
        std::io::stderr().flush().ok();
        std::io::stdout().flush().ok();
    }
}

#[cfg(test)]
mod tests {
    use super::TelemetryConfig;

    #[test]
    fn second_init_is_an_error_not_a_panic() {
        let first = TelemetryConfig::new().with_journald("mm-inspect-test").try_init();
        let second = TelemetryConfig::new().try_init();

        assert!(first.is_ok());
        assert!(second.is_err());
        first.unwrap().flush();
    }
}
