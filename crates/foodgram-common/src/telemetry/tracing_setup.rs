//! Tracing and logging setup
//!
//! `RUST_LOG` takes precedence over the configured default directives.

use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter, Layer,
};

use crate::config::Environment;

/// Directives used when `RUST_LOG` is unset
const DEFAULT_DIRECTIVES: &str = "info,tower_http=info,sqlx=warn";
const DEBUG_DIRECTIVES: &str =
    "debug,foodgram_api=debug,foodgram_service=debug,tower_http=debug,sqlx=warn,hyper=info";

/// Tracing configuration options
#[derive(Debug, Clone)]
pub struct TracingConfig {
    /// Filter directives applied when `RUST_LOG` is not set
    pub directives: String,
    /// Emit one JSON object per event
    pub json: bool,
    /// Log span open/close events
    pub span_events: bool,
    /// Include file and line numbers
    pub file_line: bool,
}

impl Default for TracingConfig {
    fn default() -> Self {
        Self {
            directives: DEFAULT_DIRECTIVES.to_string(),
            json: false,
            span_events: false,
            file_line: true,
        }
    }
}

impl TracingConfig {
    /// Human-readable debug output
    #[must_use]
    pub fn development() -> Self {
        Self {
            directives: DEBUG_DIRECTIVES.to_string(),
            json: false,
            span_events: true,
            file_line: true,
        }
    }

    /// JSON output at info level
    #[must_use]
    pub fn production() -> Self {
        Self {
            directives: DEFAULT_DIRECTIVES.to_string(),
            json: true,
            span_events: false,
            file_line: false,
        }
    }

    #[must_use]
    pub fn for_environment(env: Environment) -> Self {
        match env {
            Environment::Production => Self::production(),
            Environment::Development => Self::development(),
        }
    }

    fn span_events(&self) -> FmtSpan {
        if self.span_events {
            FmtSpan::NEW | FmtSpan::CLOSE
        } else {
            FmtSpan::NONE
        }
    }
}

/// Install the global subscriber.
///
/// Safe to call more than once; later calls return
/// [`TracingError::AlreadyInitialized`] and leave the first subscriber active.
pub fn try_init_tracing(config: &TracingConfig) -> Result<(), TracingError> {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.directives))
        .map_err(|e| TracingError::InvalidDirectives(e.to_string()))?;

    let fmt_layer = fmt::layer()
        .with_file(config.file_line)
        .with_line_number(config.file_line)
        .with_span_events(config.span_events());

    let fmt_layer = if config.json {
        fmt_layer.json().boxed()
    } else {
        fmt_layer.boxed()
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()
        .map_err(|_| TracingError::AlreadyInitialized)
}

/// Tracing initialization errors
#[derive(Debug, thiserror::Error)]
pub enum TracingError {
    #[error("Tracing subscriber already initialized")]
    AlreadyInitialized,

    #[error("Invalid log directives: {0}")]
    InvalidDirectives(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presets() {
        let dev = TracingConfig::for_environment(Environment::Development);
        assert!(!dev.json);
        assert!(dev.span_events);
        assert!(dev.directives.starts_with("debug"));

        let prod = TracingConfig::for_environment(Environment::Production);
        assert!(prod.json);
        assert!(!prod.file_line);
        assert!(prod.directives.starts_with("info"));
    }

    #[test]
    fn test_second_init_is_reported() {
        let config = TracingConfig::default();
        // The first call may race with other tests; only the second is asserted.
        let _ = try_init_tracing(&config);
        assert!(matches!(
            try_init_tracing(&config),
            Err(TracingError::AlreadyInitialized)
        ));
    }
}
