//! Tracing and logging configuration
//!
//! Development gets pretty, human-readable output; production gets flattened
//! JSON for log aggregation. `RUST_LOG` overrides the default filter in both.

use tracing_subscriber::{EnvFilter, Layer, layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::Environment;

/// Default filter in development: our crates at debug, dependencies quieter
pub const DEVELOPMENT_FILTER: &str =
    "info,tc_api=debug,tc_db=debug,tower_http=debug,tower_governor=debug,sqlx=warn";

/// Default filter in production
pub const PRODUCTION_FILTER: &str = "warn,tc_api=info,tc_db=info,serv=info,tower_http=info";

/// Initialize tracing/logging based on the environment
///
/// # Development Mode
/// - Pretty-printed logs with file and line numbers
/// - [`DEVELOPMENT_FILTER`] unless `RUST_LOG` is set
///
/// # Production Mode
/// - JSON logs, one flattened object per event, with the request span
///   (including its request id) attached
/// - [`PRODUCTION_FILTER`] unless `RUST_LOG` is set
pub fn init_tracing(env: &Environment) {
    if env.is_development() {
        init_development_tracing();
    } else {
        init_production_tracing();
    }
}

/// `RUST_LOG` when set and valid, `default` otherwise
fn env_filter(default: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default))
}

/// Pretty output for local runs
fn init_development_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(true)
                .with_line_number(true)
                .with_file(true)
                .pretty()
                .with_filter(env_filter(DEVELOPMENT_FILTER)),
        )
        .init();

    tracing::info!(filter = DEVELOPMENT_FILTER, "Tracing initialized in development mode");
}

/// JSON output for log collectors
fn init_production_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .json()
                .with_current_span(true)
                .with_span_list(false)
                .flatten_event(true)
                .with_target(true)
                .with_filter(env_filter(PRODUCTION_FILTER)),
        )
        .init();

    tracing::info!("Tracing initialized in production mode");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_filters_parse() {
        for filter in [DEVELOPMENT_FILTER, PRODUCTION_FILTER] {
            assert!(EnvFilter::try_new(filter).is_ok(), "{filter}");
        }
    }
}
