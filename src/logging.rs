//! Logging initialization.
//!
//! Logs always go to stderr: stdout carries the JSON-RPC stream.

use std::sync::Once;

use tracing_subscriber::EnvFilter;

use crate::config::LogFormat;

const DEFAULT_FILTER: &str = "meetup_server=info";

static INIT_ONCE: Once = Once::new();

/// Install the global tracing subscriber. Later calls are no-ops.
///
/// `RUST_LOG` overrides the default filter.
pub fn init(format: LogFormat) {
    INIT_ONCE.call_once(|| {
        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
        let builder = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr);

        let installed = match format {
            LogFormat::Pretty => builder.try_init(),
            LogFormat::Json => builder.json().try_init(),
        };
        if let Err(e) = installed {
            eprintln!("meetup-server: logging already initialized: {e}");
        }
    });
}
