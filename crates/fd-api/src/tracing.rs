//! Log output for the service.
//!
//! Development prints pretty, multi-line events with source locations.
//! Production prints one flattened JSON object per event, including the
//! current request span (request id, method, uri).

use tracing_subscriber::{
    EnvFilter, Layer, Registry, layer::SubscriberExt, util::SubscriberInitExt,
};

use crate::config::Environment;

/// Default filter per environment, used when `RUST_LOG` is unset or invalid.
pub const fn default_directives(env: &Environment) -> &'static str {
    match env {
        Environment::Development => "debug,fd_api=debug,fd_store=debug,tower_http=debug,sqlx=warn",
        Environment::Production => "info,fd_api=info,fd_store=info,tower_http=info,sqlx=warn",
    }
}

/// Install the global subscriber.
///
/// `RUST_LOG` overrides the defaults (e.g. `RUST_LOG=fd_store=trace,tower_http=info`).
/// Fails if a global subscriber is already set.
pub fn init_tracing(env: &Environment) -> anyhow::Result<()> {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives(env)));

    let fmt_layer: Box<dyn Layer<Registry> + Send + Sync> = if env.is_development() {
        tracing_subscriber::fmt::layer()
            .with_target(true)
            .with_line_number(true)
            .with_file(true)
            .pretty()
            .boxed()
    } else {
        tracing_subscriber::fmt::layer()
            .json()
            .with_current_span(true)
            .with_span_list(true)
            .flatten_event(true)
            .with_target(true)
            .boxed()
    };

    tracing_subscriber::registry()
        .with(fmt_layer.with_filter(env_filter))
        .try_init()?;

    tracing::info!(environment = ?env, "tracing initialized");
    Ok(())
}
