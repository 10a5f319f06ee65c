//! Tracing subscriber setup shared by the binaries

use crate::config::LoggingConfig;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Install the global subscriber
///
/// `RUST_LOG` wins when set; otherwise `shopledger` logs at the configured
/// level plus any `extra` directives (e.g. `tower_http=debug`).
pub fn init_tracing(config: &LoggingConfig, extra: &[&str]) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        let mut directives = vec![format!("shopledger={}", config.level)];
        directives.extend(extra.iter().map(|d| d.to_string()));
        EnvFilter::new(directives.join(","))
    });

    let registry = tracing_subscriber::registry().with(filter);

    // A second init (tests, embedding) is not fatal
    let result = if config.format.eq_ignore_ascii_case("json") {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .try_init()
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .try_init()
    };

    if let Err(e) = result {
        eprintln!("Tracing already initialized: {}", e);
    }
}
