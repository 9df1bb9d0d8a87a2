//! Tracing subscriber setup.

use tracing_subscriber::{
    EnvFilter, fmt, prelude::__tracing_subscriber_SubscriberExt, util::SubscriberInitExt,
};

/// Logs go to stderr so CSV output on stdout stays clean. `RUST_LOG`
/// replaces the default directives entirely.
pub fn init_logging(verbose: bool) {
    let rust_log = std::env::var(EnvFilter::DEFAULT_ENV).ok();

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .without_time()
                .with_target(false),
        )
        .with(log_filter(verbose, rust_log.as_deref()))
        .init();
}

/// `quotefolio=warn`, or `quotefolio=debug` when verbose, unless `rust_log`
/// holds valid directives.
pub fn log_filter(verbose: bool, rust_log: Option<&str>) -> EnvFilter {
    let default = if verbose {
        "quotefolio=debug"
    } else {
        "quotefolio=warn"
    };
    rust_log
        .filter(|directives| !directives.trim().is_empty())
        .and_then(|directives| EnvFilter::try_new(directives).ok())
        .unwrap_or_else(|| EnvFilter::new(default))
}
