//! Tracing setup and span constructors.

use tracing_subscriber::EnvFilter;

/// Install the global `fmt` subscriber.
///
/// Honors `RUST_LOG`, falling back to `info`. Logs go to stderr so command
/// output on stdout stays clean; setting `SLIRC_LOG_JSON` switches to JSON
/// lines. Calling this twice is a no-op.
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr);

    let _ = if std::env::var_os("SLIRC_LOG_JSON").is_some() {
        builder.json().try_init()
    } else {
        builder.try_init()
    };
}

/// Standardized span constructors for permission observability.
pub mod spans {
    use tracing::{Span, debug_span, info_span};

    /// Span wrapping a full index rebuild for one context.
    pub fn reload(context: &str, groups: usize) -> Span {
        info_span!("permissions_reload", context = %context, groups = groups)
    }

    /// Span wrapping a membership change against the configuration.
    pub fn membership(context: &str, op: &'static str, group: &str) -> Span {
        debug_span!("permissions_membership", context = %context, op = op, group = %group)
    }
}
