use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Default filter when `RUST_LOG` is unset.
pub const DEFAULT_FILTER: &str = "openslo_sdk=warn";

/// Installs the global subscriber, writing to stderr.
///
/// `RUST_LOG` wins over `verbose`. Calling this more than once is a no-op.
pub fn init(verbose: bool) {
    let fallback = if verbose { "openslo_sdk=debug" } else { DEFAULT_FILTER };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));

    // A subscriber installed earlier stays in place.
    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .try_init()
        .ok();
}
