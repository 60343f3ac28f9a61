use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::Layer;

/// Default filter when RUST_LOG is not set.
pub fn default_filter(prod: bool) -> &'static str {
    if prod {
        "info"
    } else {
        "api_service=debug,auth=debug,storage=debug,tower_http=debug,info"
    }
}

/// Install the global subscriber.
///
/// Production emits one JSON object per event; development uses the
/// human-readable formatter.
pub fn init(prod: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter(prod).into());

    let fmt_layer = if prod {
        tracing_subscriber::fmt::layer().json().boxed()
    } else {
        tracing_subscriber::fmt::layer().boxed()
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .init();
}
