//! Log output setup.
//!
//! One JSON object per line: `timestamp` (UTC), `level`, `message` and the
//! event's own fields at the top level.

use tracing::Subscriber;
use tracing_subscriber::fmt::{time::ChronoUtc, MakeWriter};
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

/// Build the JSON subscriber writing to `writer`.
pub fn json_subscriber<W>(filter: EnvFilter, writer: W) -> impl Subscriber + Send + Sync + 'static
where
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    tracing_subscriber::fmt()
        .json()
        .flatten_event(true)
        .with_current_span(false)
        .with_span_list(false)
        .with_target(false)
        .with_timer(ChronoUtc::rfc_3339())
        .with_env_filter(filter)
        .with_writer(writer)
        .finish()
}

/// Install the process-wide subscriber (verbose mode sets debug level for this crate).
pub fn init(verbose: bool) {
    let filter = if verbose {
        "info,password_admin=debug".to_string()
    } else {
        std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string())
    };

    json_subscriber(EnvFilter::new(filter), std::io::stdout).init();
}
