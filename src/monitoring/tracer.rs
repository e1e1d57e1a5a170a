/*!
 * Diagnostic Tracing
 * Structured diagnostics for the simulator using the tracing crate
 *
 * The simulation event log is program output and goes to the event sink.
 * Everything here is diagnostics and goes to stderr.
 */

use crate::config::SimulatorConfig;
use tracing::info;
use tracing_subscriber::{
    fmt::format::FmtSpan, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter,
};

/// Initialize structured tracing
///
/// Environment variables:
/// - RUST_LOG: Set log level (default: the configured filter, `warn`)
/// - RR_SIM_TRACE_JSON: Enable JSON output (default: false)
///
/// Records emitted through the `log` facade are forwarded as well. Calling
/// this more than once keeps the first subscriber.
pub fn init_tracing(config: &SimulatorConfig) {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.log_filter.as_str()));

    let registry = tracing_subscriber::registry().with(env_filter);

    let installed = if config.trace_json {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr)
                    .with_target(true)
                    .with_current_span(true)
                    .with_span_list(true)
                    .with_span_events(FmtSpan::CLOSE),
            )
            .try_init()
    } else {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_target(true)
                    .with_span_events(FmtSpan::CLOSE)
                    .compact(),
            )
            .try_init()
    };

    if installed.is_ok() {
        info!(json = config.trace_json, "Structured tracing initialized");
    }
}
