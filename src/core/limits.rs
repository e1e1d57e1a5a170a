/*!
 * Simulator Limits and Constants
 *
 * Centralized location for defaults, naming, and environment keys.
 */

use super::types::Tick;

// =============================================================================
// SCHEDULING
// =============================================================================

/// Default time quantum (5ms)
/// Matches the value the input form pre-fills
pub const DEFAULT_QUANTUM: Tick = 5;

/// Smallest accepted time quantum
pub const MIN_QUANTUM: Tick = 1;

/// Smallest accepted burst time
pub const MIN_BURST: Tick = 1;

/// Prefix for generated process names (`P0`, `P1`, ...)
pub const PROCESS_NAME_PREFIX: &str = "P";

// =============================================================================
// ENVIRONMENT
// =============================================================================

/// Overrides the default time quantum
pub const ENV_QUANTUM: &str = "RR_SIM_QUANTUM";

/// Enables JSON trace output (`1` or `true`)
pub const ENV_TRACE_JSON: &str = "RR_SIM_TRACE_JSON";

/// Fallback log filter when `RUST_LOG` is unset
pub const ENV_LOG_FILTER: &str = "RR_SIM_LOG";

/// Default diagnostic filter; the event log goes to stdout, diagnostics to stderr
pub const DEFAULT_LOG_FILTER: &str = "warn";
