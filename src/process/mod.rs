/*!
 * Process Module
 * Process records and their timing statistics
 */

mod record;
pub mod types;

// Re-export for convenience
pub use record::ProcessRecord;
pub use types::{ProcessError, ProcessResult, ProcessStats};
