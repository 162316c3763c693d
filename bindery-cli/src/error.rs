// bindery-cli/src/error.rs
//
// CLI error handling, shared with the core library's error types.

use bindery_core::CoreResult;

/// Type alias for CLI results using `CoreError`.
///
/// Provides consistency with the core library while allowing CLI-specific
/// error handling when needed.
pub type CliResult<T> = CoreResult<T>;
