// bindery-cli/src/lib.rs
//
// Library portion of the Bindery CLI application. Contains argument
// definitions and command logic so integration tests can drive them
// directly.

pub mod cli;
pub mod commands;
pub mod error;

// Re-export items needed by the binary or integration tests
pub use cli::{Cli, Commands, ConvertArgs};
pub use commands::convert::run_convert;
