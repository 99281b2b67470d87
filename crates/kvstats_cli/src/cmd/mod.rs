/// Completion check command.
pub mod check;
/// Tree dump command.
pub mod dump;
/// Single-node lookup command.
pub mod get;
/// Shared argument parsing and rendering helpers.
pub mod util;
