//! Developer-facing diagnostics
//!
//! - Console: where extraction errors and failed swaps are reported
//! - Element paths: how an offending element is identified in those reports

mod console;
mod dom_path;

pub use console::{Console, ConsoleMessage, LogLevel};
pub use dom_path::path_to;
