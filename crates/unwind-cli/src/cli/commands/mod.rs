//! CLI command handlers, one file per command.

mod check;
mod expand;
mod redirected;
mod shorteners;

pub use check::run_check;
pub use expand::run_expand;
pub use redirected::run_redirected;
pub use shorteners::run_shorteners;

/// Printed when the target could not be reached.
const UNKNOWN: &str = "unknown";
