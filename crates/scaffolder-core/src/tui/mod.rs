//! CLI framing using cliclack (Charm-style inline output)
//!
//! This module is optional and only available when the `tui` feature is enabled.

#[cfg(feature = "tui")]
mod prompts;

#[cfg(feature = "tui")]
pub use crate::config::CreateArgs;
#[cfg(feature = "tui")]
pub use prompts::{fetch_sdk, run};
