//! External collaborators
//!
//! This module provides:
//! - Command execution with a bounded wait (git, gradle wrapper)
//! - Host detection (installed tools, wrapper launcher per OS)

pub mod check;
pub mod command;

pub use check::{check_host_tools, host_wrapper_launcher, wrapper_launcher, RuntimeInfo};
pub use command::{CommandRunner, Invocation, SystemRunner, COMMAND_TIMEOUT};
