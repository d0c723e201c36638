//! Scaffolder Core - project skeleton generation for MindSphere applications
//!
//! This library turns a [`Config`] into a populated project directory: source
//! trees, boilerplate files, a git repository and, optionally, a gradle build
//! with its wrapper and the SDK fetched into `libs/`.
//!
//! # Architecture
//!
//! The library is organized into layers:
//!
//! - **Layer 1: Core Operations** - the template catalog, the write-if-absent
//!   materializer, command execution and the SDK fetcher
//! - **Layer 2: Workflow Orchestration** - `ProductConfig`, the config
//!   resolver and the `ProjectGenerator` pipeline
//! - **Layer 3: CLI/TUI Interface** - Optional cliclack-based framing (feature-gated)
//!
//! # Feature Flags
//!
//! - `tui` (default): Enables the cliclack-based front end
//!
//! # Example Usage (without TUI)
//!
//! ```ignore
//! use scaffolder_core::{config, ProjectGenerator, SystemRunner};
//! use scaffolder_core::prompt::LinePrompter;
//!
//! let mut prompter = LinePrompter::stdio();
//! let config = config::resolve(&MyProduct, &args, &mut prompter)?;
//! let runner = SystemRunner::new();
//! ProjectGenerator::new(&config, &runner).run(&mut prompter).await?;
//! ```

pub mod config;
pub mod error;
pub mod generator;
pub mod product;
pub mod prompt;
pub mod runtime;
pub mod sdk;
pub mod templates;

#[cfg(feature = "tui")]
pub mod tui;

// Re-export main types for convenience
pub use config::{Config, CreateArgs};
pub use error::ScaffoldError;
pub use generator::ProjectGenerator;
pub use product::ProductConfig;
pub use runtime::{CommandRunner, Invocation, SystemRunner};
pub use templates::{Content, Template, WriteOutcome};

#[cfg(feature = "tui")]
pub use tui::run;
