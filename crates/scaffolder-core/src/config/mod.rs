//! Project configuration and its resolution from flags or prompts
//!
//! A [`Config`] is built exactly once per run by [`resolve`], before anything
//! touches the filesystem, and is only read afterwards.

pub mod resolver;
pub mod version;

use std::path::PathBuf;

pub use resolver::{default_name, resolve, resolve_endpoint, validate_destination, CreateArgs};

/// Fully resolved generation settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Project root; created if missing
    pub dest: PathBuf,
    /// Root project name, also substituted into the readme
    pub name: String,
    /// Group id written into the build script
    pub group: String,
    pub artifact: Option<String>,
    /// Create `src/{main,test}/kotlin` next to the java trees
    pub kotlin: bool,
    /// Generate the gradle build, wrapper and SDK download
    pub use_gradle: bool,
    /// Version handed to `gradlew wrapper --gradle-version`
    pub gradle_version: String,
    /// Never ask; abort instead
    pub headless: bool,
    /// Where the SDK archive is downloaded from
    pub sdk_endpoint: String,
}
