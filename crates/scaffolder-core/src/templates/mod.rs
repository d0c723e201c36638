//! The closed catalog of generated files
//!
//! This module provides:
//! - [`Template`]: one variant per generated file, mapping to a fixed path
//!   under the project root and to its content
//! - [`materializer`]: the write-if-absent and ensure-directory primitives
//! - [`assets`]: resources embedded at compile time

pub mod assets;
pub mod materializer;

use anyhow::Result;
use std::borrow::Cow;
use std::path::Path;

pub use materializer::{ensure_dirs, write_if_absent, WriteOutcome};

/// POSIX wrapper launcher, relative to the project root
pub const GRADLEW: &str = "gradlew";
/// Windows wrapper launcher, relative to the project root
pub const GRADLEW_BAT: &str = "gradlew.bat";
pub const WRAPPER_DIR: &str = "gradle/wrapper";
pub const LIBS_DIR: &str = "libs";

/// A file the generator knows how to produce
///
/// Parameterized variants substitute their values for literal `{token}`
/// placeholders; there is no escaping, so a token appearing in the
/// surrounding text would be replaced as well.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Template {
    /// Root `.gitignore`
    Ignore,
    /// `libs/.gitignore`, ignoring the fetched SDK
    IgnoreLibs,
    /// `gradle.properties`
    Properties,
    /// `.travis.yml`; in the catalog but not generated by the pipeline
    Travis,
    /// `settings.gradle.kts` declaring the root project name
    Settings { name: String },
    GradlewSh,
    GradlewCmd,
    GradlewJar,
    GradlewProperties,
    /// `build.gradle.kts` with the SDK endpoint and group id filled in
    BuildScript { endpoint: String, group: String },
    Readme { project_name: String },
}

/// File content, either text or raw bytes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Content {
    Text(Cow<'static, str>),
    Binary(&'static [u8]),
}

impl Content {
    pub fn as_bytes(&self) -> &[u8] {
        match self {
            Content::Text(text) => text.as_bytes(),
            Content::Binary(bytes) => *bytes,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Content::Text(text) => Some(text.as_ref()),
            Content::Binary(_) => None,
        }
    }
}

impl Template {
    /// Output path relative to the project root
    pub fn path(&self) -> &'static str {
        match self {
            Template::Ignore => ".gitignore",
            Template::IgnoreLibs => "libs/.gitignore",
            Template::Properties => "gradle.properties",
            Template::Travis => ".travis.yml",
            Template::Settings { .. } => "settings.gradle.kts",
            Template::GradlewSh => GRADLEW,
            Template::GradlewCmd => GRADLEW_BAT,
            Template::GradlewJar => "gradle/wrapper/gradle-wrapper.jar",
            Template::GradlewProperties => "gradle/wrapper/gradle-wrapper.properties",
            Template::BuildScript { .. } => "build.gradle.kts",
            Template::Readme { .. } => "README.md",
        }
    }

    pub fn content(&self) -> Content {
        match self {
            Template::Ignore => Content::Text(Cow::Borrowed(assets::IGNORE)),
            Template::IgnoreLibs => Content::Text(Cow::Borrowed(assets::IGNORE_LIBS)),
            Template::Properties => Content::Text(Cow::Borrowed(assets::PROPERTIES)),
            Template::Travis => Content::Text(Cow::Borrowed(assets::TRAVIS)),
            Template::Settings { name } => {
                Content::Text(Cow::Owned(format!("rootProject.name = \"{}\"", name)))
            }
            Template::GradlewSh => Content::Text(Cow::Borrowed(assets::GRADLEW_SH)),
            Template::GradlewCmd => Content::Text(Cow::Borrowed(assets::GRADLEW_CMD)),
            Template::GradlewJar => Content::Binary(assets::GRADLE_WRAPPER_JAR),
            Template::GradlewProperties => {
                Content::Text(Cow::Borrowed(assets::GRADLE_WRAPPER_PROPERTIES))
            }
            Template::BuildScript { endpoint, group } => Content::Text(Cow::Owned(
                assets::BUILD_SCRIPT
                    .replace("{endpoint}", endpoint)
                    .replace("{group}", group),
            )),
            Template::Readme { project_name } => Content::Text(Cow::Owned(
                assets::README.replace("{projectname}", project_name),
            )),
        }
    }

    /// Launcher scripts get the executable bit after a fresh write
    pub fn is_executable(&self) -> bool {
        matches!(self, Template::GradlewSh | Template::GradlewCmd)
    }

    /// Write this template under `root` unless the file already exists
    pub async fn generate(&self, root: &Path) -> Result<WriteOutcome> {
        let outcome =
            materializer::write_if_absent(root, Path::new(self.path()), self.content().as_bytes())
                .await?;

        if let WriteOutcome::Written(path) = &outcome {
            if self.is_executable() {
                materializer::set_executable(path).await?;
            }
        }

        Ok(outcome)
    }

    /// The four files making up the gradle wrapper
    pub fn wrapper() -> [Template; 4] {
        [
            Template::GradlewSh,
            Template::GradlewCmd,
            Template::GradlewJar,
            Template::GradlewProperties,
        ]
    }
}
