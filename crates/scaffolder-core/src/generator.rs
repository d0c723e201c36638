//! The generation pipeline
//!
//! Steps run strictly in order, each one relying on what the previous ones
//! created: source trees and `libs/`, the readme, git, then (with gradle)
//! the build files, the wrapper, the wrapper bootstrap and the SDK download.
//! Every write goes through [`crate::templates::materializer`], so a failed
//! run can simply be repeated; nothing is rolled back.

use crate::config::Config;
use crate::error::ScaffoldError;
use crate::prompt::Prompter;
use crate::runtime::check::host_wrapper_launcher;
use crate::runtime::command::{CommandRunner, Invocation};
use crate::templates::{ensure_dirs, Template, LIBS_DIR, WRAPPER_DIR};
use anyhow::{Context, Result};
use colored::Colorize;
use std::path::Path;
use walkdir::WalkDir;

/// Source trees every project gets
pub const BASE_SOURCE_DIRS: &[&str] = &[
    "src/main/java",
    "src/main/resources",
    "src/test/java",
    "src/test/resources",
];

/// Extra source trees when kotlin is enabled
pub const KOTLIN_SOURCE_DIRS: &[&str] = &["src/main/kotlin", "src/test/kotlin"];

/// Gradle task that downloads and unpacks the SDK into `libs/`
pub const SDK_TASK: &str = "getSDK";

/// Drives one generation run for one [`Config`]
pub struct ProjectGenerator<'a, R: CommandRunner> {
    config: &'a Config,
    runner: &'a R,
}

impl<'a, R: CommandRunner> ProjectGenerator<'a, R> {
    pub fn new(config: &'a Config, runner: &'a R) -> Self {
        Self { config, runner }
    }

    /// Confirm before generating into an existing directory, then generate
    pub async fn run<P: Prompter>(&self, prompter: &mut P) -> Result<()> {
        self.precheck(prompter)?;
        self.generate().await
    }

    /// An existing destination aborts headless runs and needs a yes otherwise
    pub fn precheck<P: Prompter>(&self, prompter: &mut P) -> Result<()> {
        let dest = &self.config.dest;
        if !dest.exists() {
            return Ok(());
        }

        if self.config.headless {
            return Err(ScaffoldError::DestinationExists(dest.clone()).into());
        }

        let answer = prompter.ask(
            &format!(
                "Targeted directory `{}` already exists. Want to continue anyway? [Y/n] ",
                dest.display()
            ),
            None,
        )?;
        match answer.to_lowercase().as_str() {
            "" | "y" | "yes" => Ok(()),
            _ => Err(ScaffoldError::Declined.into()),
        }
    }

    /// Run every generation step against the destination
    pub async fn generate(&self) -> Result<()> {
        self.gen_src().await?;
        Template::Readme {
            project_name: self.config.name.clone(),
        }
        .generate(&self.config.dest)
        .await?;

        self.init_git().await?;
        if self.config.use_gradle {
            self.gen_gradle().await?;
        }
        Ok(())
    }

    /// Source trees and the `libs/` directory
    async fn gen_src(&self) -> Result<()> {
        let dest = &self.config.dest;
        if self.config.kotlin {
            ensure_dirs(dest, KOTLIN_SOURCE_DIRS).await?;
        }
        ensure_dirs(dest, &[LIBS_DIR]).await?;
        ensure_dirs(dest, BASE_SOURCE_DIRS).await
    }

    /// Ignore files, then `git init`
    async fn init_git(&self) -> Result<()> {
        let dest = &self.config.dest;
        Template::Ignore.generate(dest).await?;
        Template::IgnoreLibs.generate(dest).await?;
        self.runner
            .run(&Invocation::new("git", &["init"], dest))
            .await
    }

    /// Build files, wrapper, wrapper bootstrap and SDK download
    async fn gen_gradle(&self) -> Result<()> {
        let dest = &self.config.dest;

        Template::Properties.generate(dest).await?;
        ensure_dirs(dest, &[WRAPPER_DIR]).await?;
        Template::Settings {
            name: self.config.name.clone(),
        }
        .generate(dest)
        .await?;
        Template::BuildScript {
            endpoint: self.config.sdk_endpoint.clone(),
            group: self.config.group.clone(),
        }
        .generate(dest)
        .await?;

        for template in Template::wrapper() {
            template.generate(dest).await?;
        }

        println!("{}", "installing gradle wrapper...".cyan());
        let wrapper = self.gradlew(&[
            "wrapper",
            "--gradle-version",
            self.config.gradle_version.as_str(),
        ])?;
        self.runner.run(&wrapper).await?;

        println!("{}", "downloading SDK...".cyan());
        let fetch = self.gradlew(&[SDK_TASK])?;
        self.runner.run(&fetch).await
    }

    /// Invocation of the project's wrapper launcher for this host
    fn gradlew(&self, args: &[&str]) -> Result<Invocation> {
        let dest = &self.config.dest;
        let launcher = std::path::absolute(dest.join(host_wrapper_launcher()))
            .with_context(|| format!("Failed to resolve wrapper in {}", dest.display()))?;
        Ok(Invocation::new(launcher, args, dest))
    }
}

/// Number of files below `root`, directories excluded
pub fn count_files(root: &Path) -> usize {
    WalkDir::new(root)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file())
        .count()
}
