//! Charm-style framing around the generator using cliclack

use crate::config::{self, version, CreateArgs};
use crate::generator::{count_files, ProjectGenerator};
use crate::product::ProductConfig;
use crate::prompt::LinePrompter;
use crate::runtime::check;
use crate::runtime::command::SystemRunner;
use crate::sdk::{SdkFetcher, Unpacked};
use anyhow::Result;
use std::path::Path;

/// Resolve the configuration, generate the project and print next steps
pub async fn run<C: ProductConfig>(product: &C, args: CreateArgs) -> Result<()> {
    cliclack::intro(product.name())?;

    // Step 1: Resolve and validate the configuration
    let mut prompter = LinePrompter::stdio();
    let config = config::resolve(product, &args, &mut prompter)?;

    cliclack::log::info(format!(
        "Project {} (group {}) in {}",
        config.name,
        config.group,
        config.dest.display()
    ))?;

    // Step 2: Check host tools (advisory)
    check_tools(config.use_gradle)?;

    // Check wrapper version
    if config.use_gradle {
        if let Some(warning) = version::check_wrapper_version(&config.gradle_version) {
            cliclack::log::warning(warning)?;
        }
    }

    // Step 3: Generate
    let runner = SystemRunner::new();
    ProjectGenerator::new(&config, &runner)
        .run(&mut prompter)
        .await?;

    cliclack::log::success(format!(
        "Created {} files in {}",
        count_files(&config.dest),
        config.dest.display()
    ))?;

    // Step 4: Show next steps
    print_next_steps(product, &config)?;

    Ok(())
}

/// Download and unpack the SDK into an existing project without gradle
pub async fn fetch_sdk<C: ProductConfig>(product: &C, endpoint: &str, project: &Path) -> Result<()> {
    cliclack::intro(format!("{} SDK", product.display_name()))?;

    let fetcher = SdkFetcher::new(endpoint, product.sdk_prefix(), product.user_agent())?;
    match fetcher.fetch(project).await? {
        Unpacked::AlreadyExtracted(dir) => {
            cliclack::log::info(format!("SDK already unpacked in {}", dir.display()))?;
        }
        Unpacked::Extracted { files } => {
            cliclack::log::success(format!("Unpacked {} SDK files", files.len()))?;
        }
        Unpacked::Nothing => {
            cliclack::log::warning("No SDK archive found, nothing unpacked")?;
        }
    }

    cliclack::outro("Done")?;
    Ok(())
}

fn check_tools(use_gradle: bool) -> Result<()> {
    for tool in check::check_host_tools(use_gradle) {
        if tool.available {
            cliclack::log::success(format!(
                "{} installed ({})",
                tool.name,
                tool.version.as_deref().unwrap_or("unknown")
            ))?;
        } else {
            cliclack::log::warning(format!("{} is not installed", tool.name))?;
        }
    }
    Ok(())
}

fn print_next_steps<C: ProductConfig>(product: &C, config: &config::Config) -> Result<()> {
    let steps = product.next_steps(&config.dest, config);

    println!();
    println!("  Next steps");
    println!();

    for (i, step) in steps.iter().enumerate() {
        println!("  {}.  {}", i + 1, step);
    }

    cliclack::outro("Happy coding!")?;

    Ok(())
}
