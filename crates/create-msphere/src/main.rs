//! create-msphere CLI - Project scaffolding for MindSphere applications

use anyhow::Result;
use clap::{Args as ClapArgs, Parser, Subcommand};
use scaffolder_core::runtime::host_wrapper_launcher;
use scaffolder_core::{Config, CreateArgs, ProductConfig, ScaffoldError};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// CLI version
pub const CLI_VERSION: &str = env!("CARGO_PKG_VERSION");

/// MindSphere Java SDK archive
const SDK_ENDPOINT: &str = "https://support.industry.siemens.com/dl/files/603/109757603/att_972175/v1/mindsphere-sdk-java-v2.1.0.zip?download=true";

/// MindSphere product configuration
#[derive(Clone)]
pub struct MsphereConfig;

impl ProductConfig for MsphereConfig {
    fn name(&self) -> &'static str {
        "create-msphere"
    }

    fn display_name(&self) -> &'static str {
        "MindSphere"
    }

    fn default_sdk_endpoint(&self) -> &'static str {
        SDK_ENDPOINT
    }

    fn sdk_endpoint_env(&self) -> &'static str {
        "MSPHERE_SDK_ENDPOINT"
    }

    fn default_wrapper_version(&self) -> &'static str {
        "4.10"
    }

    fn sdk_prefix(&self) -> &'static str {
        "mindsphere-sdk"
    }

    fn cli_description(&self) -> &'static str {
        "CLI for scaffolding MindSphere Java/Kotlin projects"
    }

    fn next_steps(&self, dir: &Path, config: &Config) -> Vec<String> {
        let mut steps = Vec::new();
        let current = std::env::current_dir().ok();

        // Step 1: cd to directory if not current
        if current.as_ref() != Some(&dir.to_path_buf()) {
            steps.push(format!("cd {}", dir.display()));
        }

        // Step 2: Build, or read up when there is no build yet
        if config.use_gradle {
            let launcher = match host_wrapper_launcher() {
                "gradlew" => "./gradlew",
                other => other,
            };
            steps.push(format!("{} build", launcher));
        } else {
            steps.push("Open README.md to get started".to_string());
        }

        steps
    }
}

#[derive(Parser, Debug)]
#[command(name = "create-msphere")]
#[command(about = "CLI for scaffolding MindSphere Java/Kotlin projects")]
#[command(disable_version_flag = true)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Command>,

    #[command(flatten)]
    pub create: CliCreateArgs,

    /// Print diagnostic output (RUST_LOG takes precedence)
    #[arg(long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Download and unpack the SDK into an existing project without gradle
    FetchSdk(FetchSdkArgs),
}

#[derive(ClapArgs, Debug)]
pub struct CliCreateArgs {
    /// The path for the new project
    #[arg(short, long)]
    pub dest: Option<PathBuf>,

    /// The name of the new project
    #[arg(short, long)]
    pub name: Option<String>,

    /// The group name
    #[arg(short = 'p', long)]
    pub group: Option<String>,

    /// The artifact name of the project
    #[arg(short, long)]
    pub artifact: Option<String>,

    /// Never prompt; fail if the destination already exists
    #[arg(short = 'l', long)]
    pub headless: bool,

    /// Output the version number
    #[arg(short = 'v', long)]
    pub version: bool,

    /// Create a new project interactively
    #[arg(short, long)]
    pub interactive: bool,

    /// Skip the kotlin source directories
    #[arg(short = 'k', long = "no-kotlin")]
    pub no_kotlin: bool,

    /// Skip the gradle build, wrapper and SDK download
    #[arg(short = 'g', long = "no-gradle")]
    pub no_gradle: bool,

    /// The targeted gradle wrapper version [default: 4.10]
    #[arg(short, long)]
    pub wrapper: Option<String>,

    /// The url endpoint of the sdk (or MSPHERE_SDK_ENDPOINT)
    #[arg(short, long)]
    pub endpoint: Option<String>,
}

impl From<CliCreateArgs> for CreateArgs {
    fn from(args: CliCreateArgs) -> Self {
        CreateArgs {
            dest: args.dest,
            name: args.name,
            group: args.group,
            artifact: args.artifact,
            headless: args.headless,
            interactive: args.interactive,
            kotlin: !args.no_kotlin,
            gradle: !args.no_gradle,
            gradle_version: args.wrapper,
            sdk_endpoint: args.endpoint,
        }
    }
}

#[derive(ClapArgs, Debug)]
pub struct FetchSdkArgs {
    /// Project directory to fetch into
    #[arg(short, long, default_value = ".")]
    pub dest: PathBuf,

    /// The url endpoint of the sdk (or MSPHERE_SDK_ENDPOINT)
    #[arg(short, long)]
    pub endpoint: Option<String>,
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .without_time()
        .init();
}

/// `--version` output; the status is non-zero on purpose, scripts rely on it
fn version_report() -> (u8, String) {
    (1, format!("create-msphere version \"{}\"", CLI_VERSION))
}

/// Exit status for a finished run, and the message to print on stderr
///
/// A declined confirmation fails without a message; the prompt said enough.
fn exit_report(result: &Result<()>) -> (u8, Option<String>) {
    match result {
        Ok(()) => (0, None),
        Err(e) => {
            let silent = e
                .downcast_ref::<ScaffoldError>()
                .is_some_and(ScaffoldError::is_silent);
            (1, (!silent).then(|| format!("Error: {:#}", e)))
        }
    }
}

async fn fetch_sdk(config: &MsphereConfig, args: FetchSdkArgs) -> Result<()> {
    scaffolder_core::config::validate_destination(&args.dest)?;
    let endpoint = scaffolder_core::config::resolve_endpoint(config, args.endpoint.as_deref())?;
    scaffolder_core::tui::fetch_sdk(config, &endpoint, &args.dest).await
}

#[tokio::main]
async fn main() -> ExitCode {
    // Ensure terminal cursor is restored on panic
    let default_panic = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = console::Term::stderr().show_cursor();
        default_panic(info);
    }));

    // Handle Ctrl+C gracefully
    ctrlc::set_handler(move || {
        let _ = console::Term::stderr().show_cursor();
        std::process::exit(130);
    })
    .ok();

    let args = Args::parse();
    init_tracing(args.verbose);

    if args.create.version {
        let (status, line) = version_report();
        println!("{}", line);
        return ExitCode::from(status);
    }

    let config = MsphereConfig;
    let result = match args.command {
        Some(Command::FetchSdk(fetch_args)) => fetch_sdk(&config, fetch_args).await,
        None => scaffolder_core::run(&config, args.create.into()).await,
    };

    // Ensure cursor is visible on normal exit
    let _ = console::Term::stderr().show_cursor();

    let (status, message) = exit_report(&result);
    if let Some(message) = message {
        eprintln!("{}", message);
    }
    ExitCode::from(status)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_flags() {
        let args = Args::try_parse_from([
            "create-msphere",
            "-d",
            "demo",
            "-n",
            "Demo",
            "-p",
            "com.example",
            "-l",
            "-k",
            "-w",
            "5.0",
        ])
        .unwrap();
        let create: CreateArgs = args.create.into();

        assert_eq!(create.dest, Some(PathBuf::from("demo")));
        assert_eq!(create.name.as_deref(), Some("Demo"));
        assert_eq!(create.group.as_deref(), Some("com.example"));
        assert!(create.headless);
        assert!(!create.kotlin);
        assert!(create.gradle);
        assert_eq!(create.gradle_version.as_deref(), Some("5.0"));
        assert!(!create.interactive);
    }

    #[test]
    fn test_defaults_enable_kotlin_and_gradle() {
        let args = Args::try_parse_from(["create-msphere"]).unwrap();
        assert!(args.command.is_none());
        assert!(!args.create.version);

        let create: CreateArgs = args.create.into();
        assert!(create.kotlin);
        assert!(create.gradle);
        assert!(create.sdk_endpoint.is_none());
    }

    #[test]
    fn test_version_flag_is_ours() {
        let args = Args::try_parse_from(["create-msphere", "--version"]).unwrap();
        assert!(args.create.version);
        let args = Args::try_parse_from(["create-msphere", "-v"]).unwrap();
        assert!(args.create.version);
    }

    #[test]
    fn test_fetch_sdk_subcommand() {
        let args = Args::try_parse_from([
            "create-msphere",
            "fetch-sdk",
            "--dest",
            "demo",
            "--verbose",
        ])
        .unwrap();
        assert!(args.verbose);
        match args.command {
            Some(Command::FetchSdk(fetch)) => {
                assert_eq!(fetch.dest, PathBuf::from("demo"));
                assert!(fetch.endpoint.is_none());
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_next_steps_without_gradle() {
        let config = Config {
            dest: PathBuf::from("somewhere-else"),
            name: "demo".to_string(),
            group: "demo".to_string(),
            artifact: None,
            kotlin: true,
            use_gradle: false,
            gradle_version: "4.10".to_string(),
            headless: false,
            sdk_endpoint: SDK_ENDPOINT.to_string(),
        };
        let steps = MsphereConfig.next_steps(&config.dest, &config);
        assert_eq!(steps, ["cd somewhere-else", "Open README.md to get started"]);
    }

    #[test]
    fn test_version_exits_non_zero() {
        let (status, line) = version_report();
        assert_eq!(status, 1);
        assert_eq!(line, format!("create-msphere version \"{}\"", CLI_VERSION));
    }

    #[test]
    fn test_success_exits_zero_quietly() {
        assert_eq!(exit_report(&Ok(())), (0, None));
    }

    #[test]
    fn test_declined_exits_non_zero_without_message() {
        let result: Result<()> = Err(ScaffoldError::Declined.into());
        assert_eq!(exit_report(&result), (1, None));
    }

    #[test]
    fn test_failure_exits_non_zero_with_message() {
        let result: Result<()> = Err(ScaffoldError::IsFile(PathBuf::from("notes.txt")).into());
        assert_eq!(
            exit_report(&result),
            (1, Some("Error: notes.txt is a file.".to_string()))
        );

        let result: Result<()> =
            Err(anyhow::anyhow!("disk full").context("Failed to write file: demo/README.md"));
        let (status, message) = exit_report(&result);
        assert_eq!(status, 1);
        assert_eq!(
            message.as_deref(),
            Some("Error: Failed to write file: demo/README.md: disk full")
        );
    }

    #[test]
    fn test_default_endpoint_is_a_url() {
        assert!(scaffolder_core::config::resolve_endpoint(&MsphereConfig, Some(SDK_ENDPOINT)).is_ok());
    }
}
