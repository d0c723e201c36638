//! Running external commands (git, the gradle wrapper) on behalf of the generator
//!
//! Output goes straight to the operator's terminal. The exit status is not
//! checked and a missing program or a timeout only produces a warning: the
//! operator learns about failures from the command's own output.

use anyhow::Result;
use colored::Colorize;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command as TokioCommand;
use tokio::time::timeout;

/// Upper bound on a single external command (10 minutes)
pub const COMMAND_TIMEOUT: Duration = Duration::from_secs(10 * 60);

/// A command line and the directory to run it in
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub program: PathBuf,
    pub args: Vec<String>,
    pub cwd: PathBuf,
}

impl Invocation {
    pub fn new(program: impl Into<PathBuf>, args: &[&str], cwd: &Path) -> Self {
        Self {
            program: program.into(),
            args: args.iter().map(|a| a.to_string()).collect(),
            cwd: cwd.to_path_buf(),
        }
    }

    /// Command line as typed in a shell
    pub fn command_line(&self) -> String {
        let mut line = self.program.display().to_string();
        for arg in &self.args {
            line.push(' ');
            line.push_str(arg);
        }
        line
    }
}

/// Executes invocations, blocking the pipeline until each one ends
#[allow(async_fn_in_trait)]
pub trait CommandRunner {
    async fn run(&self, invocation: &Invocation) -> Result<()>;
}

/// Runs commands as child processes with inherited stdio and a bounded wait
pub struct SystemRunner {
    timeout: Duration,
}

impl SystemRunner {
    pub fn new() -> Self {
        Self::with_timeout(COMMAND_TIMEOUT)
    }

    pub fn with_timeout(timeout: Duration) -> Self {
        Self { timeout }
    }
}

impl Default for SystemRunner {
    fn default() -> Self {
        Self::new()
    }
}

impl CommandRunner for SystemRunner {
    async fn run(&self, invocation: &Invocation) -> Result<()> {
        let cmd = invocation.command_line();
        println!("{} {}", "Running:".dimmed(), cmd.yellow());

        let mut child = match TokioCommand::new(&invocation.program)
            .args(&invocation.args)
            .current_dir(&invocation.cwd)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .kill_on_drop(true)
            .spawn()
        {
            Ok(child) => child,
            Err(e) => {
                eprintln!("{} could not start `{}`: {}", "Warning:".yellow(), cmd, e);
                return Ok(());
            }
        };

        match timeout(self.timeout, child.wait()).await {
            Ok(Ok(status)) => {
                tracing::debug!(command = %cmd, %status, "command finished");
            }
            Ok(Err(e)) => {
                eprintln!("{} failed to wait for `{}`: {}", "Warning:".yellow(), cmd, e);
            }
            Err(_) => {
                // Kill the process on timeout
                let _ = child.kill().await;
                eprintln!(
                    "{} `{}` did not finish within {} seconds and was stopped.",
                    "Warning:".yellow(),
                    cmd,
                    self.timeout.as_secs()
                );
            }
        }

        Ok(())
    }
}

/// Runner recording invocations instead of spawning them, for tests
#[cfg(test)]
#[derive(Default)]
pub(crate) struct RecordingRunner {
    invocations: std::sync::Mutex<Vec<Invocation>>,
}

#[cfg(test)]
impl RecordingRunner {
    pub fn invocations(&self) -> Vec<Invocation> {
        self.invocations.lock().unwrap().clone()
    }
}

#[cfg(test)]
impl CommandRunner for RecordingRunner {
    async fn run(&self, invocation: &Invocation) -> Result<()> {
        self.invocations.lock().unwrap().push(invocation.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_command_line() {
        let inv = Invocation::new("git", &["init"], Path::new("demo"));
        assert_eq!(inv.command_line(), "git init");
        assert_eq!(inv.cwd, PathBuf::from("demo"));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_runs_in_working_directory() {
        let tmp = TempDir::new().unwrap();
        let inv = Invocation::new("sh", &["-c", "touch marker"], tmp.path());

        SystemRunner::new().run(&inv).await.unwrap();

        assert!(tmp.path().join("marker").exists());
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_failing_command_is_not_an_error() {
        let tmp = TempDir::new().unwrap();
        let inv = Invocation::new("sh", &["-c", "exit 3"], tmp.path());
        assert!(SystemRunner::new().run(&inv).await.is_ok());
    }

    #[tokio::test]
    async fn test_missing_program_is_not_an_error() {
        let tmp = TempDir::new().unwrap();
        let inv = Invocation::new("definitely-not-an-installed-tool-7f3a", &[], tmp.path());
        assert!(SystemRunner::new().run(&inv).await.is_ok());
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_timeout_stops_the_command() {
        let tmp = TempDir::new().unwrap();
        let inv = Invocation::new("sh", &["-c", "sleep 5; touch late"], tmp.path());
        let runner = SystemRunner::with_timeout(Duration::from_millis(200));

        let started = std::time::Instant::now();
        runner.run(&inv).await.unwrap();

        assert!(started.elapsed() < Duration::from_secs(4));
        assert!(!tmp.path().join("late").exists());
    }
}
