//! Host detection: which tools are installed and which wrapper launcher to use

use crate::templates::{GRADLEW, GRADLEW_BAT};
use std::process::Command;

/// Runtime detection result
#[derive(Debug, Clone)]
pub struct RuntimeInfo {
    pub name: &'static str,
    pub version: Option<String>,
    pub available: bool,
}

/// Run `program args` and take the first line it prints as the version
fn probe(name: &'static str, program: &str, args: &[&str]) -> RuntimeInfo {
    let output = Command::new(program).args(args).output();

    match output {
        Ok(out) if out.status.success() => {
            // `java -version` reports on stderr
            let text = if out.stdout.is_empty() {
                String::from_utf8_lossy(&out.stderr).into_owned()
            } else {
                String::from_utf8_lossy(&out.stdout).into_owned()
            };
            RuntimeInfo {
                name,
                version: text.lines().next().map(|l| l.trim().to_string()),
                available: true,
            }
        }
        _ => RuntimeInfo {
            name,
            version: None,
            available: false,
        },
    }
}

/// Check if git is available
pub fn check_git() -> RuntimeInfo {
    probe("Git", "git", &["--version"])
}

/// Check if a Java runtime is available (needed by the gradle wrapper)
pub fn check_java() -> RuntimeInfo {
    probe("Java", "java", &["-version"])
}

/// Tools the pipeline will shell out to; advisory only, nothing fails on absence
pub fn check_host_tools(use_gradle: bool) -> Vec<RuntimeInfo> {
    let mut results = vec![check_git()];
    if use_gradle {
        results.push(check_java());
    }
    results
}

/// Wrapper launcher for the given `std::env::consts::OS` value
pub fn wrapper_launcher(os: &str) -> &'static str {
    if os.to_lowercase().starts_with("windows") {
        GRADLEW_BAT
    } else {
        GRADLEW
    }
}

/// Wrapper launcher for the host this process runs on
pub fn host_wrapper_launcher() -> &'static str {
    wrapper_launcher(std::env::consts::OS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrapper_launcher_by_os() {
        assert_eq!(wrapper_launcher("windows"), "gradlew.bat");
        assert_eq!(wrapper_launcher("linux"), "gradlew");
        assert_eq!(wrapper_launcher("macos"), "gradlew");
    }

    #[test]
    fn test_host_wrapper_launcher_matches_target() {
        let expected = if cfg!(windows) { "gradlew.bat" } else { "gradlew" };
        assert_eq!(host_wrapper_launcher(), expected);
    }

    #[test]
    fn test_missing_tool_is_reported_unavailable() {
        let info = probe("Nope", "definitely-not-an-installed-tool-7f3a", &["--version"]);
        assert!(!info.available);
        assert!(info.version.is_none());
    }

    #[test]
    fn test_java_is_only_checked_with_gradle() {
        let tools = check_host_tools(false);
        assert_eq!(tools.len(), 1);
        assert_eq!(tools[0].name, "Git");
        assert_eq!(check_host_tools(true).len(), 2);
    }
}
