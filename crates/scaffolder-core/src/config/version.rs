//! Gradle wrapper version checks

use semver::Version;

/// Oldest Gradle release that evaluates `build.gradle.kts` with the plugins block we generate
pub const MIN_KOTLIN_DSL_GRADLE: &str = "4.10";

/// Parse a Gradle version string, padding missing components (`4.10` -> `4.10.0`)
///
/// Gradle versions are not semver; suffixes like `-rc-1` are kept as pre-release.
pub fn parse_gradle_version(version_str: &str) -> Option<Version> {
    let cleaned = version_str.trim().strip_prefix('v').unwrap_or(version_str.trim());
    let (core, pre) = match cleaned.split_once('-') {
        Some((core, pre)) => (core, Some(pre)),
        None => (cleaned, None),
    };

    let mut parts: Vec<&str> = core.split('.').collect();
    if parts.is_empty() || parts.len() > 3 {
        return None;
    }
    while parts.len() < 3 {
        parts.push("0");
    }

    let mut normalized = parts.join(".");
    if let Some(pre) = pre {
        normalized.push('-');
        normalized.push_str(pre);
    }
    Version::parse(&normalized).ok()
}

/// Warn when the requested wrapper version cannot run the generated build script
/// Returns None when the version is recent enough or cannot be parsed
pub fn check_wrapper_version(requested: &str) -> Option<String> {
    let requested_ver = parse_gradle_version(requested)?;
    let minimum = parse_gradle_version(MIN_KOTLIN_DSL_GRADLE)?;

    if requested_ver < minimum {
        Some(format!(
            "Gradle {} is older than {}, the first release able to run the generated build.gradle.kts.",
            requested, MIN_KOTLIN_DSL_GRADLE
        ))
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_pads_components() {
        assert_eq!(parse_gradle_version("4.10"), Some(Version::new(4, 10, 0)));
        assert_eq!(parse_gradle_version("5"), Some(Version::new(5, 0, 0)));
        assert_eq!(parse_gradle_version("v4.10.3"), Some(Version::new(4, 10, 3)));
    }

    #[test]
    fn test_parse_keeps_release_candidates_below_release() {
        let rc = parse_gradle_version("5.0-rc-1").unwrap();
        assert!(rc < Version::new(5, 0, 0));
        assert!(rc > Version::new(4, 10, 0));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(parse_gradle_version("latest").is_none());
        assert!(parse_gradle_version("1.2.3.4").is_none());
    }

    #[test]
    fn test_old_wrapper_warns() {
        let warning = check_wrapper_version("4.6");
        assert!(warning.is_some());
        assert!(warning.unwrap().contains("4.10"));
    }

    #[test]
    fn test_supported_wrapper_does_not_warn() {
        assert!(check_wrapper_version("4.10").is_none());
        assert!(check_wrapper_version("5.2.1").is_none());
    }

    #[test]
    fn test_unparseable_wrapper_does_not_warn() {
        assert!(check_wrapper_version("nightly").is_none());
    }
}
