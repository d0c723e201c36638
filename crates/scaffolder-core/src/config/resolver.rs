//! Building a [`Config`] from command line flags or an interactive session

use super::Config;
use crate::error::ScaffoldError;
use crate::product::ProductConfig;
use crate::prompt::Prompter;
use anyhow::Result;
use std::io;
use std::path::{Path, PathBuf};
use url::Url;

/// Raw options for the generate command
#[derive(Debug, Clone)]
pub struct CreateArgs {
    /// Project directory to create
    pub dest: Option<PathBuf>,

    /// Project name (defaults to the directory name)
    pub name: Option<String>,

    /// Group id (defaults to the directory name)
    pub group: Option<String>,

    pub artifact: Option<String>,

    /// Never prompt; fail instead
    pub headless: bool,

    /// Ask for every setting instead of reading flags
    pub interactive: bool,

    /// Create the kotlin source trees
    pub kotlin: bool,

    /// Set up the gradle build
    pub gradle: bool,

    /// Gradle wrapper version; the product default when unset
    pub gradle_version: Option<String>,

    /// SDK endpoint; environment override or product default when unset
    pub sdk_endpoint: Option<String>,
}

impl Default for CreateArgs {
    fn default() -> Self {
        Self {
            dest: None,
            name: None,
            group: None,
            artifact: None,
            headless: false,
            interactive: false,
            kotlin: true,
            gradle: true,
            gradle_version: None,
            sdk_endpoint: None,
        }
    }
}

/// Resolve the run's configuration, asking through `prompter` where needed
///
/// The destination is validated before this returns; nothing is written.
pub fn resolve<C: ProductConfig, P: Prompter>(
    product: &C,
    args: &CreateArgs,
    prompter: &mut P,
) -> Result<Config> {
    let gradle_version = args
        .gradle_version
        .clone()
        .unwrap_or_else(|| product.default_wrapper_version().to_string());

    if args.interactive {
        return interactive(product, args, gradle_version, prompter);
    }

    let dest = match &args.dest {
        Some(dest) => {
            validate_destination(dest)?;
            dest.clone()
        }
        None => ask_destination(prompter)?,
    };
    let sdk_endpoint = resolve_endpoint(product, args.sdk_endpoint.as_deref())?;

    let fallback = default_name(&dest);
    Ok(Config {
        name: args.name.clone().unwrap_or_else(|| fallback.clone()),
        group: args.group.clone().unwrap_or(fallback),
        artifact: args.artifact.clone(),
        kotlin: args.kotlin,
        use_gradle: args.gradle,
        gradle_version,
        headless: args.headless,
        sdk_endpoint,
        dest,
    })
}

/// Question/answer session; only the wrapper version, endpoint and headless flag are taken from `args`
fn interactive<C: ProductConfig, P: Prompter>(
    product: &C,
    args: &CreateArgs,
    gradle_version: String,
    prompter: &mut P,
) -> Result<Config> {
    let dest = ask_destination(prompter)?;
    let sdk_endpoint = resolve_endpoint(product, args.sdk_endpoint.as_deref())?;

    let dir_name = default_name(&dest);
    let name = prompter.ask(
        &format!("Enter the project name [{}]: ", dir_name),
        Some(&dir_name),
    )?;

    let kotlin = prompter.confirm("Use kotlin for the project [Y/n]: ", true)?;
    let use_gradle = prompter.confirm("Use gradle for the project [Y/n]: ", true)?;

    let group = prompter.ask(
        &format!("Enter the project's group id [{}]: ", name),
        Some(&name),
    )?;
    let artifact = prompter.ask(
        &format!("Enter the project's artifact id [{}]: ", name),
        Some(&name),
    )?;

    Ok(Config {
        dest,
        name,
        group,
        artifact: Some(artifact),
        kotlin,
        use_gradle,
        gradle_version,
        headless: args.headless,
        sdk_endpoint,
    })
}

fn ask_destination<P: Prompter>(prompter: &mut P) -> Result<PathBuf> {
    let answer = prompter.ask("Enter the path for the new project: ", None)?;
    if answer.is_empty() {
        return Err(ScaffoldError::EmptyDestination.into());
    }
    let dest = PathBuf::from(answer);
    validate_destination(&dest)?;
    Ok(dest)
}

/// SDK endpoint from the flag, then the product's environment variable, then the product default
pub fn resolve_endpoint<C: ProductConfig>(product: &C, flag: Option<&str>) -> Result<String, ScaffoldError> {
    let endpoint = match flag {
        Some(value) => value.to_string(),
        None => std::env::var(product.sdk_endpoint_env())
            .ok()
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| product.default_sdk_endpoint().to_string()),
    };

    Url::parse(&endpoint).map_err(|e| ScaffoldError::InvalidEndpoint {
        endpoint: endpoint.clone(),
        reason: e.to_string(),
    })?;
    Ok(endpoint)
}

/// Reject a destination that is a file or that the current user cannot write or read
///
/// A path that does not exist yet is accepted.
pub fn validate_destination(path: &Path) -> Result<(), ScaffoldError> {
    let metadata = match std::fs::metadata(path) {
        Ok(metadata) => metadata,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(()),
        Err(_) => return Err(ScaffoldError::NotReadable(path.to_path_buf())),
    };

    if metadata.is_file() {
        return Err(ScaffoldError::IsFile(path.to_path_buf()));
    }
    if !is_writable(path, &metadata) {
        return Err(ScaffoldError::NotWritable(path.to_path_buf()));
    }
    if !is_readable(path) {
        return Err(ScaffoldError::NotReadable(path.to_path_buf()));
    }
    Ok(())
}

/// access(2) for the invoking user
#[cfg(unix)]
fn has_access(path: &Path, mode: libc::c_int) -> bool {
    use std::ffi::CString;
    use std::os::unix::ffi::OsStrExt;

    let Ok(c_path) = CString::new(path.as_os_str().as_bytes()) else {
        return false;
    };
    unsafe { libc::access(c_path.as_ptr(), mode) == 0 }
}

#[cfg(unix)]
fn is_writable(path: &Path, _metadata: &std::fs::Metadata) -> bool {
    has_access(path, libc::W_OK)
}

#[cfg(unix)]
fn is_readable(path: &Path) -> bool {
    has_access(path, libc::R_OK)
}

#[cfg(not(unix))]
fn is_writable(_path: &Path, metadata: &std::fs::Metadata) -> bool {
    !metadata.permissions().readonly()
}

#[cfg(not(unix))]
fn is_readable(path: &Path) -> bool {
    std::fs::read_dir(path).is_ok()
}

/// Directory-derived project name: the last path segment without extension
pub fn default_name(dest: &Path) -> String {
    if let Some(stem) = dest.file_stem() {
        return stem.to_string_lossy().into_owned();
    }

    // `.`, `..` and friends: name the directory they point at
    dest.canonicalize()
        .or_else(|_| std::path::absolute(dest))
        .ok()
        .and_then(|abs| abs.file_stem().map(|s| s.to_string_lossy().into_owned()))
        .unwrap_or_else(|| "project".to_string())
}
