//! SDK archive download and unpacking
//!
//! Mirrors the `getSDK` task of the generated build script: the archive is
//! downloaded into `libs/` unless it is already there, then unpacked unless
//! an extracted SDK directory already exists. Finding neither is not an
//! error; there is simply nothing to unpack.

use crate::templates::LIBS_DIR;
use anyhow::{Context, Result};
use colored::Colorize;
use std::io::{Cursor, Read};
use std::path::{Path, PathBuf};
use tokio::fs;
use url::Url;
use zip::ZipArchive;

/// Archive location relative to the project root
pub const SDK_ARCHIVE: &str = "libs/mindsphere-sdk.zip";

/// Result of [`SdkFetcher::unpack`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Unpacked {
    /// A directory with the SDK prefix was already present
    AlreadyExtracted(PathBuf),
    /// The archive was extracted; paths of the files written
    Extracted { files: Vec<PathBuf> },
    /// Neither an archive nor an extracted SDK was found
    Nothing,
}

/// Downloads an SDK archive and unpacks it into a project
pub struct SdkFetcher {
    url: Url,
    prefix: String,
    client: reqwest::Client,
}

impl SdkFetcher {
    /// Create a fetcher with a custom user agent
    ///
    /// `prefix` is the name prefix of the directory the archive unpacks to.
    pub fn new(url: &str, prefix: &str, user_agent: &str) -> Result<Self> {
        let url = Url::parse(url).with_context(|| format!("Invalid SDK URL: {}", url))?;
        let client = reqwest::Client::builder()
            .user_agent(user_agent)
            .build()
            .with_context(|| format!("Failed to build HTTP client for {}", url))?;
        Ok(Self {
            url,
            prefix: prefix.to_string(),
            client,
        })
    }

    /// Download into `libs/` and unpack there
    pub async fn fetch(&self, project_root: &Path) -> Result<Unpacked> {
        let archive = project_root.join(SDK_ARCHIVE);
        let lib_dir = project_root.join(LIBS_DIR);

        fs::create_dir_all(&lib_dir)
            .await
            .with_context(|| format!("Failed to create directory: {}", lib_dir.display()))?;

        self.download(&archive).await?;
        self.unpack(&archive, &lib_dir).await
    }

    /// Download the archive to `archive` unless a file already exists there
    ///
    /// Returns whether a download happened. An interrupted transfer leaves a
    /// partial file behind which must be removed by hand.
    pub async fn download(&self, archive: &Path) -> Result<bool> {
        if fs::try_exists(archive).await.unwrap_or(false) {
            tracing::debug!(archive = %archive.display(), "archive present, download skipped");
            return Ok(false);
        }

        println!("{} {}", "Downloading:".dimmed(), self.url.as_str().yellow());
        let response = self
            .client
            .get(self.url.clone())
            .send()
            .await
            .with_context(|| format!("Failed to fetch SDK from {}", self.url))?;

        if !response.status().is_success() {
            anyhow::bail!(
                "Failed to fetch SDK from {}: HTTP {}",
                self.url,
                response.status()
            );
        }

        let bytes = response.bytes().await?;
        fs::write(archive, &bytes)
            .await
            .with_context(|| format!("Failed to write {}", archive.display()))?;

        tracing::debug!(archive = %archive.display(), bytes = bytes.len(), "archive downloaded");
        Ok(true)
    }

    /// Unpack `archive` into `lib_dir`, unless an extracted SDK is already there
    pub async fn unpack(&self, archive: &Path, lib_dir: &Path) -> Result<Unpacked> {
        if let Some(dir) = self.find_extracted(lib_dir).await? {
            tracing::debug!(dir = %dir.display(), "SDK already extracted");
            return Ok(Unpacked::AlreadyExtracted(dir));
        }

        let is_file = fs::metadata(archive)
            .await
            .map(|m| m.is_file())
            .unwrap_or(false);
        if !is_file {
            tracing::debug!(archive = %archive.display(), "no SDK archive, nothing to unpack");
            return Ok(Unpacked::Nothing);
        }

        let bytes = fs::read(archive)
            .await
            .with_context(|| format!("Failed to read {}", archive.display()))?;
        let files = extract_zip(&bytes, lib_dir)
            .await
            .with_context(|| format!("Failed to unpack {}", archive.display()))?;

        Ok(Unpacked::Extracted { files })
    }

    async fn find_extracted(&self, lib_dir: &Path) -> Result<Option<PathBuf>> {
        let mut entries = match fs::read_dir(lib_dir).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(e).with_context(|| format!("Failed to list {}", lib_dir.display()))
            }
        };

        while let Some(entry) = entries.next_entry().await? {
            let is_dir = entry.file_type().await.map(|t| t.is_dir()).unwrap_or(false);
            if is_dir && entry.file_name().to_string_lossy().starts_with(&self.prefix) {
                return Ok(Some(entry.path()));
            }
        }
        Ok(None)
    }

    pub fn url(&self) -> &Url {
        &self.url
    }
}

/// Write every file entry of a zip below `target`, skipping entries that would escape it
async fn extract_zip(zip_bytes: &[u8], target: &Path) -> Result<Vec<PathBuf>> {
    let mut archive = ZipArchive::new(Cursor::new(zip_bytes)).context("Not a zip archive")?;
    let mut written = Vec::new();

    for i in 0..archive.len() {
        let (relative, contents) = {
            let mut file = archive.by_index(i)?;
            // Skip directories
            if file.is_dir() {
                continue;
            }
            let Some(relative) = file.enclosed_name() else {
                tracing::warn!(entry = file.name(), "zip entry outside the target, skipped");
                continue;
            };
            let mut contents = Vec::new();
            file.read_to_end(&mut contents)?;
            (relative, contents)
        };

        let path = target.join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .await
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }
        fs::write(&path, &contents)
            .await
            .with_context(|| format!("Failed to write file: {}", path.display()))?;
        written.push(path);
    }

    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;
    use zip::write::SimpleFileOptions;
    use zip::ZipWriter;

    // Nothing listens on the discard port; any request would fail
    const UNREACHABLE: &str = "http://127.0.0.1:9/mindsphere-sdk-java-v2.1.0.zip";

    fn fetcher() -> SdkFetcher {
        SdkFetcher::new(UNREACHABLE, "mindsphere-sdk", "scaffolder-core-tests").unwrap()
    }

    fn sdk_zip() -> Vec<u8> {
        let mut buffer = Vec::new();
        {
            let mut zip = ZipWriter::new(Cursor::new(&mut buffer));
            let options =
                SimpleFileOptions::default().compression_method(zip::CompressionMethod::Deflated);
            zip.start_file("mindsphere-sdk-java-v2.1.0/core/sdk-core.jar", options)
                .unwrap();
            zip.write_all(b"jar bytes").unwrap();
            zip.start_file("mindsphere-sdk-java-v2.1.0/README.txt", options)
                .unwrap();
            zip.write_all(b"readme").unwrap();
            zip.finish().unwrap();
        }
        buffer
    }

    #[test]
    fn test_invalid_url_is_rejected() {
        assert!(SdkFetcher::new("::nope", "mindsphere-sdk", "ua").is_err());
    }

    #[test]
    fn test_invalid_user_agent_is_an_error() {
        // a header value cannot carry a line break
        let err = SdkFetcher::new(UNREACHABLE, "mindsphere-sdk", "create-msphere\nX-Injected: 1")
            .err()
            .unwrap();
        assert!(err.to_string().contains("Failed to build HTTP client"));
    }

    #[tokio::test]
    async fn test_existing_archive_is_not_downloaded_again() {
        let tmp = TempDir::new().unwrap();
        let archive = tmp.path().join("sdk.zip");
        std::fs::write(&archive, b"partial").unwrap();

        let downloaded = fetcher().download(&archive).await.unwrap();

        assert!(!downloaded);
        assert_eq!(std::fs::read(&archive).unwrap(), b"partial");
    }

    #[tokio::test]
    async fn test_unpacks_fresh_archive() {
        let tmp = TempDir::new().unwrap();
        let libs = tmp.path().join("libs");
        std::fs::create_dir(&libs).unwrap();
        let archive = tmp.path().join(SDK_ARCHIVE);
        std::fs::write(&archive, sdk_zip()).unwrap();

        let unpacked = fetcher().unpack(&archive, &libs).await.unwrap();

        match unpacked {
            Unpacked::Extracted { files } => assert_eq!(files.len(), 2),
            other => panic!("unexpected {:?}", other),
        }
        assert_eq!(
            std::fs::read(libs.join("mindsphere-sdk-java-v2.1.0/core/sdk-core.jar")).unwrap(),
            b"jar bytes"
        );
    }

    #[tokio::test]
    async fn test_extracted_directory_wins_over_archive() {
        let tmp = TempDir::new().unwrap();
        let libs = tmp.path().join("libs");
        let extracted = libs.join("mindsphere-sdk-java-v2.0.0");
        std::fs::create_dir_all(&extracted).unwrap();
        let archive = tmp.path().join(SDK_ARCHIVE);
        std::fs::write(&archive, sdk_zip()).unwrap();

        let unpacked = fetcher().unpack(&archive, &libs).await.unwrap();

        assert_eq!(unpacked, Unpacked::AlreadyExtracted(extracted));
        assert!(!libs.join("mindsphere-sdk-java-v2.1.0").exists());
    }

    #[tokio::test]
    async fn test_archive_file_itself_is_not_mistaken_for_extracted_sdk() {
        let tmp = TempDir::new().unwrap();
        let libs = tmp.path().join("libs");
        std::fs::create_dir(&libs).unwrap();
        let archive = tmp.path().join(SDK_ARCHIVE);
        std::fs::write(&archive, sdk_zip()).unwrap();

        let unpacked = fetcher().unpack(&archive, &libs).await.unwrap();
        assert!(matches!(unpacked, Unpacked::Extracted { .. }));
    }

    #[tokio::test]
    async fn test_nothing_to_unpack_is_not_an_error() {
        let tmp = TempDir::new().unwrap();
        let libs = tmp.path().join("libs");
        std::fs::create_dir(&libs).unwrap();

        let unpacked = fetcher()
            .unpack(&tmp.path().join(SDK_ARCHIVE), &libs)
            .await
            .unwrap();

        assert_eq!(unpacked, Unpacked::Nothing);
    }

    #[tokio::test]
    async fn test_fetch_with_archive_in_place() {
        let tmp = TempDir::new().unwrap();
        std::fs::create_dir(tmp.path().join("libs")).unwrap();
        std::fs::write(tmp.path().join(SDK_ARCHIVE), sdk_zip()).unwrap();

        let unpacked = fetcher().fetch(tmp.path()).await.unwrap();

        assert!(matches!(unpacked, Unpacked::Extracted { .. }));
        assert!(tmp
            .path()
            .join("libs/mindsphere-sdk-java-v2.1.0/README.txt")
            .is_file());
    }

    #[tokio::test]
    async fn test_corrupt_archive_is_an_error() {
        let tmp = TempDir::new().unwrap();
        let libs = tmp.path().join("libs");
        std::fs::create_dir(&libs).unwrap();
        let archive = tmp.path().join(SDK_ARCHIVE);
        std::fs::write(&archive, b"<html>not found</html>").unwrap();

        assert!(fetcher().unpack(&archive, &libs).await.is_err());
    }
}
