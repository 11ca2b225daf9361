//! Self-update from GitHub releases
//!
//! Release archives follow the `qrgen_<version>_<os>_<arch>.tar.gz` naming
//! (`.zip` on Windows). The new binary is written next to the running one and
//! renamed over it.

use flate2::read::GzDecoder;
use semver::Version;
use serde::Deserialize;
use std::io::{Cursor, Read, Write};
use std::path::Path;
use std::time::Duration;

use crate::{QrgenError, Result};

const BINARY_NAME: &str = "qrgen";
const LATEST_RELEASE_URL: &str =
    "https://api.github.com/repos/DalyChouikh/qr-code-generator/releases/latest";

const API_TIMEOUT: Duration = Duration::from_secs(15);
const DOWNLOAD_TIMEOUT: Duration = Duration::from_secs(120);
/// Archives larger than this are rejected
pub const MAX_DOWNLOAD_BYTES: usize = 50 << 20;

/// Version reported by builds made outside the release pipeline
pub const DEV_VERSION: &str = "dev";

#[derive(Debug, Clone, Deserialize)]
pub struct GithubRelease {
    pub tag_name: String,
    #[serde(default)]
    pub assets: Vec<GithubAsset>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GithubAsset {
    pub name: String,
    pub browser_download_url: String,
}

/// Result of comparing the running version with the latest release
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateCheck {
    pub current: String,
    pub latest: String,
    pub update_available: bool,
}

/// Client for the release API
pub struct Updater {
    client: reqwest::Client,
    api_url: String,
}

impl Updater {
    pub fn new() -> Result<Self> {
        Self::with_api_url(LATEST_RELEASE_URL)
    }

    /// Point the updater at another release endpoint
    pub fn with_api_url(api_url: impl Into<String>) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(format!("{}-updater", BINARY_NAME))
            .build()?;

        Ok(Self {
            client,
            api_url: api_url.into(),
        })
    }

    /// Ask the release API whether a newer version exists.
    pub async fn check_for_update(&self, current_version: &str) -> Result<UpdateCheck> {
        let release = self.fetch_latest_release().await?;
        Ok(compare_versions(current_version, &release.tag_name))
    }

    /// Download the latest release and replace the running binary.
    ///
    /// Returns the version that was installed.
    pub async fn self_update(&self, current_version: &str) -> Result<String> {
        let current = strip_v(current_version);
        if current == DEV_VERSION {
            return Err(QrgenError::Update(
                "cannot update a development build, install a released version first".to_string(),
            ));
        }

        let release = self.fetch_latest_release().await?;
        let check = compare_versions(current, &release.tag_name);
        if !check.update_available {
            return Err(QrgenError::Update(format!(
                "already up to date (v{})",
                check.current
            )));
        }

        let (os, arch) = release_platform(std::env::consts::OS, std::env::consts::ARCH);
        let asset = find_asset(&release, os, arch)?;
        tracing::info!("Downloading {} from {}", asset.name, asset.browser_download_url);

        let archive = self.download_asset(&asset.browser_download_url).await?;
        let binary = extract_binary(&archive, &asset.name)?;

        let exe = std::env::current_exe()
            .and_then(|p| p.canonicalize())
            .map_err(|e| QrgenError::Update(format!("cannot determine executable path: {}", e)))?;
        replace_binary(&exe, &binary)?;

        tracing::info!("Updated {} from v{} to v{}", BINARY_NAME, check.current, check.latest);
        Ok(check.latest)
    }

    async fn fetch_latest_release(&self) -> Result<GithubRelease> {
        tracing::debug!("Fetching latest release from {}", self.api_url);

        let response = self
            .client
            .get(&self.api_url)
            .header("Accept", "application/vnd.github.v3+json")
            .timeout(API_TIMEOUT)
            .send()
            .await
            .map_err(|e| QrgenError::Update(format!("failed to reach GitHub API: {}", e)))?;

        let status = response.status();
        if status == reqwest::StatusCode::FORBIDDEN || status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(QrgenError::Update(
                "GitHub API rate limit exceeded, try again later".to_string(),
            ));
        }
        if !status.is_success() {
            return Err(QrgenError::Update(format!("GitHub API returned {}", status)));
        }

        response
            .json::<GithubRelease>()
            .await
            .map_err(|e| QrgenError::Update(format!("failed to parse GitHub API response: {}", e)))
    }

    async fn download_asset(&self, url: &str) -> Result<Vec<u8>> {
        let mut response = self.client.get(url).timeout(DOWNLOAD_TIMEOUT).send().await?;

        if !response.status().is_success() {
            return Err(QrgenError::Update(format!(
                "download failed: HTTP {} for {}",
                response.status(),
                url
            )));
        }

        let mut data = Vec::new();
        while let Some(chunk) = response.chunk().await? {
            if data.len() + chunk.len() > MAX_DOWNLOAD_BYTES {
                return Err(QrgenError::Update(format!(
                    "download exceeds {} MiB limit",
                    MAX_DOWNLOAD_BYTES >> 20
                )));
            }
            data.extend_from_slice(&chunk);
        }
        Ok(data)
    }
}

fn strip_v(version: &str) -> &str {
    version.trim().trim_start_matches('v')
}

/// Compare the running version with a release tag.
///
/// Development builds never report an update. Versions that are not valid
/// semver fall back to a plain inequality check.
pub fn compare_versions(current: &str, latest_tag: &str) -> UpdateCheck {
    let current = strip_v(current).to_string();
    let latest = strip_v(latest_tag).to_string();

    let update_available = if current == DEV_VERSION {
        false
    } else {
        match (Version::parse(&current), Version::parse(&latest)) {
            (Ok(c), Ok(l)) => l > c,
            _ => latest != current,
        }
    };

    UpdateCheck {
        current,
        latest,
        update_available,
    }
}

/// Map Rust platform names onto the release archive naming.
pub fn release_platform<'a>(os: &'a str, arch: &'a str) -> (&'a str, &'a str) {
    let os = match os {
        "macos" => "darwin",
        other => other,
    };
    let arch = match arch {
        "x86_64" => "amd64",
        "aarch64" => "arm64",
        "x86" => "386",
        other => other,
    };
    (os, arch)
}

/// Locate the archive for `os`/`arch` among the release assets.
pub fn find_asset<'a>(release: &'a GithubRelease, os: &str, arch: &str) -> Result<&'a GithubAsset> {
    let ext = if os == "windows" { ".zip" } else { ".tar.gz" };
    let suffix = format!("_{}_{}{}", os, arch, ext);
    let prefix = format!("{}_", BINARY_NAME);

    release
        .assets
        .iter()
        .find(|a| a.name.starts_with(&prefix) && a.name.ends_with(&suffix))
        .ok_or_else(|| {
            QrgenError::Update(format!(
                "no release found for {}/{}, you may need to update manually",
                os, arch
            ))
        })
}

fn extract_binary(archive: &[u8], archive_name: &str) -> Result<Vec<u8>> {
    if archive_name.ends_with(".zip") {
        extract_from_zip(archive)
    } else {
        extract_from_tar_gz(archive)
    }
}

/// Pull the `qrgen` (or `qrgen.exe`) binary out of a zip archive.
pub fn extract_from_zip(data: &[u8]) -> Result<Vec<u8>> {
    let mut archive = zip::ZipArchive::new(Cursor::new(data))
        .map_err(|e| QrgenError::Update(format!("failed to open zip archive: {}", e)))?;
    let exe_name = format!("{}.exe", BINARY_NAME);

    for i in 0..archive.len() {
        let mut file = archive
            .by_index(i)
            .map_err(|e| QrgenError::Update(format!("failed to read zip entry: {}", e)))?;
        if file.is_dir() {
            continue;
        }
        let is_binary = file
            .enclosed_name()
            .and_then(|path| path.file_name().map(|n| n.to_os_string()))
            .is_some_and(|name| name == BINARY_NAME || name == exe_name.as_str());
        if is_binary {
            let mut binary = Vec::new();
            file.read_to_end(&mut binary)?;
            return Ok(binary);
        }
    }

    Err(QrgenError::Update(format!(
        "binary '{}' not found in archive",
        BINARY_NAME
    )))
}

/// Pull the `qrgen` binary out of a gzipped tarball.
pub fn extract_from_tar_gz(data: &[u8]) -> Result<Vec<u8>> {
    let mut archive = tar::Archive::new(GzDecoder::new(Cursor::new(data)));

    for entry in archive.entries()? {
        let mut entry = entry?;
        let is_binary = entry
            .path()?
            .file_name()
            .is_some_and(|name| name == BINARY_NAME);
        if is_binary {
            let mut binary = Vec::new();
            entry.read_to_end(&mut binary)?;
            return Ok(binary);
        }
    }

    Err(QrgenError::Update(format!(
        "binary '{}' not found in archive",
        BINARY_NAME
    )))
}

/// Swap the file at `exe` for `new_binary`.
///
/// The new content lands in a temp file in the same directory first so the
/// final rename stays on one filesystem. Windows cannot overwrite a running
/// executable, so the old one is moved aside to `<exe>.old` before the rename.
pub fn replace_binary(exe: &Path, new_binary: &[u8]) -> Result<()> {
    let dir = exe
        .parent()
        .ok_or_else(|| QrgenError::Update(format!("{} has no parent directory", exe.display())))?;
    let base = exe
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or(BINARY_NAME);

    let mut tmp = tempfile::Builder::new()
        .prefix(&format!("{}.update-", base))
        .tempfile_in(dir)
        .map_err(|e| {
            QrgenError::Update(format!(
                "cannot create temp file (do you have write permission to {}?): {}",
                dir.display(),
                e
            ))
        })?;
    tmp.write_all(new_binary)?;
    tmp.flush()?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        std::fs::set_permissions(tmp.path(), std::fs::Permissions::from_mode(0o755))?;
    }

    if cfg!(windows) {
        let mut old = exe.as_os_str().to_owned();
        old.push(".old");
        let old = std::path::PathBuf::from(old);
        let _ = std::fs::remove_file(&old);
        std::fs::rename(exe, &old)
            .map_err(|e| QrgenError::Update(format!("cannot move old binary: {}", e)))?;
        if let Err(e) = tmp.persist(exe) {
            let _ = std::fs::rename(&old, exe);
            return Err(QrgenError::Update(format!(
                "cannot move new binary into place: {}",
                e.error
            )));
        }
        let _ = std::fs::remove_file(&old);
    } else {
        tmp.persist(exe)
            .map_err(|e| QrgenError::Update(format!("cannot replace binary: {}", e.error)))?;
    }

    Ok(())
}
