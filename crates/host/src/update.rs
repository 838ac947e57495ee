//! Release update check.
//!
//! Fetches the latest release metadata and compares its tag against the
//! running version.

use std::cmp::Ordering;
use std::time::Duration;

use chrono::{DateTime, Utc};
use semver::Version;
use serde::Deserialize;
use tracing::{debug, info};

use bgneur_shared::config::UpdatesConfig;

use crate::error::{HostError, HostResult};

/// Release metadata as served by the releases endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct ReleaseMetadata {
    /// Tag such as `v2.3.0`.
    pub tag_name: String,
    /// Release page.
    pub html_url: String,
    /// Publication time.
    #[serde(default)]
    pub published_at: Option<DateTime<Utc>>,
    /// Downloadable files.
    #[serde(default)]
    pub assets: Vec<ReleaseAsset>,
}

/// A downloadable release file.
#[derive(Debug, Clone, Deserialize)]
pub struct ReleaseAsset {
    /// File name.
    pub name: String,
    /// Direct download link.
    pub browser_download_url: String,
}

/// A newer release.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseInfo {
    /// Parsed version.
    pub version: Version,
    /// Release page.
    pub page_url: String,
    /// Installer download link, when the release ships one.
    pub installer_url: Option<String>,
    /// Publication time.
    pub published_at: Option<DateTime<Utc>>,
}

/// Outcome of an update check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpdateStatus {
    /// The running version is the latest (or newer).
    UpToDate {
        /// Latest published version.
        latest: Version,
    },
    /// A newer release exists.
    Available(ReleaseInfo),
}

/// Parses a version or release tag, tolerating a leading `v`.
pub fn parse_version(tag: &str) -> HostResult<Version> {
    let trimmed = tag.trim();
    let bare = trimmed
        .strip_prefix('v')
        .or_else(|| trimmed.strip_prefix('V'))
        .unwrap_or(trimmed);
    Version::parse(bare).map_err(|_| HostError::Version(tag.to_string()))
}

/// Orders the published tag relative to the running version.
pub fn compare_versions(current: &str, latest_tag: &str) -> HostResult<Ordering> {
    Ok(parse_version(latest_tag)?.cmp(&parse_version(current)?))
}

impl ReleaseMetadata {
    /// Picks the Windows installer, falling back to the first asset.
    #[must_use]
    pub fn installer_url(&self) -> Option<String> {
        self.assets
            .iter()
            .find(|asset| asset.name.to_ascii_lowercase().ends_with(".exe"))
            .or_else(|| self.assets.first())
            .map(|asset| asset.browser_download_url.clone())
    }

    /// Classifies this release against the running version.
    pub fn status_for(&self, current: &str) -> HostResult<UpdateStatus> {
        let latest = parse_version(&self.tag_name)?;
        if latest <= parse_version(current)? {
            return Ok(UpdateStatus::UpToDate { latest });
        }
        Ok(UpdateStatus::Available(ReleaseInfo {
            version: latest,
            page_url: self.html_url.clone(),
            installer_url: self.installer_url(),
            published_at: self.published_at,
        }))
    }
}

/// Client for the releases endpoint.
#[derive(Debug, Clone)]
pub struct UpdateChecker {
    client: reqwest::Client,
    releases_url: String,
    current_version: String,
}

impl UpdateChecker {
    /// Creates a checker for the given running version.
    pub fn new(config: &UpdatesConfig, current_version: impl Into<String>) -> HostResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(concat!("bgneur/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            client,
            releases_url: config.releases_url.clone(),
            current_version: current_version.into(),
        })
    }

    /// Fetches the latest release metadata.
    pub async fn latest_release(&self) -> HostResult<ReleaseMetadata> {
        debug!(url = %self.releases_url, "fetching release metadata");
        let release = self
            .client
            .get(&self.releases_url)
            .send()
            .await?
            .error_for_status()?
            .json::<ReleaseMetadata>()
            .await?;
        Ok(release)
    }

    /// Checks whether a newer release is available.
    pub async fn check(&self) -> HostResult<UpdateStatus> {
        let release = self.latest_release().await?;
        let status = release.status_for(&self.current_version)?;
        match &status {
            UpdateStatus::UpToDate { latest } => {
                info!(current = %self.current_version, %latest, "up to date");
            }
            UpdateStatus::Available(info) => {
                info!(current = %self.current_version, latest = %info.version, "update available");
            }
        }
        Ok(status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    const RELEASE_JSON: &str = r#"{
        "tag_name": "v2.4.0",
        "html_url": "https://example.invalid/releases/v2.4.0",
        "published_at": "2025-06-01T10:00:00Z",
        "assets": [
            {"name": "notes.txt", "browser_download_url": "https://example.invalid/notes.txt"},
            {"name": "BGN-EUR_Converter_Setup_2.4.0.exe", "browser_download_url": "https://example.invalid/setup.exe"}
        ]
    }"#;

    #[rstest]
    #[case("2.3.0", "v2.4.0", Ordering::Greater)]
    #[case("2.3.0", "2.3.0", Ordering::Equal)]
    #[case("2.3.0", "V2.2.7", Ordering::Less)]
    #[case("2.3.0", "v2.10.0", Ordering::Greater)]
    fn test_compare_versions(
        #[case] current: &str,
        #[case] tag: &str,
        #[case] expected: Ordering,
    ) {
        assert_eq!(compare_versions(current, tag).unwrap(), expected);
    }

    #[test]
    fn test_bad_tag_is_rejected() {
        assert!(matches!(
            compare_versions("2.3.0", "latest"),
            Err(HostError::Version(_))
        ));
    }

    #[test]
    fn test_status_prefers_installer_asset() {
        let release: ReleaseMetadata = serde_json::from_str(RELEASE_JSON).unwrap();
        let UpdateStatus::Available(info) = release.status_for("2.3.0").unwrap() else {
            panic!("expected an update");
        };
        assert_eq!(info.version, Version::new(2, 4, 0));
        assert_eq!(info.installer_url.as_deref(), Some("https://example.invalid/setup.exe"));
        assert!(info.published_at.is_some());
    }

    #[test]
    fn test_status_up_to_date() {
        let release: ReleaseMetadata = serde_json::from_str(RELEASE_JSON).unwrap();
        assert_eq!(
            release.status_for("2.4.0").unwrap(),
            UpdateStatus::UpToDate {
                latest: Version::new(2, 4, 0)
            }
        );
    }

    async fn serve_once(status_line: &'static str, body: &'static str) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut request = [0u8; 1024];
            let _ = socket.read(&mut request).await;
            let response = format!(
                "{status_line}\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{body}",
                body.len()
            );
            socket.write_all(response.as_bytes()).await.unwrap();
        });
        format!("http://{addr}/releases/latest")
    }

    #[tokio::test]
    async fn test_check_against_local_endpoint() {
        let url = serve_once("HTTP/1.1 200 OK", RELEASE_JSON).await;
        let config = UpdatesConfig {
            releases_url: url,
            ..UpdatesConfig::default()
        };
        let checker = UpdateChecker::new(&config, "2.3.0").unwrap();
        let status = checker.check().await.unwrap();
        assert!(matches!(status, UpdateStatus::Available(ref info) if info.version == Version::new(2, 4, 0)));
    }

    #[tokio::test]
    async fn test_http_error_is_reported() {
        let url = serve_once("HTTP/1.1 404 Not Found", "{}").await;
        let config = UpdatesConfig {
            releases_url: url,
            ..UpdatesConfig::default()
        };
        let checker = UpdateChecker::new(&config, "2.3.0").unwrap();
        assert!(matches!(checker.check().await, Err(HostError::Update(_))));
    }
}
