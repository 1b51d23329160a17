use serde::{Deserialize, Serialize};

/// Top-level configuration file. Only the `download` section is read; other
/// top-level keys are left for whatever else shares the file.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
pub struct Config {
    pub download: DownloadSpec,
}

/// Location of a single release asset on a GitHub-style release host.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct DownloadSpec {
    /// Base URL of the repository, e.g. `https://github.com/org/repo`
    pub url: String,
    /// Release tag, e.g. `v1.0`
    pub release: String,
    /// Archive asset name, e.g. `data.tar.gz`
    pub filename: String,
}

impl DownloadSpec {
    /// Path of the asset relative to `url`.
    pub fn release_asset_path(&self) -> String {
        format!("releases/download/{}/{}", self.release, self.filename)
    }

    /// Direct URL of the release asset.
    pub fn download_url(&self) -> String {
        format!("{}/{}", self.url, self.release_asset_path())
    }

    /// URL of the human-facing release page.
    pub fn tag_url(&self) -> String {
        format!("{}/releases/tag/{}", self.url, self.release)
    }

    /// Shell command a user runs to unpack a manually downloaded archive.
    pub fn extract_command(&self) -> String {
        format!("tar -xzf {}", self.filename)
    }
}
