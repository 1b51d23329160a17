use crate::config::DownloadSpec;
use crate::error::FetchError;
use std::path::{Path, PathBuf};

/// A single release asset resolved against a destination directory.
#[derive(Clone, Debug)]
pub struct DownloadItem {
    /// Scheme, host and port of the release host
    pub base_url: String,
    /// Path below `base_url`, not percent-encoded
    pub rel_path: String,
    /// Full URL, kept for messages
    pub url: String,
    pub output_path: PathBuf,
}

impl DownloadItem {
    pub fn from_spec(spec: &DownloadSpec, output_dir: &Path) -> Result<Self, FetchError> {
        let url = spec.download_url();
        let parsed = url::Url::parse(&url).map_err(|source| FetchError::InvalidUrl {
            url: url.clone(),
            source,
        })?;

        Ok(Self {
            base_url: parsed[..url::Position::BeforePath].to_string(),
            // OpenDAL encodes the path itself.
            rel_path: percent_encoding::percent_decode_str(parsed.path())
                .decode_utf8_lossy()
                .into_owned(),
            url,
            output_path: output_dir.join(&spec.filename),
        })
    }
}
