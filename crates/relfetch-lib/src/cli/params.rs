use crate::config::DownloadSpec;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct FetchParams {
    pub spec: DownloadSpec,
    pub output_dir: PathBuf,
    pub dry_run: bool,
}
