mod download;
mod types;

pub use download::download_release_asset;
pub use types::DownloadItem;
