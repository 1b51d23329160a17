pub mod cli;
pub mod config;
pub mod download;
pub mod error;
pub mod extract;
pub mod fallback;

pub use config::{Config, DownloadSpec};
pub use error::{FetchError, RelFetchError};
