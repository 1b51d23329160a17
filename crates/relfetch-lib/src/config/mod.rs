mod loader;
mod model;

pub use loader::{DEFAULT_CONFIG_PATH, load_config};
pub use model::{Config, DownloadSpec};
