use super::{Config, DownloadSpec};
use crate::error::RelFetchError;
use config::Config as ConfigBuilder;

pub const DEFAULT_CONFIG_PATH: &str = "config.yaml";

pub fn load_config(config_path: &str) -> Result<Config, RelFetchError> {
    let config_builder = ConfigBuilder::builder()
        .add_source(config::File::with_name(config_path))
        .build()?;

    let mut config: Config = config_builder.clone().try_deserialize()?;
    config.download.url = scalar_as_written(&config_builder, "url")?;
    config.download.release = scalar_as_written(&config_builder, "release")?;
    config.download.filename = scalar_as_written(&config_builder, "filename")?;

    validate_download_spec(&config.download)?;
    Ok(config)
}

/// YAML reads an unquoted `release: 1.0` as a float, and the string
/// conversion in `config` would turn it into "1". Numbers are rendered back
/// the way they were written instead.
fn scalar_as_written(settings: &ConfigBuilder, field: &str) -> Result<String, RelFetchError> {
    let key = format!("download.{field}");
    let value: config::Value = settings.get(&key)?;
    match value.kind {
        config::ValueKind::String(s) => Ok(s),
        config::ValueKind::Float(f) => Ok(format!("{f:?}")),
        config::ValueKind::I64(i) => Ok(i.to_string()),
        config::ValueKind::I128(i) => Ok(i.to_string()),
        config::ValueKind::U64(u) => Ok(u.to_string()),
        config::ValueKind::U128(u) => Ok(u.to_string()),
        _ => Err(RelFetchError::InvalidConfig {
            details: format!("{key} must be a string; quote the value in the configuration file"),
        }),
    }
}

fn validate_download_spec(spec: &DownloadSpec) -> Result<(), RelFetchError> {
    for (name, value) in [
        ("download.url", &spec.url),
        ("download.release", &spec.release),
        ("download.filename", &spec.filename),
    ] {
        if value.trim().is_empty() {
            return Err(RelFetchError::InvalidConfig {
                details: format!("{name} must not be empty"),
            });
        }
    }

    // The archive is written into the working directory under this name.
    if spec.filename.contains(['/', '\\']) || spec.filename == "." || spec.filename == ".." {
        return Err(RelFetchError::InvalidConfig {
            details: format!(
                "download.filename must be a plain file name, got {:?}",
                spec.filename
            ),
        });
    }

    let download_url = spec.download_url();
    let parsed = url::Url::parse(&download_url).map_err(|e| RelFetchError::InvalidConfig {
        details: format!("download.url does not form a valid URL ({download_url}): {e}"),
    })?;
    if !matches!(parsed.scheme(), "http" | "https") || parsed.host_str().is_none() {
        return Err(RelFetchError::InvalidConfig {
            details: format!("download.url must be an http(s) URL, got {}", spec.url),
        });
    }

    Ok(())
}
