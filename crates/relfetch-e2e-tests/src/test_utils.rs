use eyre::Result;
use flate2::Compression;
use flate2::write::GzEncoder;
use std::path::{Path, PathBuf};

pub const RELEASE: &str = "v1.0";
pub const FILENAME: &str = "data.tar.gz";

/// Builds a gzip-compressed tarball holding `entries` as regular files.
pub fn release_archive(entries: &[(&str, &str)]) -> Result<Vec<u8>> {
    let mut builder = tar::Builder::new(Vec::new());
    for (path, contents) in entries {
        let mut header = tar::Header::new_gnu();
        header.set_size(contents.len() as u64);
        header.set_mode(0o644);
        header.set_cksum();
        builder.append_data(&mut header, path, contents.as_bytes())?;
    }
    let tarball = builder.into_inner()?;

    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    std::io::Write::write_all(&mut encoder, &tarball)?;
    Ok(encoder.finish()?)
}

/// Path below a repository URL where a release host serves the test asset.
pub fn asset_path(repo_path: &str) -> String {
    format!("{}/releases/download/{}/{}", repo_path, RELEASE, FILENAME)
}

pub fn write_config(dir: &Path, repo_url: &str) -> Result<PathBuf> {
    write_config_for_asset(dir, repo_url, FILENAME)
}

pub fn write_config_for_asset(dir: &Path, repo_url: &str, filename: &str) -> Result<PathBuf> {
    let config_path = dir.join("config.yaml");
    std::fs::write(
        &config_path,
        format!(
            "download:\n  url: \"{}\"\n  release: \"{}\"\n  filename: \"{}\"\n",
            repo_url, RELEASE, filename
        ),
    )?;
    Ok(config_path)
}

pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter("relfetch_lib=debug,relfetch_e2e_tests=debug")
        .with_test_writer()
        .try_init()
        .ok();
}
