use crate::cli::FetchParams;
use crate::config::DownloadSpec;
use crate::download::{DownloadItem, download_release_asset};
use crate::error::FetchError;
use crate::extract::extract_archive_blocking;
use crate::fallback::fallback_message;
use std::path::{Path, PathBuf};
use tracing;

#[derive(Debug)]
pub enum FetchOutcome {
    /// The archive was downloaded and unpacked into the output directory.
    Extracted {
        archive: PathBuf,
        bytes: u64,
        entries: usize,
    },
    /// Nothing was fetched; the manual instructions were printed instead.
    Fallback { error: FetchError, message: String },
    /// Only the plan was printed.
    DryRun,
}

/// Downloads and unpacks the configured archive. Failures of either step are
/// not returned: they are logged and turned into printed instructions.
pub async fn run_fetch(params: FetchParams) -> FetchOutcome {
    let FetchParams {
        spec,
        output_dir,
        dry_run,
    } = params;

    tracing::info!(
        "Downloading {} ({}) from {}",
        spec.filename,
        spec.release,
        spec.url
    );

    if dry_run {
        println!(
            "Would download:\n  {}\nto:\n  {}\nand unpack with:\n  {}",
            spec.download_url(),
            output_dir.join(&spec.filename).display(),
            spec.extract_command()
        );
        return FetchOutcome::DryRun;
    }

    match fetch_and_extract(&spec, &output_dir).await {
        Ok((archive, bytes, entries)) => {
            tracing::info!("Unpacked {} entries from {}", entries, archive.display());
            FetchOutcome::Extracted {
                archive,
                bytes,
                entries,
            }
        }
        Err(error) => {
            tracing::warn!("Automated fetch failed: {}", error);
            let message = fallback_message(&spec);
            println!("{message}");
            FetchOutcome::Fallback { error, message }
        }
    }
}

async fn fetch_and_extract(
    spec: &DownloadSpec,
    output_dir: &Path,
) -> Result<(PathBuf, u64, usize), FetchError> {
    let item = DownloadItem::from_spec(spec, output_dir)?;

    let bytes = download_release_asset(&item).await?;

    let entries =
        extract_archive_blocking(item.output_path.clone(), output_dir.to_path_buf()).await?;

    Ok((item.output_path, bytes, entries))
}
