use super::types::DownloadItem;
use crate::error::FetchError;
use futures::StreamExt;
use opendal::Operator;
use opendal::layers::TracingLayer;
use opendal::services::Http;
use tracing::info;

fn build_http_operator(base_url: &str) -> Result<Operator, opendal::Error> {
    // The endpoint is the host only; the asset path is read below it.
    // No retry layer: a failed fetch goes straight to the manual instructions.
    let builder = Http::default().endpoint(base_url);

    let op = Operator::new(builder)?.layer(TracingLayer).finish();
    Ok(op)
}

/// Streams the release asset to `item.output_path`, returning the number of
/// bytes written. An existing file at that path is truncated.
pub async fn download_release_asset(item: &DownloadItem) -> Result<u64, FetchError> {
    let download_error = |source: opendal::Error| FetchError::Download {
        url: item.url.clone(),
        source,
    };
    let write_error = |source: std::io::Error| FetchError::Write {
        path: item.output_path.clone(),
        source,
    };

    let op = build_http_operator(&item.base_url).map_err(download_error)?;

    if let Some(parent) = item.output_path.parent() {
        tokio::fs::create_dir_all(parent).await.map_err(write_error)?;
    }

    info!(url = %item.url, output = %item.output_path.display(), "Downloading");

    let mut reader = op
        .reader(&item.rel_path)
        .await
        .map_err(download_error)?
        .into_stream(..)
        .await
        .map_err(download_error)?;

    let file = tokio::fs::File::create(&item.output_path)
        .await
        .map_err(write_error)?;
    let mut writer = tokio::io::BufWriter::new(file);

    let mut written = 0u64;
    while let Some(chunk) = reader.next().await {
        let buffer = chunk.map_err(download_error)?.to_bytes();
        tokio::io::AsyncWriteExt::write_all(&mut writer, &buffer)
            .await
            .map_err(write_error)?;
        written += buffer.len() as u64;
    }

    tokio::io::AsyncWriteExt::flush(&mut writer)
        .await
        .map_err(write_error)?;

    info!(url = %item.url, output = %item.output_path.display(), bytes = written, "Downloaded");
    Ok(written)
}
