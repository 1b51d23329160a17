use crate::config::DownloadSpec;

/// Instructions shown when the automated fetch fails for any reason.
pub fn fallback_message(spec: &DownloadSpec) -> String {
    format!(
        "
WARNING: Automated download failed.
Please use your browser to download files from the release page:
  {tag_url}
Or directly from this url:
  {download_url}

Move the download file to this directory and unpack with:
  {extract_command}
",
        tag_url = spec.tag_url(),
        download_url = spec.download_url(),
        extract_command = spec.extract_command(),
    )
}
