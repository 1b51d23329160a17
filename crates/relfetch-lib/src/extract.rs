use crate::error::FetchError;
use flate2::read::GzDecoder;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Component, Path, PathBuf};
use tracing::{debug, info};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ArchiveFormat {
    Tar,
    TarGz,
}

impl ArchiveFormat {
    /// Plain tarballs are recognised by their extension; everything else is
    /// treated as gzip-compressed, which is what `tar -xzf` expects.
    pub fn from_filename(filename: &str) -> Self {
        if filename.to_ascii_lowercase().ends_with(".tar") {
            ArchiveFormat::Tar
        } else {
            ArchiveFormat::TarGz
        }
    }
}

fn is_unsafe_entry_path(path: &Path) -> bool {
    path.components().any(|c| {
        matches!(
            c,
            Component::ParentDir | Component::RootDir | Component::Prefix(_)
        )
    })
}

fn unpack_entries<R: Read>(
    reader: R,
    archive_path: &Path,
    dest: &Path,
) -> Result<usize, FetchError> {
    let extract_error = |source: std::io::Error| FetchError::Extract {
        path: archive_path.to_path_buf(),
        source,
    };

    let mut archive = tar::Archive::new(reader);
    archive.set_overwrite(true);

    let mut unpacked = 0;
    for entry in archive.entries().map_err(extract_error)? {
        let mut entry = entry.map_err(extract_error)?;
        let path: PathBuf = entry.path().map_err(extract_error)?.into_owned();

        if is_unsafe_entry_path(&path) {
            return Err(FetchError::UnsafeEntry {
                archive: archive_path.to_path_buf(),
                entry: path,
            });
        }

        // Some archives carry a "./" entry for the root.
        if path.as_os_str().is_empty() || path == Path::new(".") {
            continue;
        }

        debug!(entry = %path.display(), "Unpacking");
        entry.unpack_in(dest).map_err(extract_error)?;
        unpacked += 1;
    }

    Ok(unpacked)
}

/// Unpacks `archive_path` into `dest`, overwriting files that already exist.
/// Returns the number of entries written.
pub fn extract_archive(archive_path: &Path, dest: &Path) -> Result<usize, FetchError> {
    let format = archive_path
        .file_name()
        .and_then(|name| name.to_str())
        .map(ArchiveFormat::from_filename)
        .unwrap_or(ArchiveFormat::TarGz);

    info!(archive = %archive_path.display(), dest = %dest.display(), ?format, "Extracting");

    let file = File::open(archive_path).map_err(|source| FetchError::Extract {
        path: archive_path.to_path_buf(),
        source,
    })?;
    let reader = BufReader::new(file);

    let unpacked = match format {
        ArchiveFormat::Tar => unpack_entries(reader, archive_path, dest)?,
        ArchiveFormat::TarGz => unpack_entries(GzDecoder::new(reader), archive_path, dest)?,
    };

    info!(archive = %archive_path.display(), entries = unpacked, "Extracted");
    Ok(unpacked)
}

/// Runs [`extract_archive`] on the blocking pool.
pub async fn extract_archive_blocking(
    archive_path: PathBuf,
    dest: PathBuf,
) -> Result<usize, FetchError> {
    let join_path = archive_path.clone();
    tokio::task::spawn_blocking(move || extract_archive(&archive_path, &dest))
        .await
        .map_err(|e| FetchError::Extract {
            path: join_path,
            source: std::io::Error::other(e),
        })?
}

#[cfg(test)]
mod tests {
    use super::*;
    use flate2::Compression;
    use flate2::write::GzEncoder;

    fn tar_bytes(entries: &[(&str, &str)]) -> Vec<u8> {
        let mut builder = tar::Builder::new(Vec::new());
        for (path, data) in entries {
            let mut header = tar::Header::new_gnu();
            header.set_size(data.len() as u64);
            header.set_mode(0o644);
            header.set_cksum();
            builder
                .append_data(&mut header, path, data.as_bytes())
                .unwrap();
        }
        builder.into_inner().unwrap()
    }

    fn gzip(bytes: &[u8]) -> Vec<u8> {
        let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
        std::io::Write::write_all(&mut encoder, bytes).unwrap();
        encoder.finish().unwrap()
    }

    #[test]
    fn test_archive_format_from_filename() {
        assert_eq!(ArchiveFormat::from_filename("data.tar"), ArchiveFormat::Tar);
        assert_eq!(ArchiveFormat::from_filename("DATA.TAR"), ArchiveFormat::Tar);
        assert_eq!(ArchiveFormat::from_filename("data.tar.gz"), ArchiveFormat::TarGz);
        assert_eq!(ArchiveFormat::from_filename("data.tgz"), ArchiveFormat::TarGz);
        assert_eq!(ArchiveFormat::from_filename("data"), ArchiveFormat::TarGz);
    }

    #[test]
    fn test_extract_tar_gz() {
        let dir = tempfile::tempdir().unwrap();
        let archive = dir.path().join("data.tar.gz");
        std::fs::write(
            &archive,
            gzip(&tar_bytes(&[("data/a.txt", "alpha"), ("data/nested/b.txt", "beta")])),
        )
        .unwrap();

        let unpacked = extract_archive(&archive, dir.path()).unwrap();

        assert_eq!(unpacked, 2);
        assert_eq!(std::fs::read(dir.path().join("data/a.txt")).unwrap(), b"alpha");
        assert_eq!(
            std::fs::read(dir.path().join("data/nested/b.txt")).unwrap(),
            b"beta"
        );
    }

    #[test]
    fn test_extract_plain_tar() {
        let dir = tempfile::tempdir().unwrap();
        let archive = dir.path().join("data.tar");
        std::fs::write(&archive, tar_bytes(&[("plain.txt", "plain")])).unwrap();

        extract_archive(&archive, dir.path()).unwrap();

        assert_eq!(std::fs::read(dir.path().join("plain.txt")).unwrap(), b"plain");
    }

    #[test]
    fn test_extract_twice_overwrites_deterministically() {
        let dir = tempfile::tempdir().unwrap();
        let archive = dir.path().join("data.tar.gz");
        std::fs::write(&archive, gzip(&tar_bytes(&[("data/a.txt", "alpha")]))).unwrap();

        extract_archive(&archive, dir.path()).unwrap();
        std::fs::write(dir.path().join("data/a.txt"), b"locally modified").unwrap();
        extract_archive(&archive, dir.path()).unwrap();

        assert_eq!(std::fs::read(dir.path().join("data/a.txt")).unwrap(), b"alpha");
    }

    #[test]
    fn test_extract_rejects_parent_dir_entries() {
        let dir = tempfile::tempdir().unwrap();
        let dest = dir.path().join("dest");
        std::fs::create_dir(&dest).unwrap();

        // tar::Builder refuses ".." paths, so write the name field directly.
        let data = b"escaped";
        let mut header = tar::Header::new_old();
        let name = b"../escape.txt";
        header.as_old_mut().name[..name.len()].copy_from_slice(name);
        header.set_size(data.len() as u64);
        header.set_mode(0o644);
        header.set_entry_type(tar::EntryType::Regular);
        header.set_cksum();
        let mut builder = tar::Builder::new(Vec::new());
        builder.append(&header, &data[..]).unwrap();
        let archive = dir.path().join("evil.tar");
        std::fs::write(&archive, builder.into_inner().unwrap()).unwrap();

        let result = extract_archive(&archive, &dest);

        assert!(
            matches!(result, Err(FetchError::UnsafeEntry { .. })),
            "expected unsafe entry error, got {:?}",
            result
        );
        assert!(!dir.path().join("escape.txt").exists());
    }

    #[test]
    fn test_extract_corrupt_archive() {
        let dir = tempfile::tempdir().unwrap();
        let archive = dir.path().join("data.tar.gz");
        std::fs::write(&archive, b"<html>Not Found</html>").unwrap();

        assert!(matches!(
            extract_archive(&archive, dir.path()),
            Err(FetchError::Extract { .. })
        ));
    }

    #[test]
    fn test_extract_missing_archive() {
        let dir = tempfile::tempdir().unwrap();

        assert!(matches!(
            extract_archive(&dir.path().join("absent.tar.gz"), dir.path()),
            Err(FetchError::Extract { .. })
        ));
    }
}
