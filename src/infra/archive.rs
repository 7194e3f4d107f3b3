//! Archive extraction
//!
//! Package archives are gzip-compressed tarballs. Release tarballs usually
//! wrap their content in one top-level directory; [`package_root`] finds the
//! directory that should become the installed package.

use flate2::read::GzDecoder;
use std::fs::File;
use std::path::{Path, PathBuf};

use crate::error::FilesystemError;

/// Unpack a `.tar.gz` archive into `dest`
///
/// Entries that would land outside `dest` are rejected by `tar`.
pub fn extract_tar_gz(archive: &Path, dest: &Path) -> Result<(), FilesystemError> {
    let extract_error = |e: std::io::Error| FilesystemError::Extract {
        path: archive.to_path_buf(),
        error: e.to_string(),
    };

    let file = File::open(archive).map_err(|e| FilesystemError::ReadFile {
        path: archive.to_path_buf(),
        error: e.to_string(),
    })?;
    std::fs::create_dir_all(dest).map_err(|e| FilesystemError::CreateDir {
        path: dest.to_path_buf(),
        error: e.to_string(),
    })?;

    let mut tar = tar::Archive::new(GzDecoder::new(file));
    for entry in tar.entries().map_err(extract_error)? {
        let mut entry = entry.map_err(extract_error)?;
        if !entry.unpack_in(dest).map_err(extract_error)? {
            let name = entry
                .path()
                .map(|p| p.display().to_string())
                .unwrap_or_default();
            return Err(FilesystemError::Extract {
                path: archive.to_path_buf(),
                error: format!("entry '{name}' escapes the destination"),
            });
        }
    }

    tracing::debug!("Extracted {} into {}", archive.display(), dest.display());
    Ok(())
}

/// Directory holding the package content after extraction
///
/// A single top-level directory is stripped; anything else keeps `dir`.
pub fn package_root(dir: &Path) -> Result<PathBuf, FilesystemError> {
    let entries = std::fs::read_dir(dir)
        .map_err(|e| FilesystemError::ReadFile {
            path: dir.to_path_buf(),
            error: e.to_string(),
        })?
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| FilesystemError::ReadFile {
            path: dir.to_path_buf(),
            error: e.to_string(),
        })?;

    match entries.as_slice() {
        [only] if only.path().is_dir() => Ok(only.path()),
        _ => Ok(dir.to_path_buf()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flate2::write::GzEncoder;
    use flate2::Compression;
    use tempfile::TempDir;

    fn create_test_archive(path: &Path, files: &[(&str, &str)]) {
        let file = File::create(path).unwrap();
        let enc = GzEncoder::new(file, Compression::default());
        let mut tar = tar::Builder::new(enc);

        for (name, content) in files {
            let mut header = tar::Header::new_gnu();
            header.set_path(name).unwrap();
            header.set_size(content.len() as u64);
            header.set_mode(0o644);
            header.set_cksum();
            tar.append(&header, content.as_bytes()).unwrap();
        }

        tar.into_inner().unwrap().finish().unwrap();
    }

    #[test]
    fn test_extract_and_strip_single_top_dir() {
        let temp = TempDir::new().unwrap();
        let archive = temp.path().join("suite.tar.gz");
        create_test_archive(
            &archive,
            &[
                ("oss-cad-suite/bin/yosys", "#!/bin/sh"),
                ("oss-cad-suite/README", "readme"),
            ],
        );

        let dest = temp.path().join("staging");
        extract_tar_gz(&archive, &dest).unwrap();
        let root = package_root(&dest).unwrap();

        assert_eq!(root, dest.join("oss-cad-suite"));
        assert_eq!(
            std::fs::read_to_string(root.join("bin/yosys")).unwrap(),
            "#!/bin/sh"
        );
    }

    #[test]
    fn test_flat_archive_keeps_destination() {
        let temp = TempDir::new().unwrap();
        let archive = temp.path().join("flat.tar.gz");
        create_test_archive(&archive, &[("a.txt", "a"), ("b.txt", "b")]);

        let dest = temp.path().join("staging");
        extract_tar_gz(&archive, &dest).unwrap();

        assert_eq!(package_root(&dest).unwrap(), dest);
        assert!(dest.join("a.txt").is_file());
    }

    #[test]
    fn test_single_file_is_not_stripped() {
        let temp = TempDir::new().unwrap();
        let archive = temp.path().join("one.tar.gz");
        create_test_archive(&archive, &[("tool", "binary")]);

        let dest = temp.path().join("staging");
        extract_tar_gz(&archive, &dest).unwrap();

        assert_eq!(package_root(&dest).unwrap(), dest);
    }

    #[test]
    fn test_extract_missing_archive() {
        let temp = TempDir::new().unwrap();
        let result = extract_tar_gz(&temp.path().join("nope.tar.gz"), &temp.path().join("out"));
        assert!(matches!(result, Err(FilesystemError::ReadFile { .. })));
    }

    #[test]
    fn test_extract_corrupt_archive() {
        let temp = TempDir::new().unwrap();
        let archive = temp.path().join("bad.tar.gz");
        std::fs::write(&archive, b"definitely not gzip").unwrap();

        let result = extract_tar_gz(&archive, &temp.path().join("out"));
        assert!(matches!(result, Err(FilesystemError::Extract { .. })));
    }
}
