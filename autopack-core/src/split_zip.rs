//! Multi-volume ("split") ZIP archives: `name.z01`, `name.z02`, ..., `name.zip`.

use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::extension::{is_split_zip_extension, lowercase_extension};

/// Returns `true` if `path` has a split part extension (`.z01`..`.z99`).
pub fn is_split_zip_part(path: &Path) -> bool {
    lowercase_extension(path).is_some_and(|ext| is_split_zip_extension(&ext))
}

/// Returns `true` if `path` belongs to a split ZIP archive.
///
/// Any `.z##` part qualifies on its own; a `.zip` file qualifies when a
/// sibling with the same stem and a `.z01` extension exists.
pub fn is_split_zip(path: &Path) -> bool {
    if is_split_zip_part(path) {
        return true;
    }

    match lowercase_extension(path) {
        Some(ext) if ext == "zip" => path.with_extension("z01").exists(),
        _ => false,
    }
}

/// Locates the main `.zip` file for any part of a split archive.
///
/// # Errors
///
/// Returns [`Error::InvalidSource`] naming the expected main file when it
/// does not exist.
pub fn find_split_zip_main(any_part: &Path) -> Result<PathBuf> {
    let main = any_part.with_extension("zip");
    if main.exists() {
        return Ok(main);
    }

    Err(Error::InvalidSource {
        reason: Some(format!(
            "Main ZIP file not found for split archive. Expected: {}",
            main.display()
        )),
        path: main,
    })
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;

    #[test]
    fn part_extension_is_split() {
        assert!(is_split_zip_part(Path::new("data.z01")));
        assert!(is_split_zip_part(Path::new("DATA.Z12")));
        assert!(!is_split_zip_part(Path::new("data.zip")));
        assert!(is_split_zip(Path::new("nowhere/data.z03")));
    }

    #[test]
    fn zip_is_split_only_with_first_part_present() {
        let dir = tempfile::TempDir::new().unwrap();
        let zip = dir.path().join("data.zip");
        fs::write(&zip, b"PK\x03\x04").unwrap();
        assert!(!is_split_zip(&zip));

        fs::write(dir.path().join("data.z01"), b"part").unwrap();
        assert!(is_split_zip(&zip));
    }

    #[test]
    fn main_file_is_found_from_part() {
        let dir = tempfile::TempDir::new().unwrap();
        let part = dir.path().join("data.z01");
        let zip = dir.path().join("data.zip");
        fs::write(&part, b"part").unwrap();
        fs::write(&zip, b"main").unwrap();

        assert_eq!(find_split_zip_main(&part).unwrap(), zip);
        assert_eq!(find_split_zip_main(&zip).unwrap(), zip);
    }

    #[test]
    fn missing_main_file_names_expected_path() {
        let dir = tempfile::TempDir::new().unwrap();
        let part = dir.path().join("data.z01");
        fs::write(&part, b"part").unwrap();

        let err = find_split_zip_main(&part).unwrap_err();
        match err {
            Error::InvalidSource { path, reason } => {
                assert_eq!(path, dir.path().join("data.zip"));
                assert!(reason.unwrap().contains("data.zip"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
