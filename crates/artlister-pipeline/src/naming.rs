//! Collision-safe artifact naming
//!
//! `art_list.json` is used if free, then `art_list(1).json`,
//! `art_list(2).json`, and so on. The suffix always attaches to the
//! original stem, never to a previously suffixed name.

use std::ffi::OsString;
use std::fs::{File, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};

/// The `n`-th candidate for `base`; `n == 0` is `base` itself
pub fn candidate_path(base: &Path, n: u32) -> PathBuf {
    if n == 0 {
        return base.to_path_buf();
    }

    let mut name = OsString::from(base.file_stem().unwrap_or_default());
    name.push(format!("({})", n));
    if let Some(ext) = base.extension() {
        name.push(".");
        name.push(ext);
    }
    base.with_file_name(name)
}

/// Create a new file at the first free candidate for `base`.
///
/// Each candidate is opened with `create_new`, so a name that exists at
/// creation time is skipped and never truncated.
pub fn create_unique(base: &Path) -> io::Result<(PathBuf, File)> {
    let mut n = 0u32;
    loop {
        let path = candidate_path(base, n);
        match OpenOptions::new().write(true).create_new(true).open(&path) {
            Ok(file) => return Ok((path, file)),
            Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {
                n = n.checked_add(1).ok_or_else(|| {
                    io::Error::new(io::ErrorKind::Other, "no free file name left")
                })?;
            }
            Err(e) => return Err(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_candidate_names() {
        let base = Path::new("/out/art_list.json");
        assert_eq!(candidate_path(base, 0), PathBuf::from("/out/art_list.json"));
        assert_eq!(candidate_path(base, 1), PathBuf::from("/out/art_list(1).json"));
        assert_eq!(candidate_path(base, 12), PathBuf::from("/out/art_list(12).json"));
    }

    #[test]
    fn test_candidate_without_extension() {
        assert_eq!(candidate_path(Path::new("out/list"), 2), PathBuf::from("out/list(2)"));
    }

    #[test]
    fn test_create_unique_claims_next_free_name() {
        let dir = TempDir::new().unwrap();
        let base = dir.path().join("base.json");

        let (first, _) = create_unique(&base).unwrap();
        assert_eq!(first, base);

        let (second, _) = create_unique(&base).unwrap();
        assert_eq!(second, dir.path().join("base(1).json"));

        let (third, _) = create_unique(&base).unwrap();
        assert_eq!(third, dir.path().join("base(2).json"));
    }

    #[test]
    fn test_create_unique_never_overwrites() {
        let dir = TempDir::new().unwrap();
        let base = dir.path().join("art_list.xlsx");
        fs::write(&base, "original").unwrap();

        let (path, _file) = create_unique(&base).unwrap();
        assert_eq!(path, dir.path().join("art_list(1).xlsx"));
        assert_eq!(fs::read_to_string(&base).unwrap(), "original");

        let (path, _file) = create_unique(&base).unwrap();
        assert_eq!(path, dir.path().join("art_list(2).xlsx"));
    }

    #[test]
    fn test_create_unique_missing_directory() {
        let dir = TempDir::new().unwrap();
        let result = create_unique(&dir.path().join("missing").join("a.json"));
        assert_eq!(result.unwrap_err().kind(), io::ErrorKind::NotFound);
    }
}
