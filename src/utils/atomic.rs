//! Write-then-rename helper shared by the profile store and the config file.

use std::{
    fs::{self, File},
    io::{self, Write},
    path::{Path, PathBuf},
};

const TMP_SUFFIX: &str = "tmp";

/// Sibling path the data is staged in, e.g. `alpha.json.tmp`.
pub fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.{}", existing, TMP_SUFFIX),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}

/// Writes `data` to the staging path, syncs it, then renames it over `path`.
/// A failure leaves any previous file at `path` untouched.
pub fn write_atomic(path: &Path, data: &str) -> io::Result<()> {
    let tmp = tmp_path(path);
    let mut file = File::create(&tmp)?;
    file.write_all(data.as_bytes())?;
    file.sync_all()?;
    drop(file);
    fs::rename(&tmp, path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn tmp_path_appends_suffix() {
        let path = Path::new("/tmp/alpha/alpha.json");
        assert_eq!(tmp_path(path), PathBuf::from("/tmp/alpha/alpha.json.tmp"));
        assert_eq!(tmp_path(Path::new("/tmp/config")), PathBuf::from("/tmp/config.tmp"));
    }

    #[test]
    fn replaces_existing_file_and_cleans_up() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("record.json");
        fs::write(&path, "old").unwrap();
        write_atomic(&path, "new").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "new");
        assert!(!tmp_path(&path).exists());
    }

    #[test]
    fn failed_stage_keeps_previous_content() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("record.json");
        fs::write(&path, "old").unwrap();
        fs::create_dir_all(tmp_path(&path)).unwrap();
        assert!(write_atomic(&path, "new").is_err());
        assert_eq!(fs::read_to_string(&path).unwrap(), "old");
    }
}
