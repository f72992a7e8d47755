use std::{
    collections::BTreeSet,
    fs, io,
    path::{Path, PathBuf},
};

use chrono::{Local, SecondsFormat};
use tracing::{debug, info, warn};

use crate::{
    errors::{Operation, ProfileError, Result},
    profile::{
        is_valid_profile_name, validation::FIELD_PROFILE_NAME, ProfileDraft, ValidationError,
    },
    utils::atomic::write_atomic,
};

use super::ProfileStorage;

pub const RECORD_EXTENSION: &str = "json";

/// Where a profile record was found on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProfileLocation {
    /// `<root>/<name>/<name>.json`
    Current { dir: PathBuf, record: PathBuf },
    /// `<root>/<name>.json`
    Legacy { record: PathBuf },
}

impl ProfileLocation {
    pub fn record(&self) -> &Path {
        match self {
            ProfileLocation::Current { record, .. } | ProfileLocation::Legacy { record } => {
                record
            }
        }
    }
}

/// Filesystem-backed JSON persistence for profiles.
///
/// Profiles are written in the per-profile directory layout. Flat files left
/// at the root by older releases are still read, listed and deleted.
#[derive(Debug, Clone)]
pub struct JsonProfileStore {
    root: PathBuf,
}

impl JsonProfileStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Directory owning a profile's record and any generated artifacts.
    pub fn profile_dir(&self, name: &str) -> PathBuf {
        self.root.join(name)
    }

    pub fn current_record_path(&self, name: &str) -> PathBuf {
        self.profile_dir(name).join(record_file_name(name))
    }

    pub fn legacy_record_path(&self, name: &str) -> PathBuf {
        self.root.join(record_file_name(name))
    }

    /// Resolves a name against the current layout first, then the legacy one.
    pub fn locate(&self, name: &str) -> Option<ProfileLocation> {
        if !is_valid_profile_name(name) {
            return None;
        }
        let record = self.current_record_path(name);
        if record.is_file() {
            debug!(profile = name, "resolved profile in directory layout");
            return Some(ProfileLocation::Current {
                dir: self.profile_dir(name),
                record,
            });
        }
        let record = self.legacy_record_path(name);
        if record.is_file() {
            debug!(profile = name, "resolved profile in legacy layout");
            return Some(ProfileLocation::Legacy { record });
        }
        None
    }
}

impl ProfileStorage for JsonProfileStore {
    fn write(&self, draft: &mut ProfileDraft) -> Result<PathBuf> {
        let name = draft.profile_name.clone();
        if !is_valid_profile_name(&name) {
            return Err(ProfileError::Validation(vec![ValidationError::new(
                FIELD_PROFILE_NAME,
                format!("`{name}` is not a valid profile name"),
            )]));
        }

        draft.sanitize_users();
        if draft.created_at.trim().is_empty() {
            draft.created_at = timestamp_now();
        }

        let record = self.current_record_path(&name);
        let io_err = |err| ProfileError::io(Operation::Write, &name, err);
        fs::create_dir_all(self.profile_dir(&name)).map_err(io_err)?;
        let json = serde_json::to_string_pretty(draft)
            .map_err(|err| io_err(io::Error::from(err)))?;
        write_atomic(&record, &json).map_err(io_err)?;

        let legacy = self.legacy_record_path(&name);
        if legacy.is_file() {
            match fs::remove_file(&legacy) {
                Ok(()) => debug!(profile = %name, "migrated legacy profile file"),
                Err(err) => warn!(profile = %name, error = %err, "legacy profile file left behind"),
            }
        }

        info!(profile = %name, path = %record.display(), "profile saved");
        Ok(record)
    }

    fn read(&self, name: &str) -> Result<ProfileDraft> {
        let location = self
            .locate(name)
            .ok_or_else(|| ProfileError::not_found(name))?;
        load_profile_from_path(name, location.record())
    }

    fn list(&self) -> Result<Vec<String>> {
        if !self.root.exists() {
            return Ok(Vec::new());
        }
        let entries =
            fs::read_dir(&self.root).map_err(|err| ProfileError::io(Operation::List, "*", err))?;

        let mut names = BTreeSet::new();
        for entry in entries {
            let entry = match entry {
                Ok(entry) => entry,
                Err(err) => {
                    warn!(error = %err, "skipping unreadable profile entry");
                    continue;
                }
            };
            let path = entry.path();
            if path.is_dir() {
                if let Some(name) = path.file_name().and_then(|name| name.to_str()) {
                    if is_valid_profile_name(name) && path.join(record_file_name(name)).is_file()
                    {
                        names.insert(name.to_string());
                    }
                }
                continue;
            }
            if path.extension().and_then(|ext| ext.to_str()) != Some(RECORD_EXTENSION) {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|stem| stem.to_str()) {
                if is_valid_profile_name(stem) {
                    names.insert(stem.to_string());
                }
            }
        }
        Ok(names.into_iter().collect())
    }

    fn delete(&self, name: &str) -> Result<()> {
        let location = self
            .locate(name)
            .ok_or_else(|| ProfileError::not_found(name))?;
        let io_err = |err| ProfileError::io(Operation::Delete, name, err);
        match &location {
            ProfileLocation::Current { dir, .. } => fs::remove_dir_all(dir).map_err(io_err)?,
            ProfileLocation::Legacy { record } => fs::remove_file(record).map_err(io_err)?,
        }
        info!(profile = name, "profile deleted");
        Ok(())
    }

    fn exists(&self, name: &str) -> bool {
        self.locate(name).is_some()
    }
}

/// Loads a profile record from an explicit path.
pub fn load_profile_from_path(name: &str, path: &Path) -> Result<ProfileDraft> {
    let data = fs::read_to_string(path).map_err(|err| {
        if err.kind() == io::ErrorKind::NotFound {
            ProfileError::not_found(name)
        } else {
            ProfileError::io(Operation::Read, name, err)
        }
    })?;
    serde_json::from_str(&data).map_err(|source| ProfileError::Decode {
        name: name.to_string(),
        source,
    })
}

fn record_file_name(name: &str) -> String {
    format!("{}.{}", name, RECORD_EXTENSION)
}

fn timestamp_now() -> String {
    Local::now().to_rfc3339_opts(SecondsFormat::Secs, true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn locate_prefers_directory_layout() {
        let dir = tempdir().unwrap();
        let store = JsonProfileStore::new(dir.path());
        fs::write(store.legacy_record_path("alpha"), "{}").unwrap();
        assert!(matches!(
            store.locate("alpha"),
            Some(ProfileLocation::Legacy { .. })
        ));

        fs::create_dir_all(store.profile_dir("alpha")).unwrap();
        fs::write(store.current_record_path("alpha"), "{}").unwrap();
        let location = store.locate("alpha").unwrap();
        assert!(matches!(location, ProfileLocation::Current { .. }));
        assert_eq!(location.record(), store.current_record_path("alpha"));
    }

    #[test]
    fn locate_rejects_path_like_names() {
        let dir = tempdir().unwrap();
        let store = JsonProfileStore::new(dir.path().join("profiles"));
        fs::write(dir.path().join("escape.json"), "{}").unwrap();
        assert_eq!(store.locate("../escape"), None);
    }

    #[test]
    fn empty_directory_is_not_a_profile() {
        let dir = tempdir().unwrap();
        let store = JsonProfileStore::new(dir.path());
        fs::create_dir_all(store.profile_dir("ghost")).unwrap();
        assert_eq!(store.locate("ghost"), None);
        assert!(store.list().unwrap().is_empty());
    }
}
