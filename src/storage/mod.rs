pub mod json_backend;

use std::path::PathBuf;

use crate::{errors::Result, profile::ProfileDraft};

/// Abstraction over persistence backends capable of storing named profiles.
pub trait ProfileStorage {
    /// Persists the draft under its `profile_name`, returning the record path.
    ///
    /// Users are sanitized in place and `created_at` is stamped only when the
    /// draft does not carry one yet, so edits keep their original timestamp.
    fn write(&self, draft: &mut ProfileDraft) -> Result<PathBuf>;

    fn read(&self, name: &str) -> Result<ProfileDraft>;

    /// Every stored profile name, once, sorted.
    fn list(&self) -> Result<Vec<String>>;

    fn delete(&self, name: &str) -> Result<()>;

    fn exists(&self, name: &str) -> bool;
}

pub use json_backend::{JsonProfileStore, ProfileLocation, RECORD_EXTENSION};
