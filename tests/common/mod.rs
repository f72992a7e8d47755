#![allow(dead_code)]

use std::{fs, path::Path};

use assert_cmd::Command;
use otori_core::{
    profile::{ProfileDraft, ProfileType},
    storage::JsonProfileStore,
};
use tempfile::TempDir;

/// Isolated app home plus profile store, both inside one temp dir.
pub struct TestEnv {
    pub dir: TempDir,
    pub store: JsonProfileStore,
}

impl TestEnv {
    pub fn new() -> Self {
        let dir = TempDir::new().expect("create temp dir");
        let store = JsonProfileStore::new(dir.path().join("profiles"));
        Self { dir, store }
    }

    /// The binary pointed at this environment, with colour and logs off.
    pub fn cli(&self) -> Command {
        let mut cmd = Command::cargo_bin("otori_cli").expect("binary built");
        cmd.env("OTORI_HOME", self.dir.path().join("home"))
            .env("OTORI_PROFILES_DIR", self.store.root())
            .env("NO_COLOR", "1")
            .env("RUST_LOG", "off")
            .env_remove("OTORI_TEST_KEYS");
        cmd
    }

    /// Drops a flat `<root>/<name>.json` file the way older releases did.
    pub fn write_legacy(&self, draft: &ProfileDraft) {
        fs::create_dir_all(self.store.root()).unwrap();
        let json = serde_json::to_string_pretty(draft).unwrap();
        fs::write(self.store.legacy_record_path(&draft.profile_name), json).unwrap();
    }
}

pub fn sample(name: &str) -> ProfileDraft {
    ProfileDraft::new(ProfileType::Classic, "web-01", name)
        .with_company("Acme")
        .with_users(["root", "admin"])
}

pub fn read_json(path: &Path) -> serde_json::Value {
    serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap()
}
