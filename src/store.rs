// src/store.rs
//! Named user profiles kept in a JSON file

use crate::{
    error::{Result, WnbError},
    wnb::AircraftProfile,
};
use std::{
    collections::BTreeMap,
    fs::File,
    io::Write,
    path::{Path, PathBuf},
};
use tracing::{debug, info};

/// Key/value store of profiles, keyed by display name
pub struct ProfileStore {
    path: PathBuf,
    profiles: BTreeMap<String, AircraftProfile>,
}

impl ProfileStore {
    /// Open the store at `path`; a missing file is an empty store
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();

        let profiles: BTreeMap<String, AircraftProfile> = if path.exists() {
            let contents = std::fs::read_to_string(&path)?;
            serde_json::from_str(&contents)
                .map_err(|e| WnbError::Parse(format!("Failed to parse profile store {}: {}", path.display(), e)))?
        } else {
            BTreeMap::new()
        };

        debug!(path = %path.display(), count = profiles.len(), "opened profile store");
        Ok(Self { path, profiles })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Store `profile` under its display name, replacing any previous one
    pub fn save(&mut self, profile: &AircraftProfile) -> Result<String> {
        profile.validate_identity()?;

        let key = profile.display_name();
        let mut profiles = self.profiles.clone();
        profiles.insert(key.clone(), profile.clone());
        self.persist(&profiles)?;
        self.profiles = profiles;

        info!(profile = %key, "saved profile");
        Ok(key)
    }

    pub fn load(&self, name: &str) -> Result<AircraftProfile> {
        self.find(name)
            .cloned()
            .ok_or_else(|| WnbError::NotFound(name.to_string()))
    }

    /// Exact key first, then a case-insensitive match on model or registration
    pub fn find(&self, name: &str) -> Option<&AircraftProfile> {
        self.profiles
            .get(name)
            .or_else(|| self.profiles.values().find(|p| p.matches(name)))
    }

    pub fn remove(&mut self, name: &str) -> Result<AircraftProfile> {
        let key = self
            .find(name)
            .map(AircraftProfile::display_name)
            .ok_or_else(|| WnbError::NotFound(name.to_string()))?;

        let mut profiles = self.profiles.clone();
        let removed = profiles
            .remove(&key)
            .ok_or_else(|| WnbError::NotFound(name.to_string()))?;
        self.persist(&profiles)?;
        self.profiles = profiles;

        info!(profile = %key, "removed profile");
        Ok(removed)
    }

    pub fn names(&self) -> Vec<String> {
        self.profiles.keys().cloned().collect()
    }

    pub fn profiles(&self) -> impl Iterator<Item = &AircraftProfile> {
        self.profiles.values()
    }

    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }

    /// Write `profiles` next to the store, then rename over it so a failed
    /// write leaves the previous file intact
    fn persist(&self, profiles: &BTreeMap<String, AircraftProfile>) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = serde_json::to_string_pretty(profiles)?;
        let tmp_path = self.path.with_extension("json.tmp");

        let written = File::create(&tmp_path)
            .and_then(|mut file| {
                file.write_all(contents.as_bytes())?;
                file.sync_all()
            })
            .and_then(|_| std::fs::rename(&tmp_path, &self.path));

        if let Err(e) = written {
            let _ = std::fs::remove_file(&tmp_path);
            return Err(e.into());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wnb::catalog;

    #[test]
    fn test_save_and_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("profiles.json");

        let mut store = ProfileStore::open(&path).unwrap();
        assert!(store.is_empty());

        let key = store.save(&catalog::cessna_172r()).unwrap();
        assert_eq!(key, "Cessna C172R N172R");

        let reopened = ProfileStore::open(&path).unwrap();
        assert_eq!(reopened.names(), vec!["Cessna C172R N172R".to_string()]);
        assert_eq!(reopened.load("n172r").unwrap(), catalog::cessna_172r());
    }

    #[test]
    fn test_save_requires_identity() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("profiles.json");
        let mut store = ProfileStore::open(&path).unwrap();

        let mut profile = catalog::vans_rv10();
        profile.reg.clear();

        assert!(matches!(store.save(&profile), Err(WnbError::Validation(_))));
        assert!(store.is_empty());
        assert!(!path.exists());
    }

    #[test]
    fn test_remove() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = ProfileStore::open(dir.path().join("profiles.json")).unwrap();
        store.save(&catalog::piper_pa28r_200b()).unwrap();
        store.save(&catalog::vans_rv10()).unwrap();

        let removed = store.remove("RV-10").unwrap();
        assert_eq!(removed.model, "RV-10");
        assert_eq!(store.len(), 1);
        assert!(matches!(store.remove("RV-10"), Err(WnbError::NotFound(_))));
    }

    #[test]
    fn test_failed_write_keeps_store() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("profiles.json");
        let mut store = ProfileStore::open(&path).unwrap();
        store.save(&catalog::cessna_172r()).unwrap();

        // A non-empty directory in place of the file makes the rename fail
        std::fs::remove_file(&path).unwrap();
        std::fs::create_dir(&path).unwrap();
        std::fs::write(path.join("keep"), "x").unwrap();

        assert!(matches!(store.save(&catalog::vans_rv10()), Err(WnbError::Io(_))));
        assert_eq!(store.names(), vec!["Cessna C172R N172R".to_string()]);
        assert!(matches!(store.load("RV-10"), Err(WnbError::NotFound(_))));

        assert!(store.remove("C172R").is_err());
        assert_eq!(store.len(), 1);
        assert!(!dir.path().join("profiles.json.tmp").exists());
    }

    #[test]
    fn test_load_missing() {
        let dir = tempfile::tempdir().unwrap();
        let store = ProfileStore::open(dir.path().join("profiles.json")).unwrap();
        assert!(matches!(store.load("C172R"), Err(WnbError::NotFound(_))));
    }
}
