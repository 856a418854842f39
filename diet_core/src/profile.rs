//! Profile validation and persistence with file locking.
//!
//! The stored profile is the only persisted input of the metrics engine;
//! metrics themselves are never written to disk.

use crate::{Error, Result, UserProfile};
use fs2::FileExt;
use std::fs::{File, OpenOptions};
use std::io::{Read, Write};
use std::path::Path;
use tempfile::NamedTempFile;

impl UserProfile {
    /// Range-check the profile before it is stored
    ///
    /// The engine accepts anything; this is the stricter gate used at the
    /// input boundary. A negative deficit, or one larger than TDEE, is allowed.
    pub fn validate(&self) -> Result<()> {
        if self.age == 0 {
            return Err(Error::InvalidProfile("age must be at least 1 year".into()));
        }
        check_positive("height", self.height)?;
        check_positive("weight", self.weight)?;
        check_positive("activity_level", self.activity_level)?;
        if !self.calorie_deficit.is_finite() {
            return Err(Error::InvalidProfile(
                "calorie_deficit must be a finite number".into(),
            ));
        }
        Ok(())
    }

    /// Load the stored profile with shared locking
    ///
    /// Returns `None` if the file doesn't exist. A corrupted file is logged
    /// and treated as missing.
    pub fn load(path: &Path) -> Result<Option<Self>> {
        if !path.exists() {
            tracing::info!("No profile file found at {:?}", path);
            return Ok(None);
        }

        let file = match File::open(path) {
            Ok(f) => f,
            Err(e) => {
                tracing::warn!("Unable to open profile {:?}: {}. Ignoring it.", path, e);
                return Ok(None);
            }
        };

        file.lock_shared()?;

        let mut contents = String::new();
        let read = std::io::BufReader::new(&file).read_to_string(&mut contents);
        file.unlock()?;

        if let Err(e) = read {
            tracing::warn!("Failed to read profile {:?}: {}. Ignoring it.", path, e);
            return Ok(None);
        }

        match serde_json::from_str::<UserProfile>(&contents) {
            Ok(profile) => {
                tracing::debug!("Loaded profile from {:?}", path);
                Ok(Some(profile))
            }
            Err(e) => {
                tracing::warn!("Failed to parse profile {:?}: {}. Ignoring it.", path, e);
                Ok(None)
            }
        }
    }

    /// Load the stored profile, failing if there is none
    pub fn load_required(path: &Path) -> Result<Self> {
        Self::load(path)?.ok_or(Error::MissingProfile)
    }

    /// Save the profile atomically
    ///
    /// Holds the profile's sidecar lock while writing to a temp file in the
    /// same directory, syncing it, and renaming it over the original.
    pub fn save(&self, path: &Path) -> Result<()> {
        let lock = acquire_update_lock(path)?;
        self.write_atomic(path)?;
        lock.unlock()?;
        Ok(())
    }

    /// Load the stored profile, modify it, validate and save it back
    ///
    /// The sidecar lock is held across all three steps, so concurrent
    /// updates apply one after another instead of overwriting each other.
    pub fn update<F>(path: &Path, f: F) -> Result<Self>
    where
        F: FnOnce(&mut UserProfile) -> Result<()>,
    {
        let lock = acquire_update_lock(path)?;

        let mut profile = Self::load_required(path)?;
        f(&mut profile)?;
        profile.validate()?;
        profile.write_atomic(path)?;

        lock.unlock()?;
        Ok(profile)
    }

    fn write_atomic(&self, path: &Path) -> Result<()> {
        let parent = parent_dir(path)?;
        let temp = NamedTempFile::new_in(parent)?;

        {
            let mut writer = std::io::BufWriter::new(temp.as_file());
            serde_json::to_writer_pretty(&mut writer, self)?;
            writer.flush()?;
        }

        temp.as_file().sync_all()?;
        temp.persist(path).map_err(|e| Error::Io(e.error))?;

        tracing::info!("Saved profile to {:?}", path);
        Ok(())
    }
}

/// Open `<profile>.lock` next to the profile and lock it exclusively
///
/// The lock is released when the returned file is unlocked or dropped.
fn acquire_update_lock(path: &Path) -> Result<File> {
    std::fs::create_dir_all(parent_dir(path)?)?;
    let lock = OpenOptions::new()
        .create(true)
        .write(true)
        .open(path.with_extension("lock"))?;
    lock.lock_exclusive()?;
    Ok(lock)
}

fn parent_dir(path: &Path) -> Result<&Path> {
    path.parent()
        .ok_or_else(|| Error::Other(format!("Profile path {:?} has no parent directory", path)))
}

fn check_positive(field: &str, value: f64) -> Result<()> {
    if !value.is_finite() || value <= 0.0 {
        return Err(Error::InvalidProfile(format!(
            "{} must be a positive number, got {}",
            field, value
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Gender;

    fn create_test_profile() -> UserProfile {
        UserProfile {
            gender: Gender::Female,
            age: 28,
            height: 165.0,
            weight: 58.0,
            activity_level: 1.55,
            calorie_deficit: 300.0,
        }
    }

    #[test]
    fn test_validate_accepts_sane_profile() {
        assert!(create_test_profile().validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_non_physical() {
        let mut profile = create_test_profile();
        profile.age = 0;
        assert!(matches!(profile.validate(), Err(Error::InvalidProfile(_))));

        let mut profile = create_test_profile();
        profile.height = 0.0;
        assert!(matches!(profile.validate(), Err(Error::InvalidProfile(_))));

        let mut profile = create_test_profile();
        profile.weight = f64::INFINITY;
        assert!(matches!(profile.validate(), Err(Error::InvalidProfile(_))));

        let mut profile = create_test_profile();
        profile.activity_level = -1.2;
        assert!(matches!(profile.validate(), Err(Error::InvalidProfile(_))));

        let mut profile = create_test_profile();
        profile.calorie_deficit = f64::NAN;
        assert!(matches!(profile.validate(), Err(Error::InvalidProfile(_))));
    }

    #[test]
    fn test_validate_allows_large_or_negative_deficit() {
        let mut profile = create_test_profile();
        profile.calorie_deficit = 5000.0;
        assert!(profile.validate().is_ok());
        profile.calorie_deficit = -250.0;
        assert!(profile.validate().is_ok());
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("profile.json");

        let profile = create_test_profile();
        profile.save(&path).unwrap();

        let loaded = UserProfile::load(&path).unwrap();
        assert_eq!(loaded, Some(profile));
    }

    #[test]
    fn test_load_nonexistent_returns_none() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("nonexistent.json");

        assert!(UserProfile::load(&path).unwrap().is_none());
        assert!(matches!(
            UserProfile::load_required(&path),
            Err(Error::MissingProfile)
        ));
    }

    #[test]
    fn test_corrupted_profile_treated_as_missing() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("profile.json");
        std::fs::write(&path, "{ invalid json }").unwrap();

        assert!(UserProfile::load(&path).unwrap().is_none());
    }

    #[test]
    fn test_update_pattern() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("profile.json");
        create_test_profile().save(&path).unwrap();

        UserProfile::update(&path, |p| {
            p.weight = 56.5;
            Ok(())
        })
        .unwrap();

        let loaded = UserProfile::load_required(&path).unwrap();
        assert_eq!(loaded.weight, 56.5);
    }

    #[test]
    fn test_update_rejects_invalid_change() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("profile.json");
        create_test_profile().save(&path).unwrap();

        let result = UserProfile::update(&path, |p| {
            p.height = -1.0;
            Ok(())
        });
        assert!(result.is_err());

        // stored profile unchanged
        let loaded = UserProfile::load_required(&path).unwrap();
        assert_eq!(loaded.height, 165.0);
    }

    #[test]
    fn test_concurrent_updates_are_serialized() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("profile.json");
        let mut profile = create_test_profile();
        profile.age = 20;
        profile.save(&path).unwrap();

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let path = path.clone();
                std::thread::spawn(move || {
                    UserProfile::update(&path, |p| {
                        p.age += 1;
                        Ok(())
                    })
                    .unwrap();
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        // No increment lost to a read-modify-write race
        assert_eq!(UserProfile::load_required(&path).unwrap().age, 28);
    }

    #[test]
    fn test_atomic_save() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("profile.json");

        create_test_profile().save(&path).unwrap();

        let extras: Vec<_> = std::fs::read_dir(temp_dir.path())
            .unwrap()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_name() != "profile.json" && e.file_name() != "profile.lock")
            .collect();
        assert!(
            extras.is_empty(),
            "Expected only profile.json, found extras: {:?}",
            extras
        );
    }
}
