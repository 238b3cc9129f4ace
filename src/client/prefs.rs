use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde_json::Value;
use thiserror::Error;

/// Key remembering whether the admin "add link" panel is expanded.
pub const ADD_PANEL_KEY: &str = "isAddOpen";

#[derive(Error, Debug)]
pub enum PrefsError {
    #[error("could not access preferences: {0}")]
    Io(#[from] io::Error),

    #[error("preferences file is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Small key-value store persisted as a JSON object on disk.
#[derive(Debug)]
pub struct Preferences {
    path: PathBuf,
    values: BTreeMap<String, Value>,
}

impl Preferences {
    /// Opens the file at `path`; a missing file starts empty.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, PrefsError> {
        let path = path.as_ref().to_path_buf();
        let values = match fs::read(&path) {
            Ok(bytes) => serde_json::from_slice(&bytes)?,
            Err(err) if err.kind() == io::ErrorKind::NotFound => BTreeMap::new(),
            Err(err) => return Err(err.into()),
        };
        Ok(Self { path, values })
    }

    /// Defaults to expanded when nothing was saved yet.
    pub fn is_add_open(&self) -> bool {
        self.values
            .get(ADD_PANEL_KEY)
            .and_then(Value::as_bool)
            .unwrap_or(true)
    }

    pub fn set_add_open(&mut self, open: bool) -> Result<(), PrefsError> {
        self.values
            .insert(ADD_PANEL_KEY.to_string(), Value::Bool(open));
        self.save()
    }

    fn save(&self) -> Result<(), PrefsError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, serde_json::to_vec_pretty(&self.values)?)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_defaults_to_open() {
        let dir = tempfile::tempdir().unwrap();
        let prefs = Preferences::open(dir.path().join("prefs.json")).unwrap();
        assert!(prefs.is_add_open());
    }

    #[test]
    fn flag_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("prefs.json");

        let mut prefs = Preferences::open(&path).unwrap();
        prefs.set_add_open(false).unwrap();

        let reopened = Preferences::open(&path).unwrap();
        assert!(!reopened.is_add_open());
        let raw: Value = serde_json::from_slice(&fs::read(&path).unwrap()).unwrap();
        assert_eq!(raw[ADD_PANEL_KEY], Value::Bool(false));
    }

    #[test]
    fn corrupt_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prefs.json");
        fs::write(&path, "not json").unwrap();

        assert!(matches!(Preferences::open(&path), Err(PrefsError::Json(_))));
    }
}
