//! Directory Store Module
//!
//! Flat-directory record store backed by std::fs.

use std::fs;
use std::path::PathBuf;

use super::RecordStore;
use crate::error::Result;

/// Suffix appended to logical keys to form record file names.
const RECORD_SUFFIX: &str = ".json";

// == Dir Store ==
/// Record store keeping each record as one `<key>.json` file inside a
/// single flat directory.
#[derive(Debug)]
pub struct DirStore {
    root: PathBuf,
}

impl DirStore {
    // == Constructor ==
    /// Opens a store rooted at `root`, creating the directory if needed.
    pub fn open(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        fs::create_dir_all(&root)?;
        Ok(Self { root })
    }

    /// The directory this store writes into.
    pub fn root(&self) -> &PathBuf {
        &self.root
    }

    fn record_path(&self, name: &str) -> PathBuf {
        self.root.join(name)
    }
}

impl RecordStore for DirStore {
    fn record_name(&self, key: &str) -> String {
        format!("{key}{RECORD_SUFFIX}")
    }

    fn record_key(&self, name: &str) -> Option<String> {
        name.strip_suffix(RECORD_SUFFIX).map(str::to_owned)
    }

    fn is_record(&self, name: &str) -> bool {
        self.record_path(name).is_file()
    }

    fn list(&self) -> Result<Vec<String>> {
        let mut names = Vec::new();
        for entry in fs::read_dir(&self.root)? {
            let entry = entry?;
            if !entry.file_type()?.is_file() {
                continue;
            }

            // Foreign files in the root are not records.
            if let Some(name) = entry.file_name().to_str() {
                if self.record_key(name).is_some() {
                    names.push(name.to_owned());
                }
            }
        }
        Ok(names)
    }

    fn read(&self, name: &str) -> Result<Vec<u8>> {
        Ok(fs::read(self.record_path(name))?)
    }

    fn write(&self, name: &str, bytes: &[u8]) -> Result<()> {
        Ok(fs::write(self.record_path(name), bytes)?)
    }

    fn unlink(&self, name: &str) -> Result<()> {
        Ok(fs::remove_file(self.record_path(name))?)
    }
}
