use super::PersistenceGateway;
use crate::error::{CadastraError, Result};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

const DEFAULT_DATA_FILE: &str = "storage.json";

/// File-backed key-value store.
///
/// Every key lives in one JSON object file inside `root`. A missing file is an
/// empty store; the directory is created on first write.
pub struct FileGateway {
    root: PathBuf,
    data_file: String,
}

impl FileGateway {
    pub fn new(root: PathBuf) -> Self {
        Self {
            root,
            data_file: DEFAULT_DATA_FILE.to_string(),
        }
    }

    pub fn with_data_file(mut self, name: &str) -> Self {
        self.data_file = name.to_string();
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn data_path(&self) -> PathBuf {
        self.root.join(&self.data_file)
    }

    fn ensure_dir(&self) -> Result<()> {
        if !self.root.exists() {
            fs::create_dir_all(&self.root).map_err(CadastraError::Io)?;
        }
        Ok(())
    }

    fn load_entries(&self) -> Result<BTreeMap<String, String>> {
        let path = self.data_path();
        if !path.exists() {
            return Ok(BTreeMap::new());
        }
        let content = fs::read_to_string(&path).map_err(CadastraError::Io)?;
        if content.trim().is_empty() {
            return Ok(BTreeMap::new());
        }
        let entries: BTreeMap<String, String> =
            serde_json::from_str(&content).map_err(CadastraError::Serialization)?;
        Ok(entries)
    }

    fn save_entries(&self, entries: &BTreeMap<String, String>) -> Result<()> {
        self.ensure_dir()?;
        let path = self.data_path();
        let tmp_path = path.with_extension("json.tmp");
        let content =
            serde_json::to_string_pretty(entries).map_err(CadastraError::Serialization)?;

        // Write then rename so a crash never leaves a half-written store behind.
        fs::write(&tmp_path, content).map_err(CadastraError::Io)?;
        fs::rename(&tmp_path, &path).map_err(CadastraError::Io)?;
        Ok(())
    }
}

impl PersistenceGateway for FileGateway {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let entries = self.load_entries()?;
        debug!(key, path = %self.data_path().display(), found = entries.contains_key(key), "gateway get");
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        // An unparseable file holds nothing recoverable; the write replaces it.
        let mut entries = match self.load_entries() {
            Ok(entries) => entries,
            Err(CadastraError::Serialization(e)) => {
                warn!(path = %self.data_path().display(), error = %e, "replacing corrupt data file");
                BTreeMap::new()
            }
            Err(e) => return Err(e),
        };
        entries.insert(key.to_string(), value.to_string());
        self.save_entries(&entries)?;
        debug!(key, bytes = value.len(), "gateway set");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn setup() -> (TempDir, FileGateway) {
        let dir = TempDir::new().unwrap();
        let gateway = FileGateway::new(dir.path().join("data"));
        (dir, gateway)
    }

    #[test]
    fn missing_file_reads_as_empty() {
        let (_dir, gateway) = setup();
        assert_eq!(gateway.get("anything").unwrap(), None);
    }

    #[test]
    fn set_then_get() {
        let (_dir, gateway) = setup();
        gateway.set("k", "[1,2,3]").unwrap();
        assert_eq!(gateway.get("k").unwrap(), Some("[1,2,3]".to_string()));
        assert!(gateway.data_path().exists());
    }

    #[test]
    fn keys_are_independent() {
        let (_dir, gateway) = setup();
        gateway.set("a", "1").unwrap();
        gateway.set("b", "2").unwrap();
        gateway.set("a", "3").unwrap();
        assert_eq!(gateway.get("a").unwrap().as_deref(), Some("3"));
        assert_eq!(gateway.get("b").unwrap().as_deref(), Some("2"));
    }

    #[test]
    fn no_temp_file_left_behind() {
        let (_dir, gateway) = setup();
        gateway.set("k", "v").unwrap();
        for entry in fs::read_dir(gateway.root()).unwrap() {
            let name = entry.unwrap().file_name();
            let name = name.to_string_lossy();
            assert!(!name.ends_with(".tmp"), "leftover temp file: {}", name);
        }
    }

    #[test]
    fn corrupt_file_is_a_serialization_error() {
        let (_dir, gateway) = setup();
        fs::create_dir_all(gateway.root()).unwrap();
        fs::write(gateway.data_path(), "{not json").unwrap();
        assert!(matches!(
            gateway.get("k"),
            Err(CadastraError::Serialization(_))
        ));
    }

    #[test]
    fn write_replaces_corrupt_file() {
        let (_dir, gateway) = setup();
        fs::create_dir_all(gateway.root()).unwrap();
        fs::write(gateway.data_path(), "{not json").unwrap();
        gateway.set("k", "v").unwrap();
        assert_eq!(gateway.get("k").unwrap().as_deref(), Some("v"));
    }

    #[test]
    fn custom_data_file_name() {
        let (_dir, gateway) = setup();
        let gateway = gateway.with_data_file("other.json");
        gateway.set("k", "v").unwrap();
        assert!(gateway.root().join("other.json").exists());
    }
}
