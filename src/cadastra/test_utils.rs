use crate::gateway::fs::FileGateway;
use crate::store::RecordStore;
use std::path::PathBuf;
use tempfile::TempDir;

pub struct TestEnv {
    // Keeps the directory alive until the test is done
    pub _temp_dir: TempDir,
    pub root: PathBuf,
}

impl Default for TestEnv {
    fn default() -> Self {
        Self::new()
    }
}

impl TestEnv {
    pub fn new() -> Self {
        let temp_dir = tempfile::tempdir().expect("failed to create temp dir");
        let root = temp_dir.path().to_path_buf();
        Self {
            _temp_dir: temp_dir,
            root,
        }
    }

    pub fn gateway(&self) -> FileGateway {
        FileGateway::new(self.root.clone())
    }

    /// A loaded store over this environment's data file.
    pub fn store(&self) -> RecordStore<FileGateway> {
        let mut store = RecordStore::new(self.gateway());
        store.load();
        store
    }
}
