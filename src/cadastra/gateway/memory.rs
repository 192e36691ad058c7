use super::PersistenceGateway;
use crate::error::{CadastraError, Result};
use std::cell::{Cell, RefCell};
use std::collections::HashMap;

/// In-memory key-value store for testing.
///
/// Uses `RefCell` for interior mutability since cadastra is single-threaded.
/// Counts writes so tests can check that every mutation issues its own save.
#[derive(Default)]
pub struct MemGateway {
    entries: RefCell<HashMap<String, String>>,
    writes: Cell<usize>,
    simulate_read_error: Cell<bool>,
    simulate_write_error: Cell<bool>,
}

impl MemGateway {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a raw value, bypassing write simulation and the write counter.
    pub fn with_value(self, key: &str, value: &str) -> Self {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        self
    }

    pub fn set_simulate_read_error(&self, simulate: bool) {
        self.simulate_read_error.set(simulate);
    }

    pub fn set_simulate_write_error(&self, simulate: bool) {
        self.simulate_write_error.set(simulate);
    }

    /// Number of successful `set` calls so far.
    pub fn writes(&self) -> usize {
        self.writes.get()
    }

    /// Raw stored value, for assertions.
    pub fn raw(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }
}

impl PersistenceGateway for MemGateway {
    fn get(&self, key: &str) -> Result<Option<String>> {
        if self.simulate_read_error.get() {
            return Err(CadastraError::Gateway("Simulated read error".to_string()));
        }
        Ok(self.entries.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        if self.simulate_write_error.get() {
            return Err(CadastraError::Gateway("Simulated write error".to_string()));
        }
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        self.writes.set(self.writes.get() + 1);
        Ok(())
    }
}

// --- Test Fixtures ---

#[cfg(any(test, feature = "test_utils"))]
pub mod fixtures {
    use super::*;
    use crate::gateway::DEFAULT_STORAGE_KEY;
    use crate::model::Record;
    use crate::store::RecordStore;

    pub struct StoreFixture {
        records: Vec<Record>,
    }

    impl Default for StoreFixture {
        fn default() -> Self {
            Self::new()
        }
    }

    impl StoreFixture {
        pub fn new() -> Self {
            Self {
                records: Vec::new(),
            }
        }

        pub fn with_records(mut self, count: usize) -> Self {
            for i in 0..count {
                let name = format!("Person {}", letter(i));
                let email = format!("person{}@example.com", i + 1);
                self.records.push(Record::new(&name, &email));
            }
            self
        }

        pub fn with_record(mut self, name: &str, email: &str) -> Self {
            self.records.push(Record::new(name, email));
            self
        }

        /// A gateway already holding the fixture's records under the default key.
        pub fn gateway(&self) -> MemGateway {
            let json = serde_json::to_string(&self.records).unwrap();
            MemGateway::new().with_value(DEFAULT_STORAGE_KEY, &json)
        }

        /// A loaded store over a fresh gateway holding the fixture's records.
        pub fn store(&self) -> RecordStore<MemGateway> {
            let mut store = RecordStore::new(self.gateway());
            store.load();
            store
        }
    }

    // Names must pass validation, so number them with letters.
    fn letter(i: usize) -> char {
        (b'A' + (i % 26) as u8) as char
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_and_get() {
        let gateway = MemGateway::new();
        assert_eq!(gateway.get("k").unwrap(), None);
        gateway.set("k", "v").unwrap();
        assert_eq!(gateway.get("k").unwrap().as_deref(), Some("v"));
        assert_eq!(gateway.writes(), 1);
    }

    #[test]
    fn simulated_failures() {
        let gateway = MemGateway::new().with_value("k", "v");
        gateway.set_simulate_read_error(true);
        assert!(matches!(gateway.get("k"), Err(CadastraError::Gateway(_))));

        gateway.set_simulate_write_error(true);
        assert!(gateway.set("k", "w").is_err());
        assert_eq!(gateway.raw("k").as_deref(), Some("v"));
        assert_eq!(gateway.writes(), 0);
    }
}
