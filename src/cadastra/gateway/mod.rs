//! # Persistence Gateway
//!
//! The record store never touches the disk directly. It reads and writes one
//! string value under one key through the [`PersistenceGateway`] trait.
//!
//! ## Implementations
//!
//! - [`fs::FileGateway`]: Production key-value file
//!   - All keys live in a single JSON object file (`storage.json` by default)
//!   - Writes are atomic (temp file + rename)
//!
//! - [`memory::MemGateway`]: In-memory map for testing
//!   - No persistence
//!   - Can simulate read and write failures
//!
//! ## Value Format
//!
//! The registry is stored under [`DEFAULT_STORAGE_KEY`] as a JSON array of
//! `{id, name, email}` objects. There is no version tag; the gateway itself does
//! not care what the value contains.
//!
//! ```text
//! <data-dir>/
//! ├── storage.json    # {"@cadastraai_users": "[{\"id\":...}]"}
//! └── config.json     # CadastraConfig
//! ```

use crate::error::Result;

pub mod fs;
pub mod memory;

/// Namespaced key the registry lives under.
pub const DEFAULT_STORAGE_KEY: &str = "@cadastraai_users";

/// Abstract key-value storage.
///
/// Methods take `&self`; implementations that hold state in memory use interior
/// mutability. Errors are returned to the caller, which decides how to report them.
pub trait PersistenceGateway {
    /// Read the value stored under `key`, or `None` if nothing was ever stored.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Store `value` under `key`, replacing any previous value.
    fn set(&self, key: &str, value: &str) -> Result<()>;
}

impl<G: PersistenceGateway + ?Sized> PersistenceGateway for &G {
    fn get(&self, key: &str) -> Result<Option<String>> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        (**self).set(key, value)
    }
}
