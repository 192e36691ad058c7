//! # Record Store
//!
//! [`RecordStore`] owns every [`Record`] and the one canonical order they have:
//! registration order. Everything else is derived.
//!
//! ## Views
//!
//! - **Registration** (default): records in the order they were created.
//! - **Alphabetical**: records ordered by name using [`compare_names`]. Built on
//!   demand from the registration sequence, never persisted, and abandoned on
//!   the next mutation (every upsert or remove resets the mode).
//!
//! [`RecordStore::search`] filters whichever view is current.
//!
//! ## Persistence
//!
//! Each mutation writes the full registration sequence through the gateway as a
//! JSON array. There is no coalescing and no retry. A failed write is logged and
//! the in-memory change stands.
//!
//! Mutations are refused with [`CadastraError::NotLoaded`] until [`RecordStore::load`]
//! has run, so a write can never replace persisted data with an empty startup list.

use crate::collation::compare_names;
use crate::error::{CadastraError, Result};
use crate::gateway::{PersistenceGateway, DEFAULT_STORAGE_KEY};
use crate::messages::{CmdMessage, CmdResult, UpsertKind};
use crate::model::{Record, RecordInput, SortMode};
use std::collections::HashSet;
use tracing::{debug, error, warn};

pub struct RecordStore<G: PersistenceGateway> {
    gateway: G,
    key: String,
    records: Vec<Record>,
    sort_mode: SortMode,
    loaded: bool,
}

impl<G: PersistenceGateway> RecordStore<G> {
    pub fn new(gateway: G) -> Self {
        Self {
            gateway,
            key: DEFAULT_STORAGE_KEY.to_string(),
            records: Vec::new(),
            sort_mode: SortMode::Registration,
            loaded: false,
        }
    }

    pub fn with_key(mut self, key: &str) -> Self {
        self.key = key.to_string();
        self
    }

    pub fn gateway(&self) -> &G {
        &self.gateway
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    /// Reads the registry from the gateway, replacing whatever is in memory.
    ///
    /// Never fails: a gateway error or a malformed payload is logged and the store
    /// starts empty. Returns the number of records loaded.
    pub fn load(&mut self) -> usize {
        self.records = match self.gateway.get(&self.key) {
            Ok(Some(raw)) => parse_records(&raw).unwrap_or_else(|reason| {
                error!(key = %self.key, %reason, "stored records are malformed; starting empty");
                Vec::new()
            }),
            Ok(None) => Vec::new(),
            Err(e) => {
                error!(key = %self.key, error = %e, "failed to read records; starting empty");
                Vec::new()
            }
        };
        self.sort_mode = SortMode::Registration;
        self.loaded = true;
        debug!(count = self.records.len(), "records loaded");
        self.records.len()
    }

    /// Creates a record (no id) or replaces the record carrying the input's id.
    ///
    /// A new record is appended to the registration order; a replaced one keeps its
    /// position. An id that matches nothing is an error and changes nothing.
    pub fn upsert(&mut self, input: RecordInput) -> Result<CmdResult> {
        self.ensure_loaded()?;

        let (record, kind) = match input.target_id() {
            None => {
                let record = Record::new(&input.name, &input.email);
                self.records.push(record.clone());
                (record, UpsertKind::Created)
            }
            Some(id) => {
                let slot = self
                    .records
                    .iter_mut()
                    .find(|r| r.id == id)
                    .ok_or_else(|| CadastraError::RecordNotFound(id.to_string()))?;
                slot.name = input.name.trim().to_string();
                slot.email = input.email.trim().to_string();
                (slot.clone(), UpsertKind::Updated)
            }
        };

        self.sort_mode = SortMode::Registration;
        self.persist();

        let message = match kind {
            UpsertKind::Created => CmdMessage::success(format!("Record created: {}", record.name)),
            UpsertKind::Updated => CmdMessage::success(format!("Record updated: {}", record.name)),
        };
        Ok(CmdResult::default()
            .with_upsert(kind)
            .with_affected_records(vec![record])
            .with_message(message))
    }

    /// Removes the record with `id`. Removing an unknown id succeeds and changes
    /// nothing, so deletes are idempotent. Either way the registry is written and
    /// the view returns to registration order.
    pub fn remove(&mut self, id: &str) -> Result<CmdResult> {
        self.ensure_loaded()?;

        let removed = self
            .records
            .iter()
            .position(|r| r.id == id)
            .map(|pos| self.records.remove(pos));

        self.sort_mode = SortMode::Registration;
        self.persist();

        Ok(match removed {
            Some(record) => CmdResult::default()
                .with_message(CmdMessage::success(format!(
                    "Record removed: {}",
                    record.name
                )))
                .with_affected_records(vec![record]),
            None => CmdResult::default()
                .with_message(CmdMessage::info(format!("No record with id {}", id))),
        })
    }

    /// Flips between registration order and the alphabetical view.
    pub fn toggle_sort(&mut self) -> CmdResult {
        self.sort_mode = self.sort_mode.toggled();
        let message = match self.sort_mode {
            SortMode::Alphabetical => CmdMessage::info("List sorted by name (A-Z)"),
            SortMode::Registration => CmdMessage::info("List back in registration order"),
        };
        CmdResult::default().with_message(message)
    }

    pub fn sort_mode(&self) -> SortMode {
        self.sort_mode
    }

    /// Records in the current view's order.
    pub fn view(&self) -> Vec<&Record> {
        let mut view: Vec<&Record> = self.records.iter().collect();
        if self.sort_mode == SortMode::Alphabetical {
            // Stable: names that collate equal keep registration order.
            view.sort_by(|a, b| compare_names(&a.name, &b.name));
        }
        view
    }

    /// Records of the current view whose name or email contains `term`, ignoring
    /// case. An empty term matches everything.
    pub fn search(&self, term: &str) -> Vec<&Record> {
        let view = self.view();
        if term.is_empty() {
            return view;
        }
        let needle = term.to_lowercase();
        view.into_iter()
            .filter(|r| {
                r.name.to_lowercase().contains(&needle) || r.email.to_lowercase().contains(&needle)
            })
            .collect()
    }

    pub fn get(&self, id: &str) -> Option<&Record> {
        self.records.iter().find(|r| r.id == id)
    }

    /// Records in registration order.
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    fn ensure_loaded(&self) -> Result<()> {
        if self.loaded {
            Ok(())
        } else {
            Err(CadastraError::NotLoaded)
        }
    }

    fn persist(&self) {
        let json = match serde_json::to_string(&self.records) {
            Ok(json) => json,
            Err(e) => {
                error!(error = %e, "failed to serialize records");
                return;
            }
        };
        match self.gateway.set(&self.key, &json) {
            Ok(()) => debug!(count = self.records.len(), "records saved"),
            Err(e) => warn!(
                key = %self.key,
                error = %e,
                "failed to save records; in-memory changes kept"
            ),
        }
    }
}

/// Parses a stored payload. Either every record is admitted or none is.
fn parse_records(raw: &str) -> std::result::Result<Vec<Record>, String> {
    if raw.trim().is_empty() {
        return Ok(Vec::new());
    }
    let records: Vec<Record> = serde_json::from_str(raw).map_err(|e| e.to_string())?;

    let mut seen = HashSet::new();
    for record in &records {
        if record.id.is_empty() {
            return Err("record with an empty id".to_string());
        }
        if !seen.insert(record.id.as_str()) {
            return Err(format!("duplicate record id {}", record.id));
        }
    }
    Ok(records)
}
