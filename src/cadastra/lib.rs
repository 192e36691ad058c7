//! # Cadastra Architecture
//!
//! Cadastra is a **UI-agnostic record registry library**. It keeps a list of people
//! (a name and an email each), in the order they were registered, and persists that
//! list as a single JSON array under one key of a key-value store. The bundled
//! binary is just one client of the library.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (cli/, wired by main.rs)                         │
//! │  - Parses arguments, prints views and status messages       │
//! │  - The ONLY place that knows about stdout/stderr/exit codes │
//! └─────────────────────────────────────────────────────────────┘
//!                              │  Intent
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  App Layer (app.rs)                                         │
//! │  - One immutable UiState, advanced by pure reducers         │
//! │  - Routes intents to the store and the edit session         │
//! │  - Notifies subscribers with a Snapshot after each intent   │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Core (store.rs, session.rs, validation.rs)                 │
//! │  - RecordStore: registration order, sorted/filtered views   │
//! │  - EditingSession: which record the form is editing         │
//! │  - validate(): pure field checks                            │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Gateway Layer (gateway/)                                   │
//! │  - PersistenceGateway trait: get(key) / set(key, value)     │
//! │  - FileGateway (production), MemGateway (testing)           │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Registration Order vs. Views
//!
//! The registration-order sequence is the only canonical (and the only persisted)
//! order. The alphabetical view is a projection recomputed from it and dropped on
//! the next mutation. Search always filters whatever view is current.
//!
//! ## Failure Policy
//!
//! Nothing in the data path is fatal. A failed or malformed read at startup loads
//! an empty registry; a failed write is logged and the in-memory state is kept.
//! Mutations are refused until the first `load()` has completed, so an early write
//! can never clobber persisted data with an empty list.
//!
//! ## Module Overview
//!
//! - [`app`]: Intent dispatch, UI state reducers and subscriptions
//! - [`store`]: The record store
//! - [`session`]: The edit session
//! - [`validation`]: Form field validation
//! - [`collation`]: Name ordering for the alphabetical view
//! - [`gateway`]: Key-value persistence abstraction and implementations
//! - [`model`]: Core data types (`Record`, `RecordInput`, `SortMode`)
//! - [`messages`]: Status messages returned by operations
//! - [`config`]: Configuration management
//! - [`logging`]: Tracing subscriber setup for binaries
//! - [`error`]: Error types

pub mod app;
pub mod collation;
pub mod config;
pub mod error;
pub mod gateway;
pub mod logging;
pub mod messages;
pub mod model;
pub mod session;
pub mod store;
pub mod validation;

#[cfg(any(test, feature = "test_utils"))]
pub mod test_utils;
