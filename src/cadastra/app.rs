//! # App Layer
//!
//! The app layer is what a presentation client talks to. A client sends an
//! [`Intent`] (what the user did), and renders the [`Snapshot`] it gets back
//! through a subscription.
//!
//! ## State Ownership
//!
//! - [`RecordStore`] owns the records and the sort mode.
//! - [`EditingSession`] owns the edit target.
//! - Everything else a screen needs (theme, search text, the status toast, the
//!   form fields and their errors) is one immutable [`UiState`] value. It only
//!   changes through [`reduce`], a pure function from the previous state and a
//!   [`UiEvent`] to the next state.
//!
//! ## Dispatch Flow
//!
//! ```text
//! Intent ──► App::dispatch ──► store / session ──► UiEvent ──► reduce ──► UiState
//!                                                                            │
//!                                   subscribers ◄── Snapshot ◄───────────────┘
//! ```
//!
//! Subscribers are notified after every dispatch, including failed ones (the
//! failure shows up as an error status).

use crate::error::{CadastraError, Result};
use crate::gateway::PersistenceGateway;
use crate::messages::{CmdMessage, CmdResult};
use crate::model::{Record, RecordInput, SortMode};
use crate::session::EditingSession;
use crate::store::RecordStore;
use crate::validation::{validate, FieldError, Validation};
use tracing::debug;

/// A user action routed from the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    Submit { name: String, email: String },
    RequestEdit(String),
    RequestDelete(String),
    ToggleSort,
    ChangeSearchTerm(String),
    CancelEdit,
    ToggleTheme,
    DismissStatus,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormState {
    pub name: String,
    pub email: String,
    pub name_error: Option<FieldError>,
    pub email_error: Option<FieldError>,
}

impl FormState {
    pub fn has_errors(&self) -> bool {
        self.name_error.is_some() || self.email_error.is_some()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UiState {
    pub dark_mode: bool,
    pub search_term: String,
    pub status: Option<CmdMessage>,
    pub form: FormState,
}

impl Default for UiState {
    fn default() -> Self {
        Self {
            dark_mode: true,
            search_term: String::new(),
            status: None,
            form: FormState::default(),
        }
    }
}

/// Something that happened, as far as [`UiState`] is concerned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEvent {
    FormRejected {
        name: String,
        email: String,
        validation: Validation,
    },
    Saved(CmdMessage),
    EditStarted(Record),
    EditCancelled,
    Removed(CmdMessage),
    Sorted(CmdMessage),
    SearchChanged(String),
    ThemeToggled,
    StatusDismissed,
    Failed(String),
}

/// Computes the next UI state. Pure: `state` is never modified.
pub fn reduce(state: &UiState, event: &UiEvent) -> UiState {
    let mut next = state.clone();
    match event {
        UiEvent::FormRejected {
            name,
            email,
            validation,
        } => {
            next.form = FormState {
                name: name.clone(),
                email: email.clone(),
                name_error: validation.name_error,
                email_error: validation.email_error,
            };
        }
        UiEvent::Saved(message) | UiEvent::Removed(message) => {
            next.form = FormState::default();
            next.status = Some(message.clone());
        }
        UiEvent::EditStarted(record) => {
            next.form = FormState {
                name: record.name.clone(),
                email: record.email.clone(),
                ..FormState::default()
            };
            next.status = Some(CmdMessage::info(format!(
                "Editing record: {}",
                record.name
            )));
        }
        UiEvent::EditCancelled => {
            next.form = FormState::default();
            next.status = Some(CmdMessage::info("Edit cancelled."));
        }
        UiEvent::Sorted(message) => next.status = Some(message.clone()),
        UiEvent::SearchChanged(term) => next.search_term = term.clone(),
        UiEvent::ThemeToggled => next.dark_mode = !state.dark_mode,
        UiEvent::StatusDismissed => next.status = None,
        UiEvent::Failed(reason) => next.status = Some(CmdMessage::error(reason.clone())),
    }
    next
}

/// Everything a client needs to render one frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    /// Current view (sort applied), filtered by the search term.
    pub view: Vec<Record>,
    pub sort_mode: SortMode,
    pub sort_label: &'static str,
    pub editing: Option<Record>,
    pub ui: UiState,
}

pub type SubscriptionId = usize;

type Subscriber = Box<dyn FnMut(&Snapshot)>;

pub struct App<G: PersistenceGateway> {
    store: RecordStore<G>,
    session: EditingSession,
    ui: UiState,
    subscribers: Vec<(SubscriptionId, Subscriber)>,
    next_subscription: SubscriptionId,
}

impl<G: PersistenceGateway> App<G> {
    pub fn new(store: RecordStore<G>) -> Self {
        Self {
            store,
            session: EditingSession::new(),
            ui: UiState::default(),
            subscribers: Vec::new(),
            next_subscription: 0,
        }
    }

    pub fn with_dark_mode(mut self, dark_mode: bool) -> Self {
        self.ui.dark_mode = dark_mode;
        self
    }

    /// Loads the store and publishes the first snapshot.
    pub fn start(&mut self) {
        self.store.load();
        self.notify();
    }

    pub fn dispatch(&mut self, intent: Intent) -> Result<()> {
        debug!(?intent, "dispatch");
        let outcome = self.apply(intent);
        let event = match &outcome {
            Ok(event) => event.clone(),
            Err(e) => UiEvent::Failed(e.to_string()),
        };
        self.ui = reduce(&self.ui, &event);
        self.notify();
        outcome.map(|_| ())
    }

    fn apply(&mut self, intent: Intent) -> Result<UiEvent> {
        match intent {
            Intent::Submit { name, email } => {
                let validation = validate(&name, &email);
                if !validation.is_valid() {
                    return Ok(UiEvent::FormRejected {
                        name,
                        email,
                        validation,
                    });
                }
                let mut input = RecordInput::new(name, email);
                input.id = self.session.target_id();
                let result = self.store.upsert(input)?;
                self.session.finish();
                Ok(UiEvent::Saved(status_of(&result)))
            }
            Intent::RequestEdit(id) => {
                let record = self
                    .store
                    .get(&id)
                    .cloned()
                    .ok_or(CadastraError::RecordNotFound(id))?;
                self.session.begin(record.clone());
                Ok(UiEvent::EditStarted(record))
            }
            Intent::RequestDelete(id) => {
                let result = self.store.remove(&id)?;
                self.session.finish();
                Ok(UiEvent::Removed(status_of(&result)))
            }
            Intent::ToggleSort => {
                let result = self.store.toggle_sort();
                Ok(UiEvent::Sorted(status_of(&result)))
            }
            Intent::ChangeSearchTerm(term) => Ok(UiEvent::SearchChanged(term)),
            Intent::CancelEdit => {
                self.session.cancel();
                Ok(UiEvent::EditCancelled)
            }
            Intent::ToggleTheme => Ok(UiEvent::ThemeToggled),
            Intent::DismissStatus => Ok(UiEvent::StatusDismissed),
        }
    }

    pub fn snapshot(&self) -> Snapshot {
        let sort_mode = self.store.sort_mode();
        Snapshot {
            view: self
                .store
                .search(&self.ui.search_term)
                .into_iter()
                .cloned()
                .collect(),
            sort_mode,
            sort_label: sort_mode.label(),
            editing: self.session.current().cloned(),
            ui: self.ui.clone(),
        }
    }

    /// Registers `f` to be called with a fresh snapshot after every dispatch.
    pub fn subscribe(&mut self, f: impl FnMut(&Snapshot) + 'static) -> SubscriptionId {
        let id = self.next_subscription;
        self.next_subscription += 1;
        self.subscribers.push((id, Box::new(f)));
        id
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|(sub_id, _)| *sub_id != id);
        self.subscribers.len() != before
    }

    pub fn store(&self) -> &RecordStore<G> {
        &self.store
    }

    pub fn session(&self) -> &EditingSession {
        &self.session
    }

    pub fn ui(&self) -> &UiState {
        &self.ui
    }

    fn notify(&mut self) {
        if self.subscribers.is_empty() {
            return;
        }
        let snapshot = self.snapshot();
        for (_, subscriber) in self.subscribers.iter_mut() {
            subscriber(&snapshot);
        }
    }
}

fn status_of(result: &CmdResult) -> CmdMessage {
    result
        .status()
        .cloned()
        .unwrap_or_else(|| CmdMessage::info("Done."))
}
