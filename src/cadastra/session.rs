use crate::model::Record;

/// Which record, if any, the form is currently editing.
///
/// The session holds a copy of the record taken when editing began; the store
/// stays the owner of the real one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditingSession {
    editing: Option<Record>,
}

impl EditingSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts editing `record`, replacing any previous target.
    pub fn begin(&mut self, record: Record) {
        self.editing = Some(record);
    }

    pub fn cancel(&mut self) {
        self.editing = None;
    }

    /// Ends the session after a successful upsert or remove.
    ///
    /// Any remove finishes the session, including removing a record other than
    /// the one being edited. Kept as-is until the intended behavior is settled.
    pub fn finish(&mut self) {
        self.editing = None;
    }

    pub fn current(&self) -> Option<&Record> {
        self.editing.as_ref()
    }

    pub fn is_editing(&self) -> bool {
        self.editing.is_some()
    }

    /// Id a submission should carry: the target's id while editing.
    pub fn target_id(&self) -> Option<String> {
        self.editing.as_ref().map(|r| r.id.clone())
    }

    /// Values to pre-fill the form with: the target's fields, or empty strings.
    pub fn form_fields(&self) -> (String, String) {
        match &self.editing {
            Some(record) => (record.name.clone(), record.email.clone()),
            None => (String::new(), String::new()),
        }
    }
}
