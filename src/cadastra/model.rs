use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One registered person.
///
/// Serialized exactly as `{"id": ..., "name": ..., "email": ...}`; the persisted
/// registry is a JSON array of these with no version tag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Record {
    pub id: String,
    pub name: String,
    pub email: String,
}

impl Record {
    /// Creates a record with a freshly generated id. Name and email are trimmed.
    pub fn new(name: &str, email: &str) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: name.trim().to_string(),
            email: email.trim().to_string(),
        }
    }
}

/// A form submission. No id (or an empty one) means "create".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordInput {
    pub id: Option<String>,
    pub name: String,
    pub email: String,
}

impl RecordInput {
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
            email: email.into(),
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// The id this submission targets, if it carries a non-empty one.
    pub fn target_id(&self) -> Option<&str> {
        self.id.as_deref().filter(|id| !id.is_empty())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortMode {
    #[default]
    Registration,
    Alphabetical,
}

impl SortMode {
    pub fn toggled(self) -> Self {
        match self {
            SortMode::Registration => SortMode::Alphabetical,
            SortMode::Alphabetical => SortMode::Registration,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SortMode::Registration => "registration order",
            SortMode::Alphabetical => "name (A-Z)",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_record_trims_fields_and_gets_an_id() {
        let record = Record::new("  Ana Silva ", " ana@x.com\n");
        assert_eq!(record.name, "Ana Silva");
        assert_eq!(record.email, "ana@x.com");
        assert!(!record.id.is_empty());
    }

    #[test]
    fn generated_ids_differ() {
        let a = Record::new("Ana", "a@x.com");
        let b = Record::new("Ana", "a@x.com");
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn empty_id_is_not_a_target() {
        assert_eq!(RecordInput::new("Ana", "a@x.com").target_id(), None);
        assert_eq!(
            RecordInput::new("Ana", "a@x.com").with_id("").target_id(),
            None
        );
        assert_eq!(
            RecordInput::new("Ana", "a@x.com").with_id("42").target_id(),
            Some("42")
        );
    }

    #[test]
    fn record_wire_format_has_exactly_three_fields() {
        let record = Record {
            id: "1700000000000".into(),
            name: "Ana".into(),
            email: "ana@x.com".into(),
        };
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"id": "1700000000000", "name": "Ana", "email": "ana@x.com"})
        );
    }

    #[test]
    fn sort_mode_toggles_back_and_forth() {
        let mode = SortMode::default();
        assert_eq!(mode, SortMode::Registration);
        assert_eq!(mode.toggled(), SortMode::Alphabetical);
        assert_eq!(mode.toggled().toggled(), SortMode::Registration);
    }
}
