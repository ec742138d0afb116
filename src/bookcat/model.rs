use serde::{Deserialize, Serialize};

/// Prefix shared by record files and exported documents.
pub const FILE_PREFIX: &str = "record-";

/// The mutable part of a record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordFields {
    pub title: String,
    pub author: String,
    pub publisher: String,
    pub description: String,
}

impl RecordFields {
    pub fn new(
        title: impl Into<String>,
        author: impl Into<String>,
        publisher: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            author: author.into(),
            publisher: publisher.into(),
            description: description.into(),
        }
    }
}

/// One catalog entry. `id` is fixed at creation; the rest can be edited.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    #[serde(rename = "code")]
    pub id: String,
    pub title: String,
    pub author: String,
    pub publisher: String,
    pub description: String,
}

impl Record {
    pub fn new(id: impl Into<String>, fields: RecordFields) -> Self {
        Self {
            id: id.into(),
            title: fields.title,
            author: fields.author,
            publisher: fields.publisher,
            description: fields.description,
        }
    }

    pub fn fields(&self) -> RecordFields {
        RecordFields {
            title: self.title.clone(),
            author: self.author.clone(),
            publisher: self.publisher.clone(),
            description: self.description.clone(),
        }
    }

    /// Replace the content fields, leaving `id` alone.
    pub fn apply(&mut self, fields: RecordFields) {
        self.title = fields.title;
        self.author = fields.author;
        self.publisher = fields.publisher;
        self.description = fields.description;
    }

    pub fn file_name(&self) -> String {
        record_file_name(&self.id)
    }

    pub fn document_name(&self) -> String {
        document_file_name(&self.id)
    }
}

pub fn record_file_name(id: &str) -> String {
    format!("{}{}.json", FILE_PREFIX, id)
}

pub fn document_file_name(id: &str) -> String {
    format!("{}{}.pdf", FILE_PREFIX, id)
}

/// Returns true for names following the `record-<id>.json` convention.
pub fn is_record_file_name(name: &str) -> bool {
    name.strip_prefix(FILE_PREFIX)
        .and_then(|rest| rest.strip_suffix(".json"))
        .is_some_and(|id| !id.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn apply_keeps_id() {
        let mut record = Record::new("A1B2C3", RecordFields::new("Dune", "Herbert", "Chilton", ""));
        record.apply(RecordFields::new("Emma", "Austen", "Murray", "A novel"));

        assert_eq!(record.id, "A1B2C3");
        assert_eq!(record.title, "Emma");
        assert_eq!(record.fields().description, "A novel");
    }

    #[test]
    fn file_names_follow_id() {
        let record = Record::new("abc123", RecordFields::default());
        assert_eq!(record.file_name(), "record-abc123.json");
        assert_eq!(record.document_name(), "record-abc123.pdf");
    }

    #[test]
    fn recognizes_record_file_names() {
        assert!(is_record_file_name("record-abc123.json"));
        assert!(!is_record_file_name("record-.json"));
        assert!(!is_record_file_name("record-abc123.pdf"));
        assert!(!is_record_file_name("config.json"));
        assert!(!is_record_file_name(".record-abc123.json.tmp"));
    }
}
