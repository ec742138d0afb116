//! JSON encoding of records.
//!
//! Record files are pretty printed with four-space indentation so they stay
//! pleasant to read and diff by hand:
//!
//! ```text
//! {
//!     "code": "a1b2c3",
//!     "title": "Dune",
//!     "author": "Frank Herbert",
//!     "publisher": "Chilton",
//!     "description": "Desert planet"
//! }
//! ```

use crate::error::{CatalogError, Result};
use crate::model::Record;
use serde::Serialize;

const INDENT: &[u8] = b"    ";

pub fn encode(record: &Record) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(INDENT);
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
    record
        .serialize(&mut ser)
        .map_err(CatalogError::Serialization)?;
    Ok(buf)
}

pub fn decode(bytes: &[u8]) -> Result<Record> {
    serde_json::from_slice(bytes).map_err(CatalogError::Serialization)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::RecordFields;

    fn dune() -> Record {
        Record::new(
            "a1b2c3",
            RecordFields::new("Dune", "Frank Herbert", "Chilton", "Desert \"planet\"\nspice"),
        )
    }

    #[test]
    fn round_trips() {
        let record = dune();
        let bytes = encode(&record).unwrap();
        assert_eq!(decode(&bytes).unwrap(), record);
    }

    #[test]
    fn uses_code_field_and_four_space_indent() {
        let text = String::from_utf8(encode(&dune()).unwrap()).unwrap();
        assert!(text.contains("\n    \"code\": \"a1b2c3\""));
        assert!(!text.contains("\"id\""));
    }

    #[test]
    fn decodes_fields_in_any_order() {
        let json = r#"{"title":"T","description":"D","code":"zzz999","publisher":"P","author":"A"}"#;
        let record = decode(json.as_bytes()).unwrap();
        assert_eq!(record.id, "zzz999");
        assert_eq!(record.publisher, "P");
    }

    #[test]
    fn rejects_missing_fields() {
        let err = decode(br#"{"code":"abc123","title":"T"}"#).unwrap_err();
        assert!(matches!(err, CatalogError::Serialization(_)));
    }

    #[test]
    fn rejects_garbage() {
        assert!(decode(b"not json at all").is_err());
    }
}
