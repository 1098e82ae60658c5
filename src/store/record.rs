//! Data model for per-product record files under `CreatedProducts/`.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One product record, stored as `CreatedProducts/<identifier>.json`.
///
/// The filename key is authoritative and carried in `identifier`, which is
/// never serialized. The game's own `ID` field is optional on disk; when it
/// is present the accessor keeps it equal to the filename key on save, and
/// records that never had one don't grow one from a plain display rename.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProductRecord {
    /// Filename key; set by the accessor on load, not an on-disk field.
    #[serde(skip)]
    pub identifier: String,

    /// The game's in-file copy of the identifier, absent in older saves.
    #[serde(rename = "ID", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// User-facing display name.
    #[serde(rename = "Name")]
    pub name: String,

    /// Type tag, descriptive only.
    #[serde(rename = "DataType", default, skip_serializing_if = "Option::is_none")]
    pub data_type: Option<String>,

    /// Property tags, descriptive only.
    #[serde(rename = "Properties", default, skip_serializing_if = "Option::is_none")]
    pub properties: Option<Vec<String>>,

    /// Fields we don't model, preserved verbatim on rewrite.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ProductRecord {
    /// Move the record to a new identifier slot, syncing the in-file `ID`.
    pub fn set_identifier(&mut self, new_id: &str) {
        self.identifier = new_id.to_string();
        self.id = Some(new_id.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_minimal_record_parses() {
        let record: ProductRecord = serde_json::from_value(json!({"Name": "OG Kush"})).unwrap();
        assert_eq!(record.name, "OG Kush");
        assert!(record.id.is_none());
        assert!(record.data_type.is_none());
        assert!(record.properties.is_none());
    }

    #[test]
    fn test_full_record_roundtrip() {
        let raw = json!({
            "ID": "ogkush",
            "Name": "OG Kush",
            "DataType": "WeedProductData",
            "Properties": ["calming", "munchies"],
            "DrugType": 0
        });

        let record: ProductRecord = serde_json::from_value(raw.clone()).unwrap();
        assert_eq!(record.id.as_deref(), Some("ogkush"));
        assert_eq!(record.data_type.as_deref(), Some("WeedProductData"));
        assert_eq!(record.extra.get("DrugType"), Some(&json!(0)));

        let back = serde_json::to_value(&record).unwrap();
        assert_eq!(back, raw);
    }

    #[test]
    fn test_absent_optionals_stay_absent() {
        let record: ProductRecord = serde_json::from_value(json!({"Name": "OG Kush"})).unwrap();
        let back = serde_json::to_value(&record).unwrap();
        assert_eq!(back, json!({"Name": "OG Kush"}));
    }

    #[test]
    fn test_set_identifier_syncs_id_field() {
        let mut record: ProductRecord =
            serde_json::from_value(json!({"Name": "OG Kush"})).unwrap();
        record.set_identifier("ogkush2");

        assert_eq!(record.identifier, "ogkush2");
        assert_eq!(record.id.as_deref(), Some("ogkush2"));
    }

    #[test]
    fn test_identifier_is_not_serialized() {
        let mut record: ProductRecord =
            serde_json::from_value(json!({"Name": "OG Kush"})).unwrap();
        record.identifier = "ogkush".to_string();

        let back = serde_json::to_value(&record).unwrap();
        assert!(back.get("identifier").is_none());
    }
}
