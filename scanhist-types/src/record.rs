use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// One scanned item as delivered by the scan history API.
///
/// Only `id` is required. Everything else the server sends is kept verbatim
/// in `fields` so that display code can show it without this crate owning
/// the full schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScanRecord {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl ScanRecord {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            fields: Map::new(),
        }
    }

    /// Builder-style helper used mostly by tests and fixtures.
    pub fn with_field(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.fields.insert(key.to_string(), value.into());
        self
    }

    /// First non-null field among `keys`, in order.
    pub fn field(&self, keys: &[&str]) -> Option<&Value> {
        keys.iter()
            .filter_map(|k| self.fields.get(*k))
            .find(|v| !v.is_null())
    }

    /// First present field among `keys` that is a string.
    pub fn field_str(&self, keys: &[&str]) -> Option<&str> {
        self.field(keys).and_then(Value::as_str)
    }

    pub fn file_name(&self) -> Option<&str> {
        self.field_str(&["fileName", "file_name", "filename", "name"])
    }

    pub fn status(&self) -> Option<&str> {
        self.field_str(&["status"])
    }

    pub fn verdict(&self) -> Option<&str> {
        self.field_str(&["verdict", "result"])
    }

    /// Creation time as sent by the server: either an RFC 3339 string or a
    /// numeric epoch timestamp.
    pub fn created_at(&self) -> Option<&Value> {
        self.field(&["createdAt", "created_at", "timestamp"])
    }
}

fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Text(String),
        Number(serde_json::Number),
    }

    Ok(match RawId::deserialize(deserializer)? {
        RawId::Text(s) => s,
        RawId::Number(n) => n.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn keeps_unknown_fields() {
        let record: ScanRecord = serde_json::from_value(json!({
            "id": "scan-1",
            "fileName": "invoice.pdf",
            "status": "completed",
            "engine": { "name": "clam", "version": 3 }
        }))
        .unwrap();

        assert_eq!(record.id, "scan-1");
        assert_eq!(record.file_name(), Some("invoice.pdf"));
        assert_eq!(record.status(), Some("completed"));
        assert_eq!(record.fields["engine"]["version"], 3);
    }

    #[test]
    fn numeric_id_becomes_string() {
        let record: ScanRecord = serde_json::from_value(json!({ "id": 42 })).unwrap();
        assert_eq!(record.id, "42");
        assert!(record.fields.is_empty());
    }

    #[test]
    fn missing_id_is_rejected() {
        assert!(serde_json::from_value::<ScanRecord>(json!({ "fileName": "x" })).is_err());
    }

    #[test]
    fn field_lookup_skips_nulls_and_falls_back() {
        let record = ScanRecord::new("a")
            .with_field("fileName", Value::Null)
            .with_field("file_name", "report.docx");
        assert_eq!(record.file_name(), Some("report.docx"));
        assert_eq!(record.verdict(), None);
    }

    #[test]
    fn null_timestamp_falls_back_to_later_key() {
        let record: ScanRecord = serde_json::from_value(json!({
            "id": "scan-3",
            "createdAt": null,
            "created_at": null,
            "timestamp": 1_709_296_200
        }))
        .unwrap();
        assert_eq!(record.created_at(), Some(&json!(1_709_296_200)));
        assert_eq!(record.field(&["createdAt"]), None);
    }

    #[test]
    fn serializes_flat() {
        let record = ScanRecord::new("scan-9").with_field("status", "queued");
        assert_eq!(
            serde_json::to_value(&record).unwrap(),
            json!({ "id": "scan-9", "status": "queued" })
        );
    }
}
