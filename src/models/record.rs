use serde::de::Error;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Number of positional fields in a data-file record
pub const RECORD_FIELDS: usize = 5;

/// Contact details for one vehicle.
///
/// Deserializes from `[phone1, phone2, owner, vehicle, note]`. Short arrays and
/// `null` entries become empty strings so rendering never sees a missing field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ContactRecord {
    pub primary_phone: String,
    pub secondary_phone: String,
    pub owner_name: String,
    pub vehicle_description: String,
    pub note: String,
}

impl ContactRecord {
    pub fn new(
        primary_phone: impl Into<String>,
        secondary_phone: impl Into<String>,
        owner_name: impl Into<String>,
        vehicle_description: impl Into<String>,
        note: impl Into<String>,
    ) -> Self {
        Self {
            primary_phone: primary_phone.into(),
            secondary_phone: secondary_phone.into(),
            owner_name: owner_name.into(),
            vehicle_description: vehicle_description.into(),
            note: note.into(),
        }
    }

    /// Build a record from positional fields, padding missing ones with `""`
    pub fn from_fields<I>(fields: I) -> Self
    where
        I: IntoIterator<Item = String>,
    {
        let mut fields = fields.into_iter();
        let mut next = || fields.next().unwrap_or_default();
        Self {
            primary_phone: next(),
            secondary_phone: next(),
            owner_name: next(),
            vehicle_description: next(),
            note: next(),
        }
    }
}

impl<'de> Deserialize<'de> for ContactRecord {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        let Value::Array(items) = value else {
            return Err(Error::custom("record must be an array of up to 5 fields"));
        };

        let fields = items
            .into_iter()
            .take(RECORD_FIELDS)
            .map(field_to_string)
            .collect::<Result<Vec<_>, _>>()
            .map_err(Error::custom)?;

        Ok(Self::from_fields(fields))
    }
}

/// Accepts strings, numbers (phone numbers typed without quotes) and null
fn field_to_string(value: Value) -> Result<String, String> {
    match value {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        Value::Null => Ok(String::new()),
        other => Err(format!("unsupported record field: {}", other)),
    }
}

/// Version block of the record data file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreMeta {
    #[serde(default = "default_version")]
    pub version: String,
    #[serde(default)]
    pub updated: String,
    /// Derived from the loaded records; the value in the file is ignored
    #[serde(default)]
    pub total: usize,
}

fn default_version() -> String {
    "1.0".to_string()
}

impl Default for StoreMeta {
    fn default() -> Self {
        Self { version: default_version(), updated: String::new(), total: 0 }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_from_full_array() {
        let json = r#"["15555555555", "16666666666", "测试用户", "测试车辆", "系统演示"]"#;
        let record: ContactRecord = serde_json::from_str(json).unwrap();

        assert_eq!(record.primary_phone, "15555555555");
        assert_eq!(record.secondary_phone, "16666666666");
        assert_eq!(record.owner_name, "测试用户");
        assert_eq!(record.vehicle_description, "测试车辆");
        assert_eq!(record.note, "系统演示");
    }

    #[test]
    fn test_record_short_array_pads_with_empty_strings() {
        let record: ContactRecord = serde_json::from_str(r#"["13900000001", "", "王先生"]"#).unwrap();

        assert_eq!(record.owner_name, "王先生");
        assert_eq!(record.vehicle_description, "");
        assert_eq!(record.note, "");
    }

    #[test]
    fn test_record_null_and_numeric_fields() {
        let record: ContactRecord =
            serde_json::from_str(r#"[13900000001, null, "Owner", "Car", null]"#).unwrap();

        assert_eq!(record.primary_phone, "13900000001");
        assert_eq!(record.secondary_phone, "");
        assert_eq!(record.note, "");
    }

    #[test]
    fn test_record_extra_fields_ignored() {
        let record: ContactRecord =
            serde_json::from_str(r#"["1", "2", "3", "4", "5", "6", "7"]"#).unwrap();
        assert_eq!(record.note, "5");
    }

    #[test]
    fn test_record_rejects_object() {
        let result = serde_json::from_str::<ContactRecord>(r#"{"owner": "x"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_record_rejects_nested_array_field() {
        let result = serde_json::from_str::<ContactRecord>(r#"["1", ["2"]]"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_meta_defaults() {
        let meta: StoreMeta = serde_json::from_str("{}").unwrap();
        assert_eq!(meta.version, "1.0");
        assert_eq!(meta.updated, "");
        assert_eq!(meta.total, 0);
    }
}
