use std::collections::BTreeMap;

use serde::{Serialize, Deserialize};
use serde_json::{Map, Value};

use crate::utils::errors::ApiError;

/// Attribute holding the pre-signed GET URL once the image is uploaded.
pub const IMAGE_URL_KEY: &str = "imageUrl";

/// Attributes stored as text. PATCH values for them are converted the same
/// way POST converts its fields.
pub const TEXT_ATTRIBUTES: [&str; 4] = ["ownername", "petname", "age", IMAGE_URL_KEY];

/// Fields a registration must carry, in the order they are validated.
pub const REQUIRED_SAVE_FIELDS: [&str; 6] = ["ownerid", "ownername", "petname", "age", "fileName", "fileType"];

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Default)]
pub struct OwnerRecord {
    pub ownerid: String,
    #[serde(default)]
    pub ownername: String,
    #[serde(default)]
    pub petname: String,
    #[serde(default)]
    pub age: String,
    #[serde(rename = "imageUrl", default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    /// Anything else written through PATCH.
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl OwnerRecord {
    pub fn new(ownerid: &str) -> Self {
        OwnerRecord {
            ownerid: ownerid.to_string(),
            ..Default::default()
        }
    }

    pub fn set_attribute(&mut self, key: &str, value: Value) {
        match (key, stored_attribute(key, value)) {
            ("ownername", Value::String(v)) => self.ownername = v,
            ("petname", Value::String(v)) => self.petname = v,
            ("age", Value::String(v)) => self.age = v,
            (IMAGE_URL_KEY, Value::String(v)) => self.image_url = Some(v),
            (key, value) => {
                self.extra.insert(key.to_string(), value);
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SaveOwnerReceive {
    pub ownerid: String,
    pub ownername: String,
    pub petname: String,
    pub age: String,
    pub file_name: String,
    pub file_type: String,
}

impl SaveOwnerReceive {
    pub fn from_body(body: &Map<String, Value>) -> Result<Self, ApiError> {
        let mut fields = Vec::with_capacity(REQUIRED_SAVE_FIELDS.len());
        for field in REQUIRED_SAVE_FIELDS {
            match body.get(field).and_then(truthy_text) {
                Some(value) => fields.push(value),
                None => {
                    log::warn!("Validation failed for field: {}", field);
                    return Err(ApiError::BadRequest(format!("Missing or invalid field: {}", field)));
                }
            }
        }

        let mut fields = fields.into_iter();
        let mut next = || fields.next().unwrap_or_default();
        Ok(SaveOwnerReceive {
            ownerid: next(),
            ownername: next(),
            petname: next(),
            age: next(),
            file_name: next(),
            file_type: next(),
        })
    }

    pub fn to_record(&self) -> OwnerRecord {
        OwnerRecord {
            ownerid: self.ownerid.clone(),
            ownername: self.ownername.clone(),
            petname: self.petname.clone(),
            age: self.age.clone(),
            image_url: None,
            extra: BTreeMap::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct UpdateOwnerReceive {
    pub owner_id: String,
    pub update_key: String,
    pub update_value: Value,
}

impl UpdateOwnerReceive {
    pub fn from_body(body: &Map<String, Value>) -> Result<Self, ApiError> {
        let owner_id = body.get("ownerId").and_then(truthy_text);
        let update_key = body.get("updateKey").and_then(truthy_text);
        let update_value = body.get("updateValue").filter(|v| is_truthy(v)).cloned();

        match (owner_id, update_key, update_value) {
            (Some(owner_id), Some(update_key), Some(update_value)) => {
                validate_attribute_name(&update_key)?;
                let update_value = if TEXT_ATTRIBUTES.contains(&update_key.as_str()) {
                    match truthy_text(&update_value) {
                        Some(text) => Value::String(text),
                        None => {
                            return Err(ApiError::BadRequest(format!("Invalid updateValue for {}", update_key)))
                        }
                    }
                } else {
                    update_value
                };
                Ok(UpdateOwnerReceive { owner_id, update_key, update_value })
            }
            _ => Err(ApiError::BadRequest("Missing ownerId, updateKey, or updateValue".to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DeleteOwnerReceive {
    pub owner_id: String,
}

impl DeleteOwnerReceive {
    pub fn from_body(body: &Map<String, Value>) -> Result<Self, ApiError> {
        body.get("ownerId")
            .and_then(truthy_text)
            .map(|owner_id| DeleteOwnerReceive { owner_id })
            .ok_or_else(|| ApiError::BadRequest("Missing ownerId".to_string()))
    }
}

#[derive(Serialize, Deserialize, Debug)]
pub struct OwnerQuery {
    pub ownerid: Option<String>,
}

#[derive(Serialize, Debug)]
pub struct OwnersSend {
    pub owners: Vec<OwnerRecord>,
}

#[derive(Serialize, Debug)]
pub struct SaveOwnerSend {
    #[serde(rename = "Operation")]
    pub operation: &'static str,
    #[serde(rename = "Message")]
    pub message: &'static str,
    #[serde(rename = "Item")]
    pub item: OwnerRecord,
    #[serde(rename = "uploadUrl")]
    pub upload_url: String,
    #[serde(rename = "fileUrl")]
    pub file_url: String,
}

#[derive(Serialize, Debug)]
pub struct UpdateOwnerSend {
    #[serde(rename = "Operation")]
    pub operation: &'static str,
    #[serde(rename = "Message")]
    pub message: &'static str,
    #[serde(rename = "UpdatedAttributes")]
    pub updated_attributes: Map<String, Value>,
}

#[derive(Serialize, Debug)]
pub struct DeleteOwnerSend {
    #[serde(rename = "Operation")]
    pub operation: &'static str,
    #[serde(rename = "Message")]
    pub message: &'static str,
    #[serde(rename = "Item")]
    pub item: Option<OwnerRecord>,
}

/// The value as it is written for `key`: text attributes always hold strings.
pub fn stored_attribute(key: &str, value: Value) -> Value {
    match value {
        Value::String(_) => value,
        other if TEXT_ATTRIBUTES.contains(&key) => Value::String(other.to_string()),
        other => other,
    }
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map_or(true, |n| n != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    }
}

/// Non-empty strings and non-zero numbers; numbers are kept as their text form.
fn truthy_text(value: &Value) -> Option<String> {
    if !is_truthy(value) {
        return None;
    }
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn validate_attribute_name(key: &str) -> Result<(), ApiError> {
    let plain = key.chars().all(|c| c.is_ascii_alphanumeric() || c == '_');
    if !plain || key == "ownerid" || key == "_id" {
        return Err(ApiError::BadRequest(format!("Invalid updateKey: {}", key)));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn body(value: Value) -> Map<String, Value> {
        value.as_object().cloned().unwrap()
    }

    fn full_save_body() -> Value {
        json!({
            "ownerid": "103",
            "ownername": "Ana",
            "petname": "Toby",
            "age": "4",
            "fileName": "toby.png",
            "fileType": "image/png"
        })
    }

    #[test]
    fn test_save_receive_reads_all_fields() {
        let request = SaveOwnerReceive::from_body(&body(full_save_body())).unwrap();

        assert_eq!(request.ownerid, "103");
        assert_eq!(request.ownername, "Ana");
        assert_eq!(request.petname, "Toby");
        assert_eq!(request.age, "4");
        assert_eq!(request.file_name, "toby.png");
        assert_eq!(request.file_type, "image/png");
    }

    #[test]
    fn test_save_receive_reports_first_missing_field() {
        let mut value = full_save_body();
        value["petname"] = json!("");
        value.as_object_mut().unwrap().remove("fileType");

        let err = SaveOwnerReceive::from_body(&body(value)).unwrap_err();
        assert_eq!(err.to_string(), "Bad request: Missing or invalid field: petname");
    }

    #[test]
    fn test_save_receive_accepts_numeric_age() {
        let mut value = full_save_body();
        value["age"] = json!(4);

        let request = SaveOwnerReceive::from_body(&body(value.clone())).unwrap();
        assert_eq!(request.age, "4");

        value["age"] = json!(0);
        assert!(SaveOwnerReceive::from_body(&body(value)).is_err());
    }

    #[test]
    fn test_to_record_has_no_image_yet() {
        let record = SaveOwnerReceive::from_body(&body(full_save_body())).unwrap().to_record();
        assert_eq!(record.image_url, None);
        assert_eq!(serde_json::to_value(&record).unwrap(), json!({
            "ownerid": "103",
            "ownername": "Ana",
            "petname": "Toby",
            "age": "4"
        }));
    }

    #[test]
    fn test_update_receive_requires_all_fields() {
        let err = UpdateOwnerReceive::from_body(&body(json!({
            "ownerId": "103",
            "updateKey": "imageUrl"
        }))).unwrap_err();
        assert_eq!(err.to_string(), "Bad request: Missing ownerId, updateKey, or updateValue");

        let request = UpdateOwnerReceive::from_body(&body(json!({
            "ownerId": "103",
            "updateKey": "imageUrl",
            "updateValue": "https://example.com/toby.png"
        }))).unwrap();
        assert_eq!(request.update_value, json!("https://example.com/toby.png"));
    }

    #[test]
    fn test_update_receive_stores_text_attributes_as_text() {
        let request = UpdateOwnerReceive::from_body(&body(json!({
            "ownerId": "103",
            "updateKey": "age",
            "updateValue": 5
        }))).unwrap();
        assert_eq!(request.update_value, json!("5"));

        for (key, value) in [("imageUrl", json!(true)), ("petname", json!(["Toby"])), ("age", json!({"years": 5}))] {
            let err = UpdateOwnerReceive::from_body(&body(json!({
                "ownerId": "103",
                "updateKey": key,
                "updateValue": value
            }))).unwrap_err();
            assert_eq!(err.to_string(), format!("Bad request: Invalid updateValue for {}", key));
        }

        let request = UpdateOwnerReceive::from_body(&body(json!({
            "ownerId": "103",
            "updateKey": "vaccinated",
            "updateValue": true
        }))).unwrap();
        assert_eq!(request.update_value, json!(true));
    }

    #[test]
    fn test_update_receive_rejects_unsafe_keys() {
        for key in ["ownerid", "_id", "a.b", "$set", "with space"] {
            let result = UpdateOwnerReceive::from_body(&body(json!({
                "ownerId": "103",
                "updateKey": key,
                "updateValue": "x"
            })));
            assert!(result.is_err(), "key {} should be rejected", key);
        }
    }

    #[test]
    fn test_set_attribute() {
        let mut record = OwnerRecord::new("103");
        record.set_attribute("imageUrl", json!("https://example.com/a.png"));
        record.set_attribute("petname", json!("Toby"));
        record.set_attribute("vaccinated", json!(true));

        assert_eq!(record.image_url.as_deref(), Some("https://example.com/a.png"));
        assert_eq!(record.petname, "Toby");
        assert_eq!(record.extra.get("vaccinated"), Some(&json!(true)));

        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value["imageUrl"], "https://example.com/a.png");
        assert_eq!(value["vaccinated"], true);
    }

    #[test]
    fn test_set_attribute_keeps_text_fields_typed() {
        let mut record = OwnerRecord::new("103");
        record.age = "4".to_string();
        record.set_attribute("age", json!(5));
        record.set_attribute("imageUrl", json!(7));

        assert_eq!(record.age, "5");
        assert_eq!(record.image_url.as_deref(), Some("7"));
        assert!(record.extra.is_empty());

        let text = serde_json::to_string(&record).unwrap();
        assert_eq!(text.matches("\"age\"").count(), 1);
        let decoded: OwnerRecord = serde_json::from_str(&text).unwrap();
        assert_eq!(decoded, record);
    }

    #[test]
    fn test_owner_record_deserializes_extra_attributes() {
        let record: OwnerRecord = serde_json::from_value(json!({
            "ownerid": "105",
            "ownername": "Luis",
            "color": "brown"
        })).unwrap();

        assert_eq!(record.ownername, "Luis");
        assert_eq!(record.petname, "");
        assert_eq!(record.extra.get("color"), Some(&json!("brown")));
    }

    #[test]
    fn test_delete_receive() {
        assert_eq!(
            DeleteOwnerReceive::from_body(&body(json!({"ownerId": "101"}))).unwrap(),
            DeleteOwnerReceive { owner_id: "101".to_string() }
        );
        assert!(DeleteOwnerReceive::from_body(&body(json!({}))).is_err());
    }
}
