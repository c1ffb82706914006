use serde::Serialize;
use serde_json::{Map, Value};

/// Form field that names the update type instead of carrying data.
pub const UPDATE_TYPE_FIELD: &str = "update_type";

/// Payload of `/api/update`: `{ <update_type>: { field: value, ... } }`.
#[derive(Debug, Clone, PartialEq)]
pub struct UpdateEnvelope {
    update_type: String,
    fields: Map<String, Value>,
}

impl UpdateEnvelope {
    pub fn new(update_type: impl Into<String>, fields: Map<String, Value>) -> Self {
        Self {
            update_type: update_type.into(),
            fields,
        }
    }

    /// Folds submitted form fields into an envelope. The `update_type` field
    /// becomes the outer key; every other field lands in the inner map.
    pub fn from_fields<I, K, V>(fields: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let (update_type, fields) = fields.into_iter().fold(
            (String::new(), Map::new()),
            |(update_type, mut map), (key, value)| {
                let key = key.into();
                if key == UPDATE_TYPE_FIELD {
                    (value.into(), map)
                } else {
                    map.insert(key, Value::String(value.into()));
                    (update_type, map)
                }
            },
        );
        Self::new(update_type, fields)
    }

    /// Payload sent when a switch control flips.
    pub fn toggle(table: &str, attribute: &str, name: &str, status: bool) -> Self {
        let mut fields = Map::new();
        fields.insert("attribute".into(), Value::from(attribute));
        fields.insert("name".into(), Value::from(name));
        fields.insert("status".into(), Value::Bool(status));
        Self::new(table, fields)
    }

    pub fn update_type(&self) -> &str {
        &self.update_type
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }

    pub fn into_value(self) -> Value {
        let mut outer = Map::new();
        outer.insert(self.update_type, Value::Object(self.fields));
        Value::Object(outer)
    }
}

impl Serialize for UpdateEnvelope {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeMap;
        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry(&self.update_type, &self.fields)?;
        map.end()
    }
}

/// How `/api/update` answered: `{"success": msg}` or `{"error": msg}`.
#[derive(Debug, Clone, PartialEq)]
pub enum UpdateOutcome {
    Success(String),
    Failure(String),
    Unrecognized(Value),
}

impl UpdateOutcome {
    pub fn from_response(value: Value) -> Self {
        let Value::Object(map) = &value else {
            return Self::Unrecognized(value);
        };

        if map.keys().next().map(String::as_str) == Some("success") {
            return Self::Success(message_text(&map["success"]));
        }
        match map.get("error") {
            Some(message) => Self::Failure(message_text(message)),
            None => Self::Unrecognized(value),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    pub fn message(&self) -> Option<&str> {
        match self {
            Self::Success(message) | Self::Failure(message) => Some(message),
            Self::Unrecognized(_) => None,
        }
    }
}

fn message_text(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}
