use crate::errors::ClientError;
use serde::de::{self, DeserializeOwned, Deserializer, Unexpected};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Method {
    #[default]
    Get,
    Post,
}

impl Method {
    pub fn as_str(self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<Method> for reqwest::Method {
    fn from(method: Method) -> Self {
        match method {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
        }
    }
}

/// One request to the dashboard backend.
///
/// The payload is only sent when the method is not GET and the payload is
/// not JSON `null`; see [`RequestDescriptor::body`].
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RequestDescriptor {
    pub target: String,
    pub method: Method,
    pub payload: Option<Value>,
}

impl RequestDescriptor {
    pub fn get(target: impl Into<String>) -> Self {
        Self {
            target: target.into(),
            method: Method::Get,
            payload: None,
        }
    }

    pub fn post(target: impl Into<String>, payload: Value) -> Self {
        Self {
            target: target.into(),
            method: Method::Post,
            payload: Some(payload),
        }
    }

    pub fn post_json<T: Serialize + ?Sized>(
        target: impl Into<String>,
        payload: &T,
    ) -> Result<Self, ClientError> {
        let payload = serde_json::to_value(payload).map_err(ClientError::Encode)?;
        Ok(Self::post(target, payload))
    }

    pub fn with_payload(mut self, payload: Value) -> Self {
        self.payload = Some(payload);
        self
    }

    pub fn body(&self) -> Option<&Value> {
        if self.method == Method::Get {
            return None;
        }
        self.payload.as_ref().filter(|payload| !payload.is_null())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommandRow {
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
}

/// Editable fields of one command. Commands saved through the update form
/// carry `cost` as a string and may have `null` text fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommandFields {
    pub name: String,
    #[serde(default, deserialize_with = "text_or_null")]
    pub category: String,
    #[serde(default, deserialize_with = "integer_or_numeric_text")]
    pub cost: i64,
    #[serde(default, deserialize_with = "text_or_null")]
    pub description: String,
}

/// Decodes one record, refusing anything but a JSON object. Derived struct
/// visitors would otherwise accept arrays positionally.
pub fn decode_record<T: DeserializeOwned>(value: Value) -> Result<T, ClientError> {
    if !value.is_object() {
        return Err(ClientError::Decode(not_an_object(&value)));
    }
    serde_json::from_value(value).map_err(ClientError::Decode)
}

/// Decodes an array of records, each of which must be a JSON object.
pub fn decode_records<T: DeserializeOwned>(value: Value) -> Result<Vec<T>, ClientError> {
    let Value::Array(items) = value else {
        return Err(ClientError::Decode(de::Error::invalid_type(
            unexpected(&value),
            &"an array of objects",
        )));
    };
    items.into_iter().map(decode_record).collect()
}

fn not_an_object(value: &Value) -> serde_json::Error {
    de::Error::invalid_type(unexpected(value), &"a JSON object")
}

fn unexpected(value: &Value) -> Unexpected<'_> {
    match value {
        Value::Null => Unexpected::Unit,
        Value::Bool(flag) => Unexpected::Bool(*flag),
        Value::Number(_) => Unexpected::Other("number"),
        Value::String(text) => Unexpected::Str(text),
        Value::Array(_) => Unexpected::Seq,
        Value::Object(_) => Unexpected::Map,
    }
}

fn text_or_null<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

fn integer_or_numeric_text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i64, D::Error> {
    match Value::deserialize(deserializer)? {
        Value::Null => Ok(0),
        Value::Number(number) => number
            .as_i64()
            .ok_or_else(|| de::Error::custom(format!("expected an integer, got {number}"))),
        Value::String(text) if text.trim().is_empty() => Ok(0),
        Value::String(text) => text
            .trim()
            .parse()
            .map_err(|_| de::Error::invalid_value(Unexpected::Str(&text), &"an integer")),
        other => Err(de::Error::invalid_type(unexpected(&other), &"an integer")),
    }
}
