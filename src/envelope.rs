use serde::Deserialize;
use serde_json::{Map, Value};

use crate::error::UNKNOWN_ERROR;

pub const QUERY_RESPONSE_KEY: &str = "QueryResponse";
pub const FAULT_KEY: &str = "Fault";

/// Fault code the API uses when an update carries an out-of-date `SyncToken`.
pub const STALE_OBJECT_ERROR_CODE: &str = "5010";

const FIRST_ERROR_DETAIL: &str = "/Fault/Error/0/Detail";
const FIRST_ERROR_CODE: &str = "/Fault/Error/0/code";

/// Decoded JSON body of a response.
///
/// On success the entity sits under its type name (`{"Customer": {...}}`) or
/// query rows sit under `QueryResponse.<Type>`. On failure a `Fault` is present.
#[derive(Clone, Debug, PartialEq)]
pub struct ApiEnvelope(Value);

#[derive(Clone, Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "PascalCase")]
pub struct Fault {
    #[serde(default)]
    pub error: Vec<FaultError>,
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
}

#[derive(Clone, Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "PascalCase")]
pub struct FaultError {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub detail: Option<String>,
    #[serde(rename = "code", default)]
    pub code: Option<String>,
}

impl ApiEnvelope {
    pub fn new(value: Value) -> Self {
        ApiEnvelope(value)
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }

    pub fn into_value(self) -> Value {
        self.0
    }

    /// The object stored under `type_name`, if the body has that shape.
    pub fn entity(&self, type_name: &str) -> Option<&Map<String, Value>> {
        self.0.get(type_name)?.as_object()
    }

    pub fn into_entity(self, type_name: &str) -> Option<Map<String, Value>> {
        match self.0 {
            Value::Object(mut root) => match root.remove(type_name) {
                Some(Value::Object(entity)) => Some(entity),
                _ => None,
            },
            _ => None,
        }
    }

    /// Rows of a query result. An empty `QueryResponse` means no rows.
    pub fn query_rows(&self, type_name: &str) -> Option<&[Value]> {
        let response = self.0.get(QUERY_RESPONSE_KEY)?.as_object()?;
        match response.get(type_name) {
            Some(Value::Array(rows)) => Some(rows.as_slice()),
            Some(_) => None,
            None => Some(&[][..]),
        }
    }

    /// Typed view of the `Fault`. `None` unless every field has the
    /// documented type; [`fault_detail`](Self::fault_detail) and
    /// [`is_stale_object_fault`](Self::is_stale_object_fault) do not depend on it.
    pub fn fault(&self) -> Option<Fault> {
        serde_json::from_value(self.0.get(FAULT_KEY)?.clone()).ok()
    }

    /// `Fault.Error[0].Detail`, or [`UNKNOWN_ERROR`] when the body has
    /// another shape. Sibling fields are not inspected.
    pub fn fault_detail(&self) -> String {
        self.0
            .pointer(FIRST_ERROR_DETAIL)
            .and_then(Value::as_str)
            .unwrap_or(UNKNOWN_ERROR)
            .to_string()
    }

    /// The first error's `code` is 5010, sent either as a string or a number.
    pub fn is_stale_object_fault(&self) -> bool {
        match self.0.pointer(FIRST_ERROR_CODE) {
            Some(Value::String(code)) => code == STALE_OBJECT_ERROR_CODE,
            Some(Value::Number(code)) => code.to_string() == STALE_OBJECT_ERROR_CODE,
            _ => false,
        }
    }
}

impl From<Value> for ApiEnvelope {
    fn from(value: Value) -> Self {
        ApiEnvelope(value)
    }
}
