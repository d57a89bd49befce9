use serde::de::{Error as _, Unexpected};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// A single collection record, keyed by field name in the order the server sent them
pub type Item = Map<String, Value>;

/// Envelope returned by `GET /items/{collection}`
///
/// `data` is kept undecoded so that only the first element is ever checked.
/// A missing `data` stays `None`; an explicit `null` is `Some(Value::Null)`.
/// Directus also sends `meta` when it is requested; anything besides `data`
/// is ignored here.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ItemsResponse {
    #[serde(
        default,
        deserialize_with = "deserialize_present",
        skip_serializing_if = "Option::is_none"
    )]
    pub data: Option<Value>,
}

fn deserialize_present<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

fn unexpected(value: &Value) -> Unexpected<'_> {
    match value {
        Value::Null => Unexpected::Unit,
        Value::Bool(b) => Unexpected::Bool(*b),
        Value::Number(_) => Unexpected::Other("number"),
        Value::String(s) => Unexpected::Str(s),
        Value::Array(_) => Unexpected::Seq,
        Value::Object(_) => Unexpected::Map,
    }
}

impl ItemsResponse {
    /// True when `data` is missing or an empty array
    pub fn is_empty(&self) -> bool {
        match &self.data {
            None => true,
            Some(Value::Array(items)) => items.is_empty(),
            Some(_) => false,
        }
    }

    /// Number of elements in `data`, zero when it is missing or not an array
    pub fn len(&self) -> usize {
        self.data
            .as_ref()
            .and_then(Value::as_array)
            .map_or(0, Vec::len)
    }

    /// Decode the first element of `data` as an item
    ///
    /// Missing `data` or an empty array gives `Ok(None)`. A `data` that is not
    /// an array (including `null`) or a first element that is not an object
    /// is an error. Later elements are never looked at.
    pub fn into_first_item(self) -> Result<Option<Item>, serde_json::Error> {
        match self.data {
            None => Ok(None),
            Some(Value::Array(items)) => match items.into_iter().next() {
                None => Ok(None),
                Some(first) => serde_json::from_value::<Item>(first).map(Some),
            },
            Some(other) => Err(serde_json::Error::invalid_type(
                unexpected(&other),
                &"an array of items",
            )),
        }
    }
}
