use serde_json::{Map, Value};

use crate::item::{ItemPatch, ValidationError};
use crate::protocol::{count_from_number, decode_json};
use crate::protocol::reply::Reply;
use crate::store::{Error, ItemStore};

/// UPDATE command: PUT /shoppingListItem/{id} {name?, count?}
#[derive(Debug, Clone, PartialEq)]
pub struct UpdateCmd {
    pub id: String,
    pub patch: ItemPatch,
}

impl UpdateCmd {
    /// Create a new UPDATE command
    pub fn new(id: impl Into<String>, patch: ItemPatch) -> Self {
        Self {
            id: id.into(),
            patch,
        }
    }

    /// Decode a raw request body into an UPDATE command for `id`
    pub fn decode(id: impl Into<String>, body: &[u8]) -> Result<Self, ValidationError> {
        Self::parse(id, &decode_json(body, ValidationError::NotAPartialItem)?)
    }

    /// Parse an UPDATE command from a JSON body.
    ///
    /// Each field is either absent or of the right type. An explicit `null`
    /// counts as the wrong type, not as absent. A numeric count that is not
    /// a whole number is out of range.
    pub fn parse(id: impl Into<String>, body: &Value) -> Result<Self, ValidationError> {
        let fields = body.as_object().ok_or(ValidationError::NotAPartialItem)?;

        let name = optional(fields, "name", |v| v.as_str().map(str::to_string))?;
        let count = match fields.get("count") {
            None => None,
            Some(Value::Number(number)) => Some(count_from_number(number)?),
            Some(_) => return Err(ValidationError::NotAPartialItem),
        };

        Ok(Self::new(id, ItemPatch { name, count }))
    }

    /// Execute the UPDATE command
    pub fn execute(&self, store: &ItemStore) -> Result<Reply, Error> {
        let id = store.update(&self.id, &self.patch)?;
        Ok(Reply::Id(id))
    }
}

fn optional<T>(
    fields: &Map<String, Value>,
    key: &str,
    extract: impl Fn(&Value) -> Option<T>,
) -> Result<Option<T>, ValidationError> {
    match fields.get(key) {
        None => Ok(None),
        Some(value) => extract(value)
            .map(Some)
            .ok_or(ValidationError::NotAPartialItem),
    }
}
