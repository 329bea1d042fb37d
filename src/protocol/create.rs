use serde_json::Value;

use crate::item::{ShoppingListItem, ValidationError};
use crate::protocol::{count_from_number, decode_json};
use crate::protocol::reply::Reply;
use crate::store::{Error, ItemStore};

/// CREATE command: POST /shoppingListItem {name, count}
#[derive(Debug, Clone, PartialEq)]
pub struct CreateCmd {
    pub name: String,
    pub count: i64,
}

impl CreateCmd {
    /// Create a new CREATE command
    pub fn new(name: impl Into<String>, count: i64) -> Self {
        Self {
            name: name.into(),
            count,
        }
    }

    /// Decode a raw request body into a CREATE command
    pub fn decode(body: &[u8]) -> Result<Self, ValidationError> {
        Self::parse(&decode_json(body, ValidationError::NotAnItem)?)
    }

    /// Parse a CREATE command from a JSON body.
    ///
    /// `name` must be a string and `count` a number; other fields are
    /// ignored. A count that is not a whole number fits no item and is
    /// rejected as out of range.
    pub fn parse(body: &Value) -> Result<Self, ValidationError> {
        let fields = body.as_object().ok_or(ValidationError::NotAnItem)?;

        let name = fields
            .get("name")
            .and_then(Value::as_str)
            .ok_or(ValidationError::NotAnItem)?;
        let count = match fields.get("count") {
            Some(Value::Number(number)) => count_from_number(number)?,
            _ => return Err(ValidationError::NotAnItem),
        };

        Ok(Self::new(name, count))
    }

    /// Execute the CREATE command
    pub fn execute(&self, store: &ItemStore) -> Result<Reply, Error> {
        let id = store.create(ShoppingListItem::new(self.name.clone(), self.count))?;
        Ok(Reply::Id(id))
    }
}
