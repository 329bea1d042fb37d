use tracing::debug;

use crate::protocol::reply::Reply;
use crate::store::{Error, ItemStore};

/// DELETE command: DELETE /shoppingListItem/{id}
#[derive(Debug, Clone, PartialEq)]
pub struct DeleteCmd {
    pub id: String,
}

impl DeleteCmd {
    /// Create a new DELETE command
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }

    /// Execute the DELETE command. A missing id still succeeds.
    pub fn execute(&self, store: &ItemStore) -> Result<Reply, Error> {
        if !store.delete(&self.id)? {
            debug!("Delete of unknown item {} ignored", self.id);
        }
        Ok(Reply::Empty)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::ShoppingListItem;

    #[test]
    fn test_delete_cmd_execute() {
        let store = ItemStore::new();
        store.seed("A", ShoppingListItem::new("Bread", 2)).unwrap();

        assert_eq!(DeleteCmd::new("A").execute(&store).unwrap(), Reply::Empty);
        assert!(store.get("A").is_err());
    }

    #[test]
    fn test_delete_cmd_execute_missing() {
        let store = ItemStore::new();
        assert_eq!(
            DeleteCmd::new("missing").execute(&store).unwrap(),
            Reply::Empty
        );
    }
}
