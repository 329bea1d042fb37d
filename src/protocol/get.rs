use crate::protocol::reply::{ItemView, Reply};
use crate::store::{Error, ItemStore};

/// GET command: GET /shoppingListItem/{id}
#[derive(Debug, Clone, PartialEq)]
pub struct GetCmd {
    pub id: String,
}

impl GetCmd {
    /// Create a new GET command
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }

    /// Execute the GET command
    pub fn execute(&self, store: &ItemStore) -> Result<Reply, Error> {
        let item = store.get(&self.id)?;
        Ok(Reply::Item(ItemView::new(self.id.clone(), item)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::ShoppingListItem;

    #[test]
    fn test_get_cmd_execute() {
        let store = ItemStore::new();
        store.seed("A", ShoppingListItem::new("Bread", 2)).unwrap();

        let result = GetCmd::new("A").execute(&store).unwrap();

        assert_eq!(
            result,
            Reply::Item(ItemView {
                id: "A".to_string(),
                name: "Bread".to_string(),
                count: 2,
            })
        );
    }

    #[test]
    fn test_get_cmd_execute_not_found() {
        let store = ItemStore::new();
        let err = GetCmd::new("nonexistent").execute(&store).unwrap_err();

        assert!(matches!(err, Error::NotFound { .. }));
    }
}
