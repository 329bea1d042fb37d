use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use crate::item::ShoppingListItem;

/// An item as returned to clients
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ItemView {
    pub id: String,
    pub name: String,
    pub count: i64,
}

impl ItemView {
    pub fn new(id: impl Into<String>, item: ShoppingListItem) -> Self {
        Self {
            id: id.into(),
            name: item.name,
            count: item.count,
        }
    }
}

#[derive(Debug, Serialize)]
struct IdView<'a> {
    id: &'a str,
}

/// Successful command results
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    /// Every stored item
    Items(Vec<ItemView>),
    /// A single item
    Item(ItemView),
    /// Id of the item that was created or updated
    Id(String),
    /// Success with no body
    Empty,
}

impl IntoResponse for Reply {
    fn into_response(self) -> Response {
        match self {
            Reply::Items(items) => (StatusCode::OK, Json(items)).into_response(),
            Reply::Item(item) => (StatusCode::OK, Json(item)).into_response(),
            Reply::Id(id) => (StatusCode::OK, Json(IdView { id: &id })).into_response(),
            Reply::Empty => StatusCode::OK.into_response(),
        }
    }
}
