use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;

use axum::Json;
use axum::Router;
use axum::extract::{Path, State};
use axum::http::header::CONTENT_TYPE;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{Html, IntoResponse, Response};
use axum::routing::get;
use bytes::Bytes;
use serde_json::json;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::{debug, error, info, warn};

use crate::protocol::create::CreateCmd;
use crate::protocol::delete::DeleteCmd;
use crate::protocol::get::GetCmd;
use crate::protocol::update::UpdateCmd;
use crate::protocol::{Command, Reply, is_json_content_type};
use crate::store::{Error, ItemStore};

/// Landing page served at `/`
const INDEX_HTML: &str = include_str!("../static/index.html");

/// HTTP server
pub struct Server {
    listener: TcpListener,
    local_addr: SocketAddr,
    store: Arc<ItemStore>,
}

impl Server {
    /// Create and bind HTTP server to specified address
    pub async fn bind(addr: &str, store: Arc<ItemStore>) -> std::io::Result<Self> {
        let listener = TcpListener::bind(addr).await?;
        let local_addr = listener.local_addr()?;
        info!("HTTP server bound to {}", local_addr);

        Ok(Self {
            listener,
            local_addr,
            store,
        })
    }

    /// Get local listening address
    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    /// Build the router serving the shopping list API
    pub fn router(store: Arc<ItemStore>) -> Router {
        Router::new()
            .route("/", get(index))
            .route("/shoppingListItems", get(list_items).delete(clear_items))
            .route("/shoppingListItem", axum::routing::post(create_item))
            .route(
                "/shoppingListItem/{id}",
                get(get_item).put(update_item).delete(delete_item),
            )
            .layer(TraceLayer::new_for_http())
            .with_state(store)
    }

    /// Serve requests until Ctrl-C
    pub async fn run(self) -> std::io::Result<()> {
        self.run_until(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                error!("Failed to listen for shutdown signal: {}", e);
            }
            info!("Shutdown signal received");
        })
        .await
    }

    /// Serve requests until `shutdown` resolves
    pub async fn run_until<F>(self, shutdown: F) -> std::io::Result<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        info!("Server started, listening on {}", self.local_addr);

        let app = Self::router(self.store);
        axum::serve(self.listener, app)
            .with_graceful_shutdown(shutdown)
            .await?;

        info!("Server stopped");
        Ok(())
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        let message = match &self {
            Error::NotFound { id } => {
                warn!("Item {} not found", id);
                self.to_string()
            }
            _ if status.is_server_error() => {
                error!("Request failed: {}", self);
                "Internal server error".to_string()
            }
            _ => {
                warn!("Request rejected: {}", self);
                self.to_string()
            }
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}

/// The request body when it is declared as JSON; anything else reads as empty
fn json_body<'a>(headers: &HeaderMap, body: &'a Bytes) -> &'a [u8] {
    let content_type = headers
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok());
    if is_json_content_type(content_type) {
        &body[..]
    } else {
        debug!("Ignoring body with content type {:?}", content_type);
        &[]
    }
}

/// Execute a command against the shared store
fn dispatch(store: &ItemStore, cmd: Command) -> Result<Reply, Error> {
    debug!("Executing {} command: {:?}", cmd.name(), cmd);
    cmd.execute(store)
}

async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

async fn list_items(State(store): State<Arc<ItemStore>>) -> Result<Reply, Error> {
    dispatch(&store, Command::List)
}

async fn clear_items(State(store): State<Arc<ItemStore>>) -> Result<Reply, Error> {
    dispatch(&store, Command::Clear)
}

async fn create_item(
    State(store): State<Arc<ItemStore>>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Reply, Error> {
    let cmd = CreateCmd::decode(json_body(&headers, &body))?;
    dispatch(&store, Command::Create(cmd))
}

async fn get_item(
    State(store): State<Arc<ItemStore>>,
    Path(id): Path<String>,
) -> Result<Reply, Error> {
    dispatch(&store, Command::Get(GetCmd::new(id)))
}

async fn update_item(
    State(store): State<Arc<ItemStore>>,
    Path(id): Path<String>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Reply, Error> {
    let cmd = UpdateCmd::decode(id, json_body(&headers, &body))?;
    dispatch(&store, Command::Update(cmd))
}

async fn delete_item(
    State(store): State<Arc<ItemStore>>,
    Path(id): Path<String>,
) -> Result<Reply, Error> {
    dispatch(&store, Command::Delete(DeleteCmd::new(id)))
}
