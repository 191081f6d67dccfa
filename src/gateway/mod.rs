pub mod http_gateway;

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::SalesItem;

pub use http_gateway::HttpGateway;

/// Failure taxonomy for backend calls.
///
/// HTTP failures (backend reachable, non-2xx status) and transport
/// failures (no connection, timeout) render differently; the store
/// surfaces the rendered form as its `error_message`.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum GatewayError {
    #[error("HTTP {status} {text}")]
    Http { status: u16, text: String },

    #[error("{0}")]
    Transport(String),
}

impl GatewayError {
    pub const NO_CONNECTION: &'static str = "No connection to backend";

    pub fn transport(e: &reqwest::Error) -> Self {
        let description = e.to_string();
        if description.is_empty() {
            GatewayError::Transport(Self::NO_CONNECTION.to_string())
        } else {
            GatewayError::Transport(description)
        }
    }
}

pub type GatewayResult<T> = std::result::Result<T, GatewayError>;

/// Async seam to the SalesItems backend. The store depends on this
/// trait only; the reqwest implementation lives in [`http_gateway`].
#[async_trait]
pub trait ItemsGateway {
    /// Fetch all items in server order.
    async fn list_all(&self) -> GatewayResult<Vec<SalesItem>>;

    /// Submit a new item (`id == -1`); returns the server-assigned record.
    async fn create(&self, item: &SalesItem) -> GatewayResult<SalesItem>;

    /// Delete an item by id. Any 2xx response counts as confirmation.
    async fn delete_by_id(&self, id: i64) -> GatewayResult<()>;
}
