use std::sync::Arc;
use std::time::Duration;

use url::Url;

use crate::app::error::Result;
use crate::config::Config;
use crate::gateway::{HttpGateway, ItemsGateway};
use crate::store::ItemStore;

/// Wires configuration, gateway, and store together for the CLI and TUI.
pub struct AppContext {
    pub config: Config,
    pub gateway: Arc<dyn ItemsGateway + Send + Sync>,
    pub store: ItemStore,
}

impl AppContext {
    /// Build the context from a loaded configuration.
    ///
    /// Constructing the store triggers the initial fetch, so this must
    /// run inside the tokio runtime.
    pub fn new(config: Config) -> Result<Self> {
        let base_url = Url::parse(&config.backend.base_url)?;
        let timeout = Duration::from_secs(config.backend.timeout_secs);
        let gateway: Arc<dyn ItemsGateway + Send + Sync> =
            Arc::new(HttpGateway::new(base_url, timeout)?);
        let store = ItemStore::new(gateway.clone());

        Ok(Self {
            config,
            gateway,
            store,
        })
    }
}
