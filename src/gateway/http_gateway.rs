use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Response};
use url::Url;

use crate::domain::SalesItem;
use crate::gateway::{GatewayError, GatewayResult, ItemsGateway};

const ITEMS_ROUTE: &str = "SalesItems";

/// reqwest-based gateway to the SalesItems REST backend.
pub struct HttpGateway {
    client: Client,
    base_url: Url,
}

impl HttpGateway {
    pub fn new(base_url: Url, timeout: Duration) -> GatewayResult<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .gzip(true)
            .brotli(true)
            .user_agent(concat!("resale/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| GatewayError::transport(&e))?;

        Ok(Self { client, base_url })
    }

    fn items_url(&self) -> GatewayResult<Url> {
        self.base_url
            .join(ITEMS_ROUTE)
            .map_err(|e| GatewayError::Transport(e.to_string()))
    }

    fn item_url(&self, id: i64) -> GatewayResult<Url> {
        self.base_url
            .join(&format!("{ITEMS_ROUTE}/{id}"))
            .map_err(|e| GatewayError::Transport(e.to_string()))
    }
}

/// Map a non-2xx response to the `HTTP {code} {text}` failure.
fn check_status(response: Response) -> GatewayResult<Response> {
    let status = response.status();
    if status.is_success() {
        Ok(response)
    } else {
        Err(GatewayError::Http {
            status: status.as_u16(),
            text: status.canonical_reason().unwrap_or_default().to_string(),
        })
    }
}

#[async_trait]
impl ItemsGateway for HttpGateway {
    async fn list_all(&self) -> GatewayResult<Vec<SalesItem>> {
        let response = self
            .client
            .get(self.items_url()?)
            .send()
            .await
            .map_err(|e| GatewayError::transport(&e))?;

        let items = check_status(response)?
            .json::<Vec<SalesItem>>()
            .await
            .map_err(|e| GatewayError::transport(&e))?;

        Ok(items)
    }

    async fn create(&self, item: &SalesItem) -> GatewayResult<SalesItem> {
        let response = self
            .client
            .post(self.items_url()?)
            .json(item)
            .send()
            .await
            .map_err(|e| GatewayError::transport(&e))?;

        let created = check_status(response)?
            .json::<SalesItem>()
            .await
            .map_err(|e| GatewayError::transport(&e))?;

        Ok(created)
    }

    async fn delete_by_id(&self, id: i64) -> GatewayResult<()> {
        let response = self
            .client
            .delete(self.item_url(id)?)
            .send()
            .await
            .map_err(|e| GatewayError::transport(&e))?;

        // Some backends echo the deleted item, others send an empty body.
        check_status(response)?;
        Ok(())
    }
}
