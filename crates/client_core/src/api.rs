//! REST surface of the storefront backend.

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use shared::{
    domain::{OrderId, ProductId},
    error::ServerErrorBody,
    protocol::{Cart, Order, QuantityUpdate},
};
use tracing::debug;
use url::Url;

use crate::{auth::AuthHeaderProvider, error::StoreError};

#[async_trait]
pub trait StoreApi: Send + Sync {
    async fn fetch_cart(&self) -> Result<Cart, StoreError>;
    /// Server increments the quantity by one, creating the line at 1.
    async fn add_product(&self, product_id: ProductId) -> Result<Cart, StoreError>;
    async fn update_quantity(
        &self,
        product_id: ProductId,
        quantity: u32,
    ) -> Result<Cart, StoreError>;
    /// Answers 204; there is no body to read.
    async fn clear_cart(&self) -> Result<(), StoreError>;
    /// Creates an order from the current cart and empties it server-side.
    async fn place_order(&self) -> Result<(), StoreError>;
    async fn list_orders(&self) -> Result<Vec<Order>, StoreError>;
    async fn fetch_order(&self, order_id: OrderId) -> Result<Order, StoreError>;
}

pub struct StorefrontClient {
    http: Client,
    base_url: String,
    auth: Arc<dyn AuthHeaderProvider>,
}

impl StorefrontClient {
    pub fn new(base_url: &str, auth: Arc<dyn AuthHeaderProvider>) -> Result<Self, StoreError> {
        Self::with_http_client(Client::new(), base_url, auth)
    }

    pub fn with_http_client(
        http: Client,
        base_url: &str,
        auth: Arc<dyn AuthHeaderProvider>,
    ) -> Result<Self, StoreError> {
        let base_url = base_url.trim().trim_end_matches('/');
        Url::parse(base_url)?;
        Ok(Self {
            http,
            base_url: base_url.to_string(),
            auth,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn request(&self, method: Method, path: &str) -> Result<RequestBuilder, StoreError> {
        let url = Url::parse(&format!("{}{path}", self.base_url))?;
        debug!(method = %method, %url, "storefront request");
        Ok(self.http.request(method, url).headers(self.auth.headers()))
    }

    async fn send(&self, request: RequestBuilder) -> Result<Response, StoreError> {
        let response = request.send().await?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let detail = ServerErrorBody::parse(&body)
            .and_then(|parsed| parsed.detail().map(str::to_string));
        Err(StoreError::Status {
            status: status.as_u16(),
            detail,
        })
    }

    async fn send_json<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, StoreError> {
        let body = self.send(request).await?.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }
}

#[async_trait]
impl StoreApi for StorefrontClient {
    async fn fetch_cart(&self) -> Result<Cart, StoreError> {
        self.send_json(self.request(Method::GET, "/cart")?).await
    }

    async fn add_product(&self, product_id: ProductId) -> Result<Cart, StoreError> {
        let path = format!("/cart/products/{product_id}");
        self.send_json(self.request(Method::POST, &path)?).await
    }

    async fn update_quantity(
        &self,
        product_id: ProductId,
        quantity: u32,
    ) -> Result<Cart, StoreError> {
        let path = format!("/cart/products/{product_id}");
        let request = self
            .request(Method::PUT, &path)?
            .json(&QuantityUpdate { quantity });
        self.send_json(request).await
    }

    async fn clear_cart(&self) -> Result<(), StoreError> {
        self.send(self.request(Method::DELETE, "/cart")?).await?;
        Ok(())
    }

    async fn place_order(&self) -> Result<(), StoreError> {
        self.send(self.request(Method::POST, "/orders")?).await?;
        Ok(())
    }

    async fn list_orders(&self) -> Result<Vec<Order>, StoreError> {
        let orders: Option<Vec<Order>> = self.send_json(self.request(Method::GET, "/orders")?).await?;
        Ok(orders.unwrap_or_default())
    }

    async fn fetch_order(&self, order_id: OrderId) -> Result<Order, StoreError> {
        let path = format!("/orders/{order_id}");
        self.send_json(self.request(Method::GET, &path)?).await
    }
}

#[cfg(test)]
#[path = "tests/api_tests.rs"]
mod tests;
