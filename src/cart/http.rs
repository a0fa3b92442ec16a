//! reqwest implementation of [`CartApi`] against the shopping-cart endpoints.

use std::{sync::Arc, time::Duration};

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use super::{
    api::{AddToCart, CartApi},
    error::CartError,
    token::TokenStore,
};
use crate::{
    dto::cart::QuantityRequest,
    models::CartLineItem,
    response::ErrorBody,
};

/// Cart API client authenticated with the bearer token from a [`TokenStore`].
#[derive(Clone)]
pub struct HttpCartApi {
    client: Client,
    base_url: String,
    tokens: Arc<dyn TokenStore>,
}

impl HttpCartApi {
    pub fn new(
        base_url: impl Into<String>,
        tokens: Arc<dyn TokenStore>,
        timeout: Option<Duration>,
    ) -> Result<Self, CartError> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build()?;
        Ok(Self::with_client(client, base_url, tokens))
    }

    pub fn with_client(
        client: Client,
        base_url: impl Into<String>,
        tokens: Arc<dyn TokenStore>,
    ) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            client,
            base_url,
            tokens,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/shopping-cart-items{}", self.base_url, path)
    }

    fn authorize(&self, request: RequestBuilder) -> Result<RequestBuilder, CartError> {
        let token = self
            .tokens
            .access_token()
            .ok_or(CartError::Unauthenticated)?;
        Ok(request.bearer_auth(token))
    }

    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, CartError> {
        let response = self.authorize(request)?.send().await?;
        decode(response).await
    }
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, CartError> {
    let status = response.status();
    let body = response.bytes().await?;

    if status.is_success() {
        return Ok(serde_json::from_slice(&body)?);
    }

    let message = match serde_json::from_slice::<ErrorBody>(&body) {
        Ok(error) => error.message,
        Err(_) => String::from_utf8_lossy(&body).chars().take(200).collect(),
    };
    let message = if message.trim().is_empty() {
        status.canonical_reason().unwrap_or("request failed").to_string()
    } else {
        message
    };
    warn!(status = %status, message = %message, "cart API returned an error");
    Err(CartError::Api { status, message })
}

#[async_trait]
impl CartApi for HttpCartApi {
    async fn list_items(&self) -> Result<Vec<CartLineItem>, CartError> {
        let items: Vec<CartLineItem> = self.send(self.client.get(self.url("/my-items"))).await?;
        debug!(count = items.len(), "fetched cart items");
        Ok(items)
    }

    async fn add_item(&self, request: &AddToCart) -> Result<CartLineItem, CartError> {
        let mut query = vec![("productId", request.product_id.to_string())];
        if let Some(properties) = &request.variant_properties {
            query.push(("variantProperties", serde_json::to_string(properties)?));
        }

        let builder = self
            .client
            .post(self.url("/add-to-cart"))
            .query(&query)
            .json(&QuantityRequest {
                quantity: request.quantity,
            });
        let item: CartLineItem = self.send(builder).await?;
        debug!(
            product_id = request.product_id,
            item_id = item.id,
            quantity = item.quantity,
            "added to cart"
        );
        Ok(item)
    }

    async fn update_item(&self, item_id: i64, quantity: u32) -> Result<CartLineItem, CartError> {
        let builder = self
            .client
            .put(self.url(&format!("/{item_id}")))
            .json(&QuantityRequest { quantity });
        let item: CartLineItem = self.send(builder).await?;
        debug!(item_id, quantity, "updated cart item");
        Ok(item)
    }
}
