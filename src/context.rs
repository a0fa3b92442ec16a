use std::sync::Arc;

use crate::{
    cart::{CartError, CartStore, FileTokenStore, HttpCartApi},
    config::ClientConfig,
};

/// Application-wide services, built once at start and handed to every view
/// that needs them.
#[derive(Clone)]
pub struct StorefrontContext {
    tokens: Arc<FileTokenStore>,
    cart: Arc<CartStore>,
}

impl StorefrontContext {
    /// Wires the token file, HTTP client and cart store, then runs the
    /// initial cart fetch when a token is present.
    pub async fn bootstrap(config: &ClientConfig) -> Result<Self, CartError> {
        let tokens = Arc::new(FileTokenStore::new(&config.token_path));
        let api = HttpCartApi::new(
            config.api_base_url.clone(),
            tokens.clone(),
            config.request_timeout,
        )?;
        let cart = CartStore::with_policy(Arc::new(api), tokens.clone(), config.sync_policy);
        let context = Self {
            tokens,
            cart: Arc::new(cart),
        };
        context.cart.initialize().await;
        tracing::info!(
            api = %config.api_base_url,
            policy = %context.cart.policy(),
            items = context.cart.total_items(),
            "storefront context ready"
        );
        Ok(context)
    }

    pub fn cart(&self) -> &Arc<CartStore> {
        &self.cart
    }

    pub fn tokens(&self) -> &FileTokenStore {
        &self.tokens
    }

    /// Persists the token and loads the now-visible cart. Whatever the
    /// previous session held is dropped first, even if the fetch fails.
    pub async fn sign_in(&self, access_token: &str) -> Result<(), CartError> {
        self.tokens.save_access_token(access_token)?;
        self.cart.reset();
        self.cart.initialize().await;
        Ok(())
    }

    pub fn sign_out(&self) -> Result<(), CartError> {
        self.tokens.clear()?;
        self.cart.reset();
        Ok(())
    }
}
