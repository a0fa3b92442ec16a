//! Mints a development access token and stores it where the cart client
//! looks for it.
//!
//! Usage: `issue_token [user-uuid]` (a random user id when omitted).

use anyhow::Context;
use chrono::Duration;
use storefront_cart::{
    cart::FileTokenStore,
    config::{AppConfig, ClientConfig},
    services::auth_service::issue_token,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use uuid::Uuid;

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let server = AppConfig::from_env()?;
    let client = ClientConfig::from_env()?;

    let user_id = match std::env::args().nth(1) {
        Some(raw) => Uuid::parse_str(&raw).with_context(|| format!("invalid user id: {raw}"))?,
        None => Uuid::new_v4(),
    };

    let token = issue_token(&server.jwt_secret, user_id, "user", Duration::hours(24))
        .map_err(|e| anyhow::anyhow!(e.to_string()))?;

    let store = FileTokenStore::new(&client.token_path);
    store.save_access_token(&token)?;

    tracing::info!(
        %user_id,
        path = %store.path().display(),
        "access token stored"
    );
    println!("{token}");
    Ok(())
}
