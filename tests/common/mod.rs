use std::{net::SocketAddr, sync::Arc};

use chrono::Duration;
use storefront_cart::{
    cart::{CartStore, HttpCartApi, MemoryTokenStore, SyncPolicy},
    db::{Db, create_db, demo_catalog},
    routes::create_app,
    services::auth_service::issue_token,
    state::AppState,
};
use uuid::Uuid;

pub const SECRET: &str = "integration-secret";

pub struct Backend {
    pub base_url: String,
    pub db: Db,
}

/// Starts the reference backend on an ephemeral port.
pub async fn spawn_backend() -> Backend {
    let db = create_db(demo_catalog());
    let app = create_app(AppState::new(db.clone(), SECRET));

    let listener = tokio::net::TcpListener::bind(SocketAddr::from(([127, 0, 0, 1], 0)))
        .await
        .expect("bind ephemeral port");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("backend server");
    });

    Backend {
        base_url: format!("http://{addr}/api"),
        db,
    }
}

pub fn token_for(user_id: Uuid) -> String {
    issue_token(SECRET, user_id, "user", Duration::hours(1)).expect("issue token")
}

pub fn signed_in_store(backend: &Backend, policy: SyncPolicy) -> CartStore {
    let tokens = Arc::new(MemoryTokenStore::new(Some(token_for(Uuid::new_v4()))));
    let api = HttpCartApi::new(backend.base_url.clone(), tokens.clone(), None).expect("http client");
    CartStore::with_policy(Arc::new(api), tokens, policy)
}
