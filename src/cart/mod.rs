//! Client-side cart synchronization.
//!
//! [`CartStore`] keeps a read-through snapshot of the signed-in user's cart.
//! Every mutation goes to the server through a [`CartApi`] and is reconciled
//! by refetching the whole cart; nothing is patched locally.

pub mod api;
pub mod error;
pub mod http;
pub mod store;
pub mod token;

pub use api::{AddToCart, CartApi};
pub use error::CartError;
pub use http::HttpCartApi;
pub use store::{CartState, CartStore, SyncPolicy};
pub use token::{FileTokenStore, MemoryTokenStore, TokenStore, ACCESS_TOKEN_KEY};
