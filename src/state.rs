use std::sync::Arc;

use crate::db::Db;

#[derive(Clone)]
pub struct AppState {
    pub db: Db,
    pub jwt_secret: Arc<str>,
}

impl AppState {
    pub fn new(db: Db, jwt_secret: impl Into<Arc<str>>) -> Self {
        Self {
            db,
            jwt_secret: jwt_secret.into(),
        }
    }
}
