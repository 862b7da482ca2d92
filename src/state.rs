use std::sync::Arc;

use sea_orm::DatabaseConnection;

use crate::sync::ProductSync;

#[derive(Clone)]
pub struct AppState {
    pub orm: DatabaseConnection,
    pub sync: Arc<dyn ProductSync>,
    pub jwt_secret: Arc<str>,
}
