use sea_orm::DatabaseConnection;
use std::sync::Arc;

use super::config::Config;

/// Состояние приложения, передаётся в обработчики через `State`
#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(db: DatabaseConnection, config: Arc<Config>) -> Self {
        Self { db, config }
    }
}
