use std::sync::Arc;

use crate::config::Config;
use crate::database::Store;
use crate::services::token_service::TokenService;

/// Shared by every worker through `web::Data<AppState>`.
pub struct AppState {
    pub store: Arc<dyn Store>,
    pub tokens: TokenService,
    pub bcrypt_cost: u32,
}

impl AppState {
    pub fn new(store: Arc<dyn Store>, config: &Config) -> Self {
        Self {
            store,
            tokens: TokenService::new(&config.secret_key, config.token_ttl_secs),
            bcrypt_cost: config.bcrypt_cost,
        }
    }
}
