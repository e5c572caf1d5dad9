use crate::api_client::ApiClient;
use std::sync::Arc;

/// Shared handler state. The provider client is the only thing handlers
/// share; every request fetches and computes on its own data.
#[derive(Clone)]
pub struct AppState {
    pub api: Arc<ApiClient>,
}

impl AppState {
    pub fn new() -> Self {
        Self {
            api: Arc::new(ApiClient::new()),
        }
    }
}
