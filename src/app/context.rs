use std::sync::Arc;

use crate::api::http::HttpApiClient;
use crate::api::ApiClient;
use crate::app::error::Result;
use crate::config::Config;

pub struct AppContext {
    pub api: Arc<dyn ApiClient + Send + Sync>,
    pub config: Arc<Config>,
}

impl AppContext {
    pub fn new(config: Config) -> Result<Self> {
        let api: Arc<dyn ApiClient + Send + Sync> = Arc::new(HttpApiClient::new(
            &config.api.base_url,
            config.api.timeout_secs,
        )?);

        Ok(Self {
            api,
            config: Arc::new(config),
        })
    }

    pub fn with_client(config: Config, api: Arc<dyn ApiClient + Send + Sync>) -> Self {
        Self {
            api,
            config: Arc::new(config),
        }
    }
}
