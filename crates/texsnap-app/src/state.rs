use std::sync::Arc;

use texsnap_config::Config;
use texsnap_core::Document;
use tokio::sync::RwLock;

pub struct AppState {
    pub config: Arc<RwLock<Config>>,
    /// Document recognized formulas are inserted into
    pub document: RwLock<Document>,
}

impl AppState {
    pub fn new(config: Config, document: Document) -> Self {
        Self {
            config: Arc::new(RwLock::new(config)),
            document: RwLock::new(document),
        }
    }
}
