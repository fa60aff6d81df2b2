use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;
use uuid::Uuid;

use crate::assistant::Conversation;
use crate::config::Config;
use crate::library::Library;
use crate::llm_client::TextGenerator;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub library: Arc<RwLock<Library>>,
    pub conversations: Arc<RwLock<HashMap<Uuid, Conversation>>>,
    /// Generative-text service. Default: `LlmClient`; tests swap in a stub.
    pub generator: Arc<dyn TextGenerator>,
    pub config: Config,
}

impl AppState {
    pub fn new(library: Library, generator: Arc<dyn TextGenerator>, config: Config) -> Self {
        Self {
            library: Arc::new(RwLock::new(library)),
            conversations: Arc::new(RwLock::new(HashMap::new())),
            generator,
            config,
        }
    }
}
