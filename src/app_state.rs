use std::sync::Arc;

use crate::{
    config::Config,
    services::model_service::{CompletionClientFactory, OpenAiClientFactory},
    services::session_service::SessionManager,
};

#[derive(Clone)]
pub struct AppState {
    pub sessions: Arc<SessionManager>,
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let factory = Arc::new(OpenAiClientFactory::new(&config));
        Self::with_client_factory(config, factory)
    }

    /// Build the state around a caller-supplied client factory. Tests use
    /// this to swap the OpenAI-backed client for a scripted one.
    pub fn with_client_factory(
        config: Config,
        client_factory: Arc<dyn CompletionClientFactory>,
    ) -> Self {
        let sessions = Arc::new(SessionManager::new(
            client_factory,
            config.default_model.clone(),
        ));
        Self {
            sessions,
            config: Arc::new(config),
        }
    }
}
