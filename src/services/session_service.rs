use std::collections::HashMap;
use std::sync::Arc;

use secrecy::SecretString;
use tokio::sync::{Mutex, RwLock};
use uuid::Uuid;

use crate::errors::{AppError, AppResult};
use crate::models::domain::SessionState;
use crate::models::dto::{CreateSessionRequest, SessionCreatedResponse};
use crate::services::model_service::{CompletionClient, CompletionClientFactory};

/// One live tutoring session. The state mutex is held for the whole of an
/// action, including the model call, so a session runs one action at a time;
/// later requests wait their turn.
pub struct SessionHandle {
    pub id: Uuid,
    pub model: String,
    pub client: Arc<dyn CompletionClient>,
    pub state: Mutex<SessionState>,
}

/// In-memory registry of live sessions. Nothing here survives a restart.
pub struct SessionManager {
    client_factory: Arc<dyn CompletionClientFactory>,
    default_model: String,
    sessions: RwLock<HashMap<Uuid, Arc<SessionHandle>>>,
}

impl SessionManager {
    pub fn new(
        client_factory: Arc<dyn CompletionClientFactory>,
        default_model: impl Into<String>,
    ) -> Self {
        Self {
            client_factory,
            default_model: default_model.into(),
            sessions: RwLock::new(HashMap::new()),
        }
    }

    /// Register a session around the submitted credential. The key is wrapped
    /// in a [`SecretString`] immediately and never logged.
    pub async fn create_session(&self, request: CreateSessionRequest) -> SessionCreatedResponse {
        let api_key = SecretString::from(request.api_key);
        let model = request.model.unwrap_or_else(|| self.default_model.clone());
        let client = self.client_factory.build(&api_key, &model);

        let state = SessionState::new();
        let created_at = state.created_at;
        let handle = Arc::new(SessionHandle {
            id: Uuid::new_v4(),
            model: model.clone(),
            client,
            state: Mutex::new(state),
        });

        let mut sessions = self.sessions.write().await;
        sessions.insert(handle.id, handle.clone());
        log::info!("Created session {} with model {}", handle.id, handle.model);

        SessionCreatedResponse {
            session_id: handle.id,
            model,
            created_at,
        }
    }

    pub async fn get(&self, id: &Uuid) -> AppResult<Arc<SessionHandle>> {
        let sessions = self.sessions.read().await;
        sessions
            .get(id)
            .cloned()
            .ok_or_else(|| AppError::NotFound(format!("Session with id '{}' not found", id)))
    }

    /// "Start Over": wipe the session back to its initial empty state while
    /// keeping the session id and client.
    pub async fn reset(&self, id: &Uuid) -> AppResult<()> {
        let handle = self.get(id).await?;
        let mut state = handle.state.lock().await;
        state.reset();
        log::info!("Reset session {}", id);
        Ok(())
    }

    pub async fn remove(&self, id: &Uuid) -> AppResult<()> {
        let mut sessions = self.sessions.write().await;
        if sessions.remove(id).is_none() {
            return Err(AppError::NotFound(format!(
                "Session with id '{}' not found",
                id
            )));
        }
        log::info!("Removed session {}", id);
        Ok(())
    }
}
