use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use crate::app_state::AppState;
use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::services::model_service::{MockCompletionClient, MockCompletionClientFactory};

#[cfg(test)]
pub mod fixtures {
    use super::*;

    /// App state whose model clients replay `script` in submission order,
    /// shared across every session the state creates. Once the script runs
    /// dry each further call fails as an upstream error.
    pub fn scripted_app_state(script: Vec<AppResult<String>>) -> AppState {
        let script = Arc::new(Mutex::new(VecDeque::from(script)));

        let mut factory = MockCompletionClientFactory::new();
        factory.expect_build().returning(move |_, _| {
            let script = Arc::clone(&script);
            let mut client = MockCompletionClient::new();
            client.expect_complete().returning(move |_| {
                script
                    .lock()
                    .expect("completion script lock should not be poisoned")
                    .pop_front()
                    .unwrap_or_else(|| Err(AppError::Upstream("script exhausted".to_string())))
            });
            Arc::new(client)
        });

        AppState::with_client_factory(Config::test_config(), Arc::new(factory))
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::*;
    use crate::models::dto::CreateSessionRequest;

    #[tokio::test]
    async fn scripted_clients_replay_in_order() {
        let state = scripted_app_state(vec![
            Ok("first".to_string()),
            Ok("second".to_string()),
        ]);

        let created = state
            .sessions
            .create_session(CreateSessionRequest {
                api_key: "sk-test".to_string(),
                model: None,
            })
            .await;
        let handle = state
            .sessions
            .get(&created.session_id)
            .await
            .expect("created session should be retrievable");

        let first = handle
            .client
            .complete("a")
            .await
            .expect("first scripted call should succeed");
        assert_eq!(first, "first");

        let second = handle
            .client
            .complete("b")
            .await
            .expect("second scripted call should succeed");
        assert_eq!(second, "second");

        assert!(handle.client.complete("c").await.is_err());
    }
}
