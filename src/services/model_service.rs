use std::sync::Arc;
use std::time::Duration;

use async_openai::config::OpenAIConfig;
use async_openai::types::chat::{
    ChatCompletionRequestUserMessageArgs, CreateChatCompletionRequestArgs,
};
use async_openai::Client;
use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;
use secrecy::{ExposeSecret, SecretString};

use crate::config::Config;
use crate::errors::{AppError, AppResult};

/// One prompt in, one completion out. The only seam between this service and
/// the hosted model.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait CompletionClient: Send + Sync {
    async fn complete(&self, prompt: &str) -> AppResult<String>;
}

/// Builds the completion client for a freshly created session from the
/// credential submitted with it.
#[cfg_attr(test, automock)]
pub trait CompletionClientFactory: Send + Sync {
    fn build(&self, api_key: &SecretString, model: &str) -> Arc<dyn CompletionClient>;
}

pub struct OpenAiModelService {
    client: Client<OpenAIConfig>,
    model: String,
    timeout: Duration,
}

impl OpenAiModelService {
    pub fn new(
        api_key: &SecretString,
        model: &str,
        api_base: Option<&str>,
        timeout: Duration,
    ) -> Self {
        let mut config = OpenAIConfig::new().with_api_key(api_key.expose_secret());
        if let Some(base) = api_base {
            config = config.with_api_base(base);
        }

        Self {
            client: Client::with_config(config),
            model: model.to_string(),
            timeout,
        }
    }
}

#[async_trait]
impl CompletionClient for OpenAiModelService {
    async fn complete(&self, prompt: &str) -> AppResult<String> {
        let request = CreateChatCompletionRequestArgs::default()
            .model(self.model.as_str())
            .messages([ChatCompletionRequestUserMessageArgs::default()
                .content(prompt)
                .build()?
                .into()])
            .build()?;

        let response = tokio::time::timeout(self.timeout, self.client.chat().create(request))
            .await
            .map_err(|_| {
                AppError::Upstream(format!(
                    "model call timed out after {}s",
                    self.timeout.as_secs()
                ))
            })??;

        let content = response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .unwrap_or_default();

        if content.trim().is_empty() {
            return Err(AppError::Upstream(
                "model returned an empty completion".to_string(),
            ));
        }

        Ok(content)
    }
}

pub struct OpenAiClientFactory {
    api_base: Option<String>,
    timeout: Duration,
}

impl OpenAiClientFactory {
    pub fn new(config: &Config) -> Self {
        Self {
            api_base: config.model_api_base.clone(),
            timeout: Duration::from_secs(config.model_timeout_secs),
        }
    }
}

impl CompletionClientFactory for OpenAiClientFactory {
    fn build(&self, api_key: &SecretString, model: &str) -> Arc<dyn CompletionClient> {
        Arc::new(OpenAiModelService::new(
            api_key,
            model,
            self.api_base.as_deref(),
            self.timeout,
        ))
    }
}
