use std::time::Duration;

use anyhow::{anyhow, Context};
use async_openai::{
    config::OpenAIConfig,
    types::{ChatCompletionRequestUserMessageArgs, CreateChatCompletionRequestArgs},
    Client,
};

use crate::configuration::InterpreterSettings;

pub struct OpenaiClient {
    client: Client<OpenAIConfig>,
    model: String,
}

impl OpenaiClient {
    pub fn new(api_key: String, settings: &InterpreterSettings) -> Self {
        let mut config = OpenAIConfig::new().with_api_key(api_key);
        if let Some(api_base) = &settings.api_base {
            config = config.with_api_base(api_base);
        }

        // One attempt per prompt: rate limits and 5xx fail at once.
        let single_attempt = backoff::ExponentialBackoffBuilder::new()
            .with_max_elapsed_time(Some(Duration::ZERO))
            .build();

        OpenaiClient {
            client: Client::with_config(config).with_backoff(single_attempt),
            model: settings.model.clone(),
        }
    }

    /// Sends a single user prompt and returns the text of the first choice.
    pub async fn complete(&self, prompt: &str) -> anyhow::Result<String> {
        let request = CreateChatCompletionRequestArgs::default()
            .model(&self.model)
            .messages([ChatCompletionRequestUserMessageArgs::default()
                .content(prompt)
                .build()?
                .into()])
            .max_tokens(1000_u32)
            .build()?;

        let response = self
            .client
            .chat()
            .create(request)
            .await
            .context("Chat completion request failed")?;
        log::debug!("Response: {:?}", response);

        response
            .choices
            .first()
            .ok_or_else(|| anyhow!("No choices in Openai response"))?
            .message
            .content
            .clone()
            .ok_or_else(|| anyhow!("No content"))
    }
}
