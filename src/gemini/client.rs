// HTTP client for the Gemini API
//
// One synchronous request-response call per question: `generate_content`
// posts a single composite prompt and returns the answer text. The key is
// carried as a query parameter, which is how the v1beta endpoints
// authenticate.

use reqwest::Client;
use std::time::Duration;

use super::error::GeminiError;
use super::retry::with_retry;
use super::types::{
    GenerateContentRequest, GenerateContentResponse, GenerationParams, ListModelsResponse,
    ModelDescriptor,
};

const GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
const REQUEST_TIMEOUT_SECS: u64 = 60;

pub struct GeminiClient {
    client: Client,
    api_key: String,
    base_url: String,
    retry_enabled: bool,
}

impl GeminiClient {
    pub fn new(api_key: String) -> Result<Self, GeminiError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;

        Ok(Self {
            client,
            api_key,
            base_url: GEMINI_BASE_URL.to_string(),
            retry_enabled: true,
        })
    }

    /// Override the API base URL (used by tests against a local server).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Enable or disable the bounded-backoff retry policy.
    pub fn with_retry_enabled(mut self, enabled: bool) -> Self {
        self.retry_enabled = enabled;
        self
    }

    /// Send one prompt to `model` and return the answer text.
    ///
    /// A successful call that carries no text is reported as
    /// `GeminiError::EmptyResponse`, never as an empty string.
    pub async fn generate_content(
        &self,
        model: &str,
        prompt: &str,
        params: &GenerationParams,
    ) -> Result<String, GeminiError> {
        let request = GenerateContentRequest::from_prompt(prompt, params);
        if self.retry_enabled {
            with_retry(|| self.generate_content_once(model, &request)).await
        } else {
            self.generate_content_once(model, &request).await
        }
    }

    async fn generate_content_once(
        &self,
        model: &str,
        request: &GenerateContentRequest,
    ) -> Result<String, GeminiError> {
        let url = format!(
            "{}/models/{}:generateContent?key={}",
            self.base_url, model, self.api_key
        );

        tracing::debug!("Sending request to Gemini API for model {}", model);

        let response = self
            .client
            .post(&url)
            .header("content-type", "application/json")
            .json(request)
            .send()
            .await?;

        let status = response.status();

        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            return Err(GeminiError::Api {
                status: status.as_u16(),
                message: error_body,
            });
        }

        let parsed: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| GeminiError::Parse(e.to_string()))?;

        tracing::debug!("Received response: {:?}", parsed);

        let text = parsed.text();
        if text.trim().is_empty() {
            return Err(GeminiError::EmptyResponse);
        }

        Ok(text)
    }

    /// List the models the backend currently offers, with their
    /// capability tags. Used by the auto-discovery model strategy.
    pub async fn list_models(&self) -> Result<Vec<ModelDescriptor>, GeminiError> {
        if self.retry_enabled {
            with_retry(|| self.list_models_once()).await
        } else {
            self.list_models_once().await
        }
    }

    async fn list_models_once(&self) -> Result<Vec<ModelDescriptor>, GeminiError> {
        let url = format!("{}/models?key={}", self.base_url, self.api_key);

        let response = self.client.get(&url).send().await?;
        let status = response.status();

        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            return Err(GeminiError::Api {
                status: status.as_u16(),
                message: error_body,
            });
        }

        let parsed: ListModelsResponse = response
            .json()
            .await
            .map_err(|e| GeminiError::Parse(e.to_string()))?;

        Ok(parsed.models)
    }
}
