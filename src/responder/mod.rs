// Query responder
//
// Builds the composite prompt (persona preamble + labeled corpus block +
// labeled question block) and performs one synchronous backend call per
// question. No conversation history is replayed to the backend; each call
// is context-free apart from the corpus and the current question.

use std::sync::Arc;
use thiserror::Error;

use crate::gemini::{GeminiClient, GeminiError, GenerationParams};

/// Persona and citation instruction. Tunable wording, not a structural
/// contract: it asks the model to answer from the data and cite proposals
/// in the `[n번 제안]` form.
pub const DEFAULT_PREAMBLE: &str = "당신은 교육 정책 전문가입니다. 다음 정책 제안 데이터를 기반으로 사용자의 질문에 답변하세요.\n가능하다면 [n번 제안] 형식을 사용하여 특정 제안을 언급해주세요.";

const CONTEXT_LABEL: &str = "[정책 제안 데이터]";
const QUESTION_LABEL: &str = "[사용자 질문]";

#[derive(Debug, Error)]
pub enum RespondError {
    /// The backend call succeeded but returned no text.
    #[error("empty response")]
    EmptyResponse,

    /// The backend call itself failed (network, auth, quota,
    /// model-not-found). Carries the backend message.
    #[error("{0}")]
    Backend(GeminiError),
}

impl From<GeminiError> for RespondError {
    fn from(e: GeminiError) -> Self {
        match e {
            GeminiError::EmptyResponse => RespondError::EmptyResponse,
            other => RespondError::Backend(other),
        }
    }
}

/// Stateless per invocation: everything it needs is fixed at construction
/// apart from the question.
pub struct Responder {
    client: GeminiClient,
    model: String,
    context: Arc<str>,
    preamble: String,
    params: GenerationParams,
}

impl Responder {
    pub fn new(client: GeminiClient, model: String, context: Arc<str>) -> Self {
        Self {
            client,
            model,
            context,
            preamble: DEFAULT_PREAMBLE.to_string(),
            params: GenerationParams::default(),
        }
    }

    pub fn with_params(mut self, params: GenerationParams) -> Self {
        self.params = params;
        self
    }

    pub fn with_preamble(mut self, preamble: impl Into<String>) -> Self {
        self.preamble = preamble.into();
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Concatenate preamble, labeled corpus block, and labeled question
    /// block into the composite prompt.
    pub fn build_prompt(&self, question: &str) -> String {
        format!(
            "{}\n\n{}\n{}\n\n{}\n{}",
            self.preamble, CONTEXT_LABEL, self.context, QUESTION_LABEL, question
        )
    }

    /// Answer one question from the cached corpus.
    pub async fn respond(&self, question: &str) -> Result<String, RespondError> {
        let prompt = self.build_prompt(question);
        let answer = self
            .client
            .generate_content(&self.model, &prompt, &self.params)
            .await?;
        Ok(answer)
    }
}
