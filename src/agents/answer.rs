//! Answer Agent
//!
//! Answers a question about one stored document by handing the full document
//! text and the question to the configured LLM provider.

use async_trait::async_trait;
use tracing::{error, info};

use crate::config::LLMConfig;
use crate::llm::provider::{LLMProviderConfig, LLM};
use crate::types::{AppResult, LLMMessage, LLMRequest};

/// Question-answering capability used by the `/ask` endpoint
#[async_trait]
pub trait QaModel: Send + Sync {
    async fn answer(&self, document_content: &str, query: &str) -> AppResult<String>;
}

pub struct AnswerAgent {
    llm: LLM,
    model: String,
    max_tokens: Option<u32>,
    temperature: Option<f32>,
}

impl AnswerAgent {
    pub fn from_config(config: &LLMConfig) -> AppResult<Self> {
        let llm = LLM::new(LLMProviderConfig {
            name: config.provider.clone(),
            api_key: config.api_key.clone(),
            api_base: config.api_base.clone(),
        })?;

        Ok(Self {
            llm,
            model: config.model.clone(),
            max_tokens: config.max_tokens,
            temperature: config.temperature,
        })
    }

    pub fn provider_name(&self) -> &str {
        self.llm.provider_name()
    }

    /// Build the grounded prompt combining document text and question
    pub fn create_prompt(document_content: &str, query: &str) -> String {
        format!(
            "Based on the following document content, please answer the question.\n\n\
             Document content:\n{}\n\n\
             Question: {}\n\n\
             Please provide a concise and accurate answer based only on the information provided in the document.",
            document_content, query
        )
    }
}

#[async_trait]
impl QaModel for AnswerAgent {
    async fn answer(&self, document_content: &str, query: &str) -> AppResult<String> {
        info!(
            provider = %self.llm.provider_name(),
            model = %self.model,
            content_len = document_content.len(),
            query_len = query.len(),
            "Answering document question"
        );

        let request = LLMRequest {
            model: self.model.clone(),
            messages: vec![LLMMessage::user(Self::create_prompt(document_content, query))],
            max_tokens: self.max_tokens,
            temperature: self.temperature,
            system_instruction: None,
        };

        match self.llm.create_chat_completion(&request).await {
            Ok(response) => {
                info!(
                    response_len = response.content.len(),
                    total_tokens = response.usage.total_tokens,
                    "Generated answer"
                );
                Ok(response.content)
            }
            Err(e) => {
                error!(error = %e, "LLM call failed");
                Err(e)
            }
        }
    }
}
