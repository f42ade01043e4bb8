use async_trait::async_trait;
use crate::types::{AppError, AppResult, LLMRequest, LLMResponse};

#[async_trait]
pub trait LLMAdapter: Send + Sync {
    async fn create_chat_completion(&self, request: &LLMRequest) -> AppResult<LLMResponse>;
}

/// Configuration for an LLM provider
#[derive(Debug, Clone)]
pub struct LLMProviderConfig {
    pub name: String,
    pub api_key: String,
    /// Overrides the provider's default endpoint (proxies, tests)
    pub api_base: Option<String>,
}

pub struct LLM {
    adapter: Box<dyn LLMAdapter>,
    provider_name: String,
}

impl LLM {
    pub fn new(provider: LLMProviderConfig) -> AppResult<Self> {
        use crate::llm::{google::GoogleAdapter, openai::{self, OpenAIAdapter}};

        let base = provider.api_base.as_deref();
        let adapter: Box<dyn LLMAdapter> = match provider.name.as_str() {
            "google" | "gemini" => Box::new(GoogleAdapter::new_with_api_base(
                &provider.api_key,
                base.unwrap_or(crate::llm::google::GOOGLE_API_BASE),
            )),
            "openai" => Box::new(OpenAIAdapter::new_with_api_base(
                &provider.api_key,
                base.unwrap_or(openai::OPENAI_API_BASE),
            )),
            // OpenAI-compatible hosts
            "groq" => Box::new(OpenAIAdapter::new_with_api_base(
                &provider.api_key,
                base.unwrap_or(openai::GROQ_API_BASE),
            )),
            "openrouter" => Box::new(OpenAIAdapter::new_with_api_base(
                &provider.api_key,
                base.unwrap_or(openai::OPENROUTER_API_BASE),
            )),
            other => {
                return Err(AppError::Config(format!("Unsupported LLM provider: {}", other)));
            }
        };

        Ok(Self {
            adapter,
            provider_name: provider.name,
        })
    }

    pub fn provider_name(&self) -> &str {
        &self.provider_name
    }

    pub async fn create_chat_completion(&self, request: &LLMRequest) -> AppResult<LLMResponse> {
        self.adapter.create_chat_completion(request).await
    }
}
