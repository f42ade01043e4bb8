// LLM abstraction layer

pub mod provider;
pub mod google;
pub mod openai;

pub use provider::*;
pub use crate::types::{LLMMessage, LLMRequest, LLMResponse, TokenUsage};
