use anyhow::{Context, Result};
use serde::Deserialize;
use std::env;
use std::path::PathBuf;

#[derive(Debug, Clone, Deserialize, Default)]
pub struct Config {
    pub server: ServerConfig,
    pub llm: LLMConfig,
    pub parser: ParserConfig,
    pub storage: StorageConfig,
    pub auth: AuthConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub port: u16,
    pub host: String,
    pub cors_allowed_origins: Vec<String>,
    /// Request body cap for uploads; `None` leaves bodies unbounded.
    pub max_upload_bytes: Option<usize>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LLMConfig {
    pub provider: String,
    pub model: String,
    pub api_key: String,
    pub api_base: Option<String>,
    pub max_tokens: Option<u32>,
    pub temperature: Option<f32>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ParserConfig {
    pub api_key: String,
    pub endpoint: String,
    pub strategy: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    pub upload_dir: PathBuf,
    pub output_dir: PathBuf,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct AuthConfig {
    pub supabase_url: String,
    pub supabase_key: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 8000,
            host: "0.0.0.0".to_string(),
            cors_allowed_origins: vec!["http://localhost:3000".to_string()],
            max_upload_bytes: None,
        }
    }
}

impl Default for LLMConfig {
    fn default() -> Self {
        Self {
            provider: "google".to_string(),
            model: "gemini-1.5-flash".to_string(),
            api_key: String::new(),
            api_base: None,
            max_tokens: None,
            temperature: None,
        }
    }
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            endpoint: "https://api.unstructuredapp.io/general/v0/general".to_string(),
            strategy: "hi_res".to_string(),
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            upload_dir: PathBuf::from("uploads"),
            output_dir: PathBuf::from("output"),
        }
    }
}

impl LLMConfig {
    /// Provider-specific key variable consulted when `LLM_API_KEY` is unset.
    fn provider_key_var(provider: &str) -> &'static str {
        match provider {
            "google" | "gemini" => "GOOGLE_API_KEY",
            "groq" => "GROQ_API_KEY",
            "openrouter" => "OPENROUTER_API_KEY",
            _ => "OPENAI_API_KEY",
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        let defaults = Config::default();
        let provider = env::var("LLM_PROVIDER").unwrap_or(defaults.llm.provider);

        Ok(Self {
            server: ServerConfig {
                port: parse_var("PORT")?.unwrap_or(defaults.server.port),
                host: env::var("HOST").unwrap_or(defaults.server.host),
                cors_allowed_origins: env::var("ALLOWED_ORIGINS")
                    .map(|origins| split_list(&origins))
                    .unwrap_or(defaults.server.cors_allowed_origins),
                max_upload_bytes: parse_var("MAX_UPLOAD_BYTES")?,
            },
            llm: LLMConfig {
                api_key: env::var("LLM_API_KEY")
                    .or_else(|_| env::var(LLMConfig::provider_key_var(&provider)))
                    .unwrap_or_default(),
                model: env::var("LLM_MODEL").unwrap_or(defaults.llm.model),
                api_base: env::var("LLM_API_BASE").ok().filter(|s| !s.is_empty()),
                max_tokens: parse_var("LLM_MAX_TOKENS")?,
                temperature: parse_var("LLM_TEMPERATURE")?,
                provider,
            },
            parser: ParserConfig {
                api_key: env::var("UNSTRUCTUREDIO_API_KEY").unwrap_or_default(),
                endpoint: env::var("UNSTRUCTUREDIO_ENDPOINT").unwrap_or(defaults.parser.endpoint),
                strategy: env::var("UNSTRUCTURED_STRATEGY").unwrap_or(defaults.parser.strategy),
            },
            storage: StorageConfig {
                upload_dir: env::var("UPLOAD_DIRECTORY")
                    .map(PathBuf::from)
                    .unwrap_or(defaults.storage.upload_dir),
                output_dir: env::var("OUTPUT_DIRECTORY")
                    .map(PathBuf::from)
                    .unwrap_or(defaults.storage.output_dir),
            },
            auth: AuthConfig {
                supabase_url: env::var("SUPABASE_URL").unwrap_or_default(),
                supabase_key: env::var("SUPABASE_KEY").unwrap_or_default(),
            },
        })
    }
}

fn parse_var<T>(name: &str) -> Result<Option<T>>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(name) {
        Ok(raw) if !raw.trim().is_empty() => raw
            .trim()
            .parse()
            .map(Some)
            .with_context(|| format!("{} has an invalid value: {:?}", name, raw)),
        _ => Ok(None),
    }
}

fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}
