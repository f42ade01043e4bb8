//! Supabase (GoTrue) signup client

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, info};

use super::{AuthService, AuthUser};
use crate::config::AuthConfig;
use crate::types::{AppError, AppResult};

pub struct SupabaseAuth {
    client: Client,
    base_url: String,
    api_key: String,
}

/// GoTrue answers signup with either a session wrapping the user (auto
/// confirm on) or the bare user (confirmation email pending).
#[derive(Deserialize)]
#[serde(untagged)]
enum SignupResponse {
    Session { user: AuthUser },
    User(AuthUser),
}

#[derive(Deserialize, Default)]
struct GoTrueError {
    msg: Option<String>,
    error_description: Option<String>,
    message: Option<String>,
}

impl SupabaseAuth {
    pub fn new(base_url: &str, api_key: &str) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
        }
    }

    pub fn from_config(config: &AuthConfig) -> Self {
        Self::new(&config.supabase_url, &config.supabase_key)
    }

    fn signup_url(&self) -> String {
        format!("{}/auth/v1/signup", self.base_url)
    }
}

#[async_trait]
impl AuthService for SupabaseAuth {
    async fn sign_up(&self, email: &str, password: &str) -> AppResult<AuthUser> {
        if self.base_url.is_empty() {
            return Err(AppError::Config("SUPABASE_URL is not configured".to_string()));
        }

        debug!(email = %email, "Creating account");

        let response = self
            .client
            .post(self.signup_url())
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
            .json(&serde_json::json!({ "email": email, "password": password }))
            .send()
            .await
            .map_err(|e| AppError::AuthApi(format!("Signup request failed: {}", e)))?;

        let status = response.status();
        let body = response.text().await.unwrap_or_default();

        if !status.is_success() {
            let parsed: GoTrueError = serde_json::from_str(&body).unwrap_or_default();
            let message = parsed
                .msg
                .or(parsed.error_description)
                .or(parsed.message)
                .unwrap_or(body);
            return Err(AppError::AuthApi(format!("Signup failed ({}): {}", status, message)));
        }

        let user = match serde_json::from_str::<SignupResponse>(&body)
            .map_err(|e| AppError::AuthApi(format!("Failed to parse signup response: {}", e)))?
        {
            SignupResponse::Session { user } => user,
            SignupResponse::User(user) => user,
        };

        info!(user_id = %user.id, confirmed = user.is_confirmed(), "Signup completed");
        Ok(user)
    }
}
