// Account signup capability
// Authentication is delegated to an external vendor behind `AuthService`.

pub mod supabase;

pub use supabase::*;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::AppResult;

/// Account record returned by the auth vendor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthUser {
    pub id: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    /// Unset until the account is confirmed
    #[serde(default)]
    pub confirmed_at: Option<DateTime<Utc>>,
}

impl AuthUser {
    pub fn is_confirmed(&self) -> bool {
        self.confirmed_at.is_some()
    }
}

#[async_trait]
pub trait AuthService: Send + Sync {
    async fn sign_up(&self, email: &str, password: &str) -> AppResult<AuthUser>;
}
