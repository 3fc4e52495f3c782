use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::models::token::{SignedToken, TokenPair, BEARER};

/// 토큰 쌍 발급 응답
///
/// ```json
/// {
///   "access_token": "eyJ...",
///   "refresh_token": "eyJ...",
///   "token_type": "Bearer",
///   "expires_in": 3600,
///   "expires_at": "2025-01-01T01:00:00Z"
/// }
/// ```
#[derive(Debug, Clone, Serialize)]
pub struct TokenPairResponse {
    pub access_token: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,
    pub token_type: String,
    /// 액세스 토큰 유효 기간 (초)
    pub expires_in: i64,
    /// 액세스 토큰 만료 시각
    pub expires_at: DateTime<Utc>,
}

impl From<&TokenPair> for TokenPairResponse {
    fn from(pair: &TokenPair) -> Self {
        Self {
            access_token: pair.access_token.token.clone(),
            refresh_token: pair.refresh_token.as_ref().map(|t| t.token.clone()),
            token_type: BEARER.to_string(),
            expires_in: pair.access_token.expires_in,
            expires_at: pair.access_token.expires_at,
        }
    }
}

impl From<&SignedToken> for TokenPairResponse {
    fn from(token: &SignedToken) -> Self {
        Self {
            access_token: token.token.clone(),
            refresh_token: None,
            token_type: BEARER.to_string(),
            expires_in: token.expires_in,
            expires_at: token.expires_at,
        }
    }
}
