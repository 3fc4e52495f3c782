use serde::Deserialize;

/// 토큰 갱신 요청 DTO
#[derive(Debug, Deserialize)]
pub struct RefreshRequest {
    pub refresh_token: String,
}
