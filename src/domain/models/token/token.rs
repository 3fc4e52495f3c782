//! 서명된 토큰 및 페어링 된 세트, 검증 결과
//!
//! 발급자/검증자가 반환하는 불변 값 객체들을 정의합니다.

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::Header;
use serde::Serialize;

use super::claims::{Claims, TokenKind};

/// 전송용 토큰 타입 라벨
pub const BEARER: &str = "Bearer";

/// 발급 결과: 서명된 토큰과 만료 정보
///
/// `kind`와 `scope`는 직렬화되지 않으며 발급 직후 로컬 검사 용도로만 사용됩니다.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SignedToken {
    /// 불투명한 서명 토큰 문자열
    pub token: String,
    /// 만료 시각
    pub expires_at: DateTime<Utc>,
    /// 발급 시각
    pub issued_at: DateTime<Utc>,
    /// 전송용 타입 라벨 (항상 "Bearer")
    pub token_type: String,
    /// 유효 기간 (초), `expires_at - issued_at`
    pub expires_in: i64,
    #[serde(skip)]
    pub(crate) kind: TokenKind,
    #[serde(skip)]
    pub(crate) scope: Vec<String>,
}

impl SignedToken {
    pub(crate) fn new(
        token: String,
        kind: TokenKind,
        issued_at: DateTime<Utc>,
        expires_at: DateTime<Utc>,
        scope: Vec<String>,
    ) -> Self {
        Self {
            token,
            expires_at,
            issued_at,
            token_type: BEARER.to_string(),
            expires_in: (expires_at - issued_at).num_seconds(),
            kind,
            scope,
        }
    }

    /// 현재 시각 기준 만료 여부
    pub fn is_expired(&self) -> bool {
        Utc::now() > self.expires_at
    }

    /// `Authorization` 헤더 값 (`"Bearer <token>"`)
    pub fn auth_header(&self) -> String {
        format!("{} {}", self.token_type, self.token)
    }

    /// 남은 유효 기간이 임계값 이하인지 확인
    pub fn should_refresh(&self, threshold: Duration) -> bool {
        self.expires_at - Utc::now() <= threshold
    }

    pub fn is_access_token(&self) -> bool {
        self.kind == TokenKind::Access
    }

    pub fn is_refresh_token(&self) -> bool {
        self.kind == TokenKind::Refresh
    }

    /// 발급 시 부여된 `scope` 목록
    pub fn scope(&self) -> &[String] {
        &self.scope
    }
}

/// 액세스 토큰과 선택적 리프레시 토큰의 쌍
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TokenPair {
    pub access_token: SignedToken,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<SignedToken>,
}

impl TokenPair {
    pub fn has_refresh_token(&self) -> bool {
        self.refresh_token.is_some()
    }

    /// 액세스 토큰이 유효하고, 리프레시 토큰이 있다면 그것도 유효한지 확인
    pub fn both_valid(&self) -> bool {
        if self.access_token.is_expired() {
            return false;
        }
        !self.refresh_token.as_ref().is_some_and(SignedToken::is_expired)
    }
}

/// 검증 결과
///
/// `Ok`로 반환된 값의 `is_valid`는 항상 `true`이며, 무효는 에러로 전달됩니다.
#[derive(Debug, Clone, Serialize)]
pub struct ValidatedToken {
    /// 서명 검증을 통과한 JOSE 헤더
    #[serde(skip)]
    pub header: Header,
    /// 디코딩된 클레임
    pub claims: Claims,
    pub is_valid: bool,
    /// 클레임의 만료 시각 (없으면 `None`)
    pub expires_at: Option<DateTime<Utc>>,
}

impl ValidatedToken {
    pub fn user_id(&self) -> &str {
        &self.claims.user_id
    }
}
