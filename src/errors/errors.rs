//! 토큰 서비스 전역에서 사용하는 에러 시스템
//!
//! 토큰 발급/검증/갱신 과정에서 발생하는 모든 실패를 하나의 열거형으로 표현합니다.
//! `thiserror`와 `actix_web::ResponseError`를 사용하여 타입 안전하고
//! 일관된 에러 처리를 제공합니다.
//!
//! ## 에러 분류
//!
//! | TokenError | HTTP Status | 의미 |
//! |------------|-------------|------|
//! | `InvalidToken` | 401 | 형식 오류, nbf 위반, iss/aud/scope 불일치, 잘못된 토큰 종류 |
//! | `TokenExpired` | 401 | 만료된 토큰 (리프레시 요청 유도) |
//! | `InvalidSignature` | 401 | 서명 검증 실패 |
//! | `InvalidClaims` | 401 | 클레임 디코딩 실패, 필수 필드 누락 |
//! | `OptionError` | 400 | 호출자 옵션이 입력을 거부함 |
//! | `SigningError` | 500 | 서명 키/설정 오류 |
//!
//! ## 사용 예제
//!
//! ```rust,ignore
//! use crate::errors::{TokenError, TokenResult};
//!
//! fn check(validated: TokenResult<ValidatedToken>) {
//!     match validated {
//!         Err(TokenError::TokenExpired) => { /* 리프레시 토큰으로 재발급 */ }
//!         Err(e) => { /* 재로그인 강제 */ }
//!         Ok(token) => { /* 통과 */ }
//!     }
//! }
//! ```

use thiserror::Error;

/// 토큰 수명주기 에러 타입
///
/// 모든 변형은 호출 단위로 종결적이며 재시도 정책은 호출자가 결정합니다.
/// 서비스 상태를 오염시키지 않습니다.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TokenError {
    /// 토큰 형식 오류 또는 정책 게이트 실패 (401 Unauthorized)
    #[error("Invalid token: {0}")]
    InvalidToken(String),

    /// 만료 게이트 실패 (401 Unauthorized)
    #[error("Token expired")]
    TokenExpired,

    /// 서명 검증 실패 (401 Unauthorized)
    #[error("Invalid signature")]
    InvalidSignature,

    /// 클레임 디코딩 실패 (401 Unauthorized)
    #[error("Invalid claims: {0}")]
    InvalidClaims(String),

    /// 옵션 적용 실패 (400 Bad Request)
    #[error("Validation error on field '{field}': {message}")]
    OptionError { field: String, message: String },

    /// 서명 실패 (500 Internal Server Error)
    #[error("Signing error: {0}")]
    SigningError(String),
}

impl TokenError {
    /// 옵션 에러를 생성합니다.
    pub fn option(field: &str, message: impl Into<String>) -> Self {
        TokenError::OptionError {
            field: field.to_string(),
            message: message.into(),
        }
    }

    /// 응답 본문에 사용하는 기계 판독용 에러 코드
    pub fn error_code(&self) -> &'static str {
        match self {
            TokenError::InvalidToken(_) => "invalid_token",
            TokenError::TokenExpired => "token_expired",
            TokenError::InvalidSignature => "invalid_signature",
            TokenError::InvalidClaims(_) => "invalid_claims",
            TokenError::OptionError { .. } => "invalid_option",
            TokenError::SigningError(_) => "signing_error",
        }
    }

    /// 토큰 자체가 거부된 경우인지 확인 (발급 측 에러와 구분)
    pub fn is_rejection(&self) -> bool {
        matches!(
            self,
            TokenError::InvalidToken(_)
                | TokenError::TokenExpired
                | TokenError::InvalidSignature
                | TokenError::InvalidClaims(_)
        )
    }
}

impl actix_web::ResponseError for TokenError {
    fn status_code(&self) -> actix_web::http::StatusCode {
        use actix_web::http::StatusCode;

        match self {
            TokenError::OptionError { .. } => StatusCode::BAD_REQUEST,
            TokenError::SigningError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            _ => StatusCode::UNAUTHORIZED,
        }
    }

    /// HTTP 에러 응답을 생성합니다.
    ///
    /// 서명 에러의 상세 내용은 외부에 노출하지 않습니다.
    fn error_response(&self) -> actix_web::HttpResponse {
        let message = match self {
            TokenError::SigningError(_) => "토큰을 발급할 수 없습니다".to_string(),
            other => other.to_string(),
        };

        actix_web::HttpResponse::build(self.status_code())
            .json(serde_json::json!({
                "error": self.error_code(),
                "message": message
            }))
    }
}

/// 편의성을 위한 Result 타입 별칭
pub type TokenResult<T> = Result<T, TokenError>;

/// 외부 라이브러리 에러를 TokenError로 변환하는 확장 trait
pub trait ErrorContext<T> {
    /// 컨텍스트 정보와 함께 서명 에러로 변환합니다.
    fn context(self, msg: &str) -> TokenResult<T>;

    /// 클로저를 사용하여 지연 평가된 컨텍스트를 제공합니다.
    fn with_context<F>(self, f: F) -> TokenResult<T>
    where
        F: FnOnce() -> String;
}

impl<T, E> ErrorContext<T> for Result<T, E>
where
    E: std::fmt::Display,
{
    fn context(self, msg: &str) -> TokenResult<T> {
        self.map_err(|e| TokenError::SigningError(format!("{}: {}", msg, e)))
    }

    fn with_context<F>(self, f: F) -> TokenResult<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| TokenError::SigningError(format!("{}: {}", f(), e)))
    }
}
