//! 토큰 인증 서비스 모듈
//!
//! 서명된 인증 토큰의 발급, 검증, 갱신을 담당하는 구성 요소들을 제공합니다.
//!
//! ```text
//! ClaimsCodec ← TokenIssuer ─┐
//!             ← TokenVerifier ┼─ TokenRefresher ─ TokenService
//! ```
//!
//! # Security
//!
//! - HMAC (HS256/HS384/HS512) 토큰 서명
//! - 서명 검증은 어떤 옵션으로도 생략할 수 없음
//! - 액세스 토큰으로는 갱신 불가
//!
//! # Examples
//!
//! ```rust,ignore
//! use crate::services::auth::TokenService;
//!
//! let token_service = TokenService::instance();
//! let pair = token_service.issue_pair(&Claims::new("u1"), vec![with_refresh_token()])?;
//! let validated = token_service.verify(&pair.access_token.token, vec![])?;
//! ```

pub mod claims_codec;
pub mod token_issuer;
pub mod token_refresher;
pub mod token_service;
pub mod token_verifier;

pub use claims_codec::*;
pub use token_issuer::*;
pub use token_refresher::*;
pub use token_service::*;
pub use token_verifier::*;
