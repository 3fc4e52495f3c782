//! 토큰 수명주기 인증 라이브러리
//!
//! 사용자 신원과 클레임을 담은 서명 토큰을 발급, 검증, 갱신합니다.
//! 검증 시에는 만료, nbf, 발급자, 대상, 필수 스코프 정책을 순서대로 적용합니다.
//!
//! # Features
//!
//! - **발급**: 액세스/리프레시 토큰 및 토큰 쌍 발급
//! - **검증**: 서명 검증 후 정책 게이트 적용, 실패 원인별 에러 구분
//! - **갱신**: 리프레시 토큰으로 같은 신원의 액세스 토큰 재발급
//! - **미들웨어**: ActixWeb Bearer 토큰 인증
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────┐
//! │   Middlewares   │ ← Authorization 헤더 처리
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │  TokenService   │ ← 발급/검증/갱신 진입점
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │ Issuer/Verifier │ ← 서명과 정책 게이트
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │   ClaimsCodec   │ ← 클레임 ↔ 와이어 클레임
//! └─────────────────┘
//! ```
//!
//! # Examples
//!
//! ```rust,ignore
//! use token_authority::config::JwtConfig;
//! use token_authority::domain::token::{Claims, with_refresh_token, with_required_scopes};
//! use token_authority::services::auth::TokenService;
//!
//! let service = TokenService::new(JwtConfig::from_env());
//! let claims = Claims {
//!     scopes: vec!["read".to_string()],
//!     ..Claims::new("u1")
//! };
//!
//! let pair = service.issue_pair(&claims, vec![with_refresh_token()])?;
//! let validated = service.verify(&pair.access_token.token, vec![with_required_scopes(["read"])])?;
//! ```

pub mod config;
pub mod domain;
pub mod errors;
pub mod middlewares;
pub mod services;
pub mod utils;
