//! # Configuration Module
//!
//! 토큰 서비스의 설정 관리를 담당하는 모듈입니다.
//! 환경 변수 기반의 설정값을 불변 구조체로 캡처하여 서비스 생성 시 전달합니다.
//!
//! ## 모듈 구성
//!
//! - [`auth_config`] - JWT 서명 키, 발급자/대상, 만료 시간, 알고리즘
//!
//! ## 사용 예제
//!
//! ```rust,ignore
//! use crate::config::JwtConfig;
//! use crate::services::auth::TokenService;
//!
//! let service = TokenService::new(JwtConfig::from_env());
//! ```

pub mod auth_config;

pub use auth_config::*;
