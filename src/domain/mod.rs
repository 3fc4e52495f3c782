//! # Domain Layer Module
//!
//! 토큰 서비스가 주고받는 값 객체와 전송 객체를 담는 도메인 계층입니다.
//!
//! ```text
//! Domain Layer (이 모듈)
//! ├── models   - 클레임, 토큰, 옵션, 인증 사용자
//! └── dto      - HTTP 응답용 전송 객체
//!      │
//!      ▼
//! Application Layer (services::auth)
//! ```

pub mod dto;
pub mod models;

pub use dto::*;
pub use models::auth;
pub use models::token;
