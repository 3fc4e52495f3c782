//! # Data Transfer Objects
//!
//! HTTP 경계에서 토큰을 주고받기 위한 요청/응답 객체입니다.
//! 도메인 모델의 내부 필드(토큰 종류, 부여 스코프 등)는 노출하지 않습니다.

pub mod tokens;

pub use tokens::*;
