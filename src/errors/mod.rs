//! 에러 타입 모듈
//!
//! 토큰 발급/검증/갱신의 실패 종류와 HTTP 응답 매핑을 제공합니다.

pub mod errors;

pub use errors::*;
