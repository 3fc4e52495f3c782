//! 요청 인증 모델
//!
//! 인증 미들웨어의 동작 모드와 검증을 통과한 사용자 정보를 정의합니다.

pub mod authenticated_user;
pub mod authentication_request;

pub use authenticated_user::*;
pub use authentication_request::*;
