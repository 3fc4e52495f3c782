//! # Domain Models Module
//!
//! 토큰 수명주기의 값 객체들을 정의하는 모듈입니다.
//! 모든 모델은 식별자보다 값 자체가 중요하며, 생성 이후 변경되지 않습니다.
//!
//! ## 모듈 구성
//!
//! ```text
//! models/
//! ├── token/    ← 클레임, 서명 토큰, 검증 결과, 호출 옵션
//! └── auth/     ← 미들웨어 인증 모드와 인증된 사용자
//! ```

pub mod auth;
pub mod token;
