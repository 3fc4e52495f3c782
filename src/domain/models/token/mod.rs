//! 토큰 수명주기 도메인 모델
//!
//! - [`claims`] - 토큰에 서명되어 들어가는 클레임
//! - [`token`] - 발급/검증 결과 값 객체
//! - [`options`] - 호출 단위 설정과 조합 가능한 옵션

pub mod claims;
pub mod options;
pub mod token;

pub use claims::*;
pub use options::*;
pub use token::*;
