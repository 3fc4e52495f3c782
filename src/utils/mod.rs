//! 공통 유틸리티 함수 모듈
//!
//! 크레이트 전체에서 사용되는 문자열 정리, 시간 변환 함수들을 제공합니다.
//!
//! # Modules
//!
//! - [`string_utils`] - 문자열 검증, 정리 유틸리티
//! - [`time_utils`] - 초 단위 시각 변환

pub mod string_utils;
pub mod time_utils;
