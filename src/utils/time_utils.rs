//! # 시간 유틸리티
//!
//! 토큰 타임스탬프는 초 단위 정밀도를 가지므로, 발급 시각은 초 미만을 절삭해서 사용합니다.

use chrono::{DateTime, SubsecRound, Utc};

/// 초 미만이 절삭된 현재 UTC 시각
pub fn now_utc() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(0)
}

/// Unix 초를 UTC 시각으로 변환합니다. 범위를 벗어나면 `None`.
pub fn from_timestamp(seconds: i64) -> Option<DateTime<Utc>> {
    DateTime::from_timestamp(seconds, 0)
}
