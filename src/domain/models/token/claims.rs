//! 토큰에 내장되는 클레임 모델
//!
//! 모든 토큰에 서명되어 들어가는 사용자 식별 정보와 요청 컨텍스트를 정의합니다.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// 와이어 클레임 집합 (문자열 키 → JSON 값)
///
/// 서명 대상 페이로드의 평탄한 표현입니다. 값은 `serde_json::Value`
/// 판별 공용체이며 필드별 강제 변환 규칙은 클레임 코덱이 담당합니다.
pub type WireClaims = Map<String, Value>;

/// 토큰 종류 (액세스 / 리프레시)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenKind {
    /// API 접근용 단기 토큰
    #[default]
    Access,
    /// 액세스 토큰 갱신용 장기 토큰
    Refresh,
}

impl TokenKind {
    /// 와이어 표현을 반환합니다.
    pub fn as_str(&self) -> &'static str {
        match self {
            TokenKind::Access => "access",
            TokenKind::Refresh => "refresh",
        }
    }
}

impl FromStr for TokenKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "access" => Ok(TokenKind::Access),
            "refresh" => Ok(TokenKind::Refresh),
            _ => Err(format!("Unknown token type: {}", s)),
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 토큰의 신원 페이로드
///
/// 발급 호출마다 호출자 입력으로부터 새로 구성되며, 디코딩 이후에는 변경되지 않습니다.
/// 타임스탬프(`expires_at`, `issued_at`, `not_before`)는 발급자가 채우며
/// 호출자가 설정한 값은 인코딩 시 무시됩니다.
///
/// ## 구성 예제
///
/// ```rust,ignore
/// let claims = Claims {
///     scopes: vec!["read".to_string(), "write".to_string()],
///     ..Claims::new("u1")
/// };
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Claims {
    /// 안정적인 주체 식별자 (필수)
    pub user_id: String,
    /// 토큰 종류. 디코딩된 클레임에서는 서명된 값이 들어옵니다.
    pub token_type: Option<TokenKind>,
    /// 클라이언트 식별자
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_id: Option<String>,
    /// 디바이스 식별자
    #[serde(skip_serializing_if = "Option::is_none")]
    pub device_id: Option<String>,
    /// 세션 식별자
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,
    /// 권한 스코프 (삽입 순서 유지, 중복 허용)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub scopes: Vec<String>,
    /// 코덱이 해석하지 않는 임의 메타데이터
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub metadata: Map<String, Value>,
    /// 발급자 (`iss`)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub issuer: Option<String>,
    /// 대상 (`aud`)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub audience: Option<String>,
    /// 주체 (`sub`)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    /// 만료 시각 (Unix 초)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<i64>,
    /// 발급 시각 (Unix 초)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub issued_at: Option<i64>,
    /// 유효 시작 시각 (Unix 초)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub not_before: Option<i64>,
    /// 보호 키 집합에 속하지 않는 호출자 정의 클레임
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub custom: Map<String, Value>,
}

impl Claims {
    /// 사용자 ID만 채운 클레임을 생성합니다.
    pub fn new(user_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            ..Default::default()
        }
    }

    /// 스코프 보유 여부
    pub fn has_scope(&self, scope: &str) -> bool {
        self.scopes.iter().any(|s| s == scope)
    }

    /// 문자열 메타데이터 조회. 없거나 타입이 다르면 빈 문자열.
    pub fn metadata_str(&self, key: &str) -> &str {
        self.metadata.get(key).and_then(Value::as_str).unwrap_or_default()
    }

    /// 불리언 메타데이터 조회. 없거나 타입이 다르면 `false`.
    pub fn metadata_bool(&self, key: &str) -> bool {
        self.metadata.get(key).and_then(Value::as_bool).unwrap_or(false)
    }

    /// 정수 메타데이터 조회. 실수 표현도 정수로 절삭합니다.
    pub fn metadata_i64(&self, key: &str) -> i64 {
        match self.metadata.get(key) {
            Some(Value::Number(n)) => n.as_i64().or_else(|| n.as_f64().map(|f| f as i64)).unwrap_or(0),
            _ => 0,
        }
    }

    /// 문자열 커스텀 클레임 조회
    pub fn custom_str(&self, key: &str) -> &str {
        self.custom.get(key).and_then(Value::as_str).unwrap_or_default()
    }

    /// 불리언 커스텀 클레임 조회
    pub fn custom_bool(&self, key: &str) -> bool {
        self.custom.get(key).and_then(Value::as_bool).unwrap_or(false)
    }

    /// 메타데이터 항목을 설정합니다.
    pub fn set_metadata(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.metadata.insert(key.into(), value.into());
    }

    /// 커스텀 클레임을 설정합니다.
    ///
    /// 보호 키와 충돌하는 키는 인코딩 시 거부됩니다.
    pub fn set_custom(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.custom.insert(key.into(), value.into());
    }

    /// 설정된 만료 시각. 0 이하는 미설정으로 취급합니다.
    pub fn expiry(&self) -> Option<i64> {
        self.expires_at.filter(|exp| *exp > 0)
    }

    /// 설정된 `nbf`. 0 이하는 미설정으로 취급합니다.
    pub fn activation(&self) -> Option<i64> {
        self.not_before.filter(|nbf| *nbf > 0)
    }

    /// 주어진 시각 기준 만료 여부. 만료 시각이 없으면 만료되지 않습니다.
    pub fn is_expired_at(&self, now: i64) -> bool {
        self.expiry().is_some_and(|exp| now > exp)
    }

    /// 아직 `nbf` 이전인지 확인합니다.
    pub fn is_before_activation(&self, now: i64) -> bool {
        self.activation().is_some_and(|nbf| now < nbf)
    }

    /// 주어진 시각이 `nbf`..=`exp` 구간 안에 있는지 확인합니다.
    pub fn is_valid_at(&self, now: i64) -> bool {
        !self.is_before_activation(now) && !self.is_expired_at(now)
    }

    /// 리프레시 토큰에서 디코딩된 클레임인지 확인
    pub fn is_refresh(&self) -> bool {
        self.token_type == Some(TokenKind::Refresh)
    }
}
