//! 클레임 코덱
//!
//! [`Claims`]와 평탄한 와이어 클레임 집합([`WireClaims`]) 사이를 변환합니다.
//! 시스템이 관리하는 보호 키와 호출자가 넣는 커스텀 키를 분리합니다.
//!
//! ## 와이어 키 규칙
//!
//! | 키 | 인코딩 | 디코딩 |
//! |----|--------|--------|
//! | `user_id` | 항상 기록 | 비어 있지 않은 문자열 필수, 아니면 `InvalidClaims` |
//! | `token_type` | 항상 기록 | `"access"`/`"refresh"` 외에는 `None` |
//! | `exp`, `iat`, `nbf` | 항상 기록 (초) | 정수/실수 모두 허용, 초 단위로 절삭 |
//! | `client_id`, `device_id`, `session_id`, `sub`, `iss` | 비어 있지 않을 때 | 문자열이 아니면 `None` |
//! | `aud` | 단일 값은 문자열, 여러 값은 배열 | 문자열 또는 배열의 첫 원소 |
//! | `scopes`, `scope` | 비어 있지 않을 때 | 문자열 원소만 유지 |
//! | `metadata` | 비어 있지 않을 때 | 객체가 아니면 빈 맵 |
//!
//! 보호 키 이외의 모든 키는 디코딩 시 `custom`으로 모입니다.
//! 보호 키와 충돌하는 커스텀 키는 인코딩 단계에서 거부됩니다.

use serde_json::{Map, Value};

use crate::domain::models::token::{Claims, TokenConfig, TokenKind, WireClaims};
use crate::errors::{TokenError, TokenResult};
use crate::utils::string_utils::clean_optional_string;

/// 시스템이 관리하는 와이어 키 목록
pub const PROTECTED_KEYS: [&str; 14] = [
    "user_id",
    "token_type",
    "client_id",
    "device_id",
    "session_id",
    "scopes",
    "metadata",
    "iss",
    "aud",
    "sub",
    "exp",
    "iat",
    "nbf",
    "scope",
];

/// 보호 키인지 확인
pub fn is_protected_key(key: &str) -> bool {
    PROTECTED_KEYS.contains(&key)
}

/// 발급자 결정: 클레임 값 > 서비스 기본값
pub fn resolve_issuer(claims: &Claims, default_issuer: Option<&str>) -> Option<String> {
    non_empty(claims.issuer.as_deref()).or_else(|| non_empty(default_issuer))
}

/// 대상 결정: 호출 단위 재정의 > 클레임 값 > 서비스 기본값
pub fn resolve_audience(
    config: &TokenConfig,
    claims: &Claims,
    default_audience: Option<&str>,
) -> Vec<String> {
    if !config.audience.is_empty() {
        return config.audience.clone();
    }
    non_empty(claims.audience.as_deref())
        .or_else(|| non_empty(default_audience))
        .into_iter()
        .collect()
}

/// 주체 결정: 호출 단위 재정의 > 클레임 값 > `user_id`
pub fn resolve_subject(config: &TokenConfig, claims: &Claims) -> String {
    non_empty(config.subject.as_deref())
        .or_else(|| non_empty(claims.subject.as_deref()))
        .unwrap_or_else(|| claims.user_id.clone())
}

/// 스코프 부여는 호출 단위로만 결정됩니다.
pub fn resolve_scope(config: &TokenConfig) -> Vec<String> {
    config.scope.clone()
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value.filter(|v| !v.is_empty()).map(str::to_string)
}

/// 클레임 ↔ 와이어 클레임 변환기
///
/// 서비스 전역 기본 발급자/대상을 보관하며 생성 이후 변경되지 않습니다.
#[derive(Debug, Clone, Default)]
pub struct ClaimsCodec {
    default_issuer: Option<String>,
    default_audience: Option<String>,
}

impl ClaimsCodec {
    pub fn new(default_issuer: Option<String>, default_audience: Option<String>) -> Self {
        Self {
            default_issuer: clean_optional_string(default_issuer),
            default_audience: clean_optional_string(default_audience),
        }
    }

    /// 클레임과 발급 설정을 와이어 클레임 집합으로 변환합니다.
    ///
    /// # Errors
    ///
    /// * `InvalidClaims` - `user_id`가 비어 있거나 커스텀 키가 보호 키와 충돌
    pub fn encode(&self, claims: &Claims, config: &TokenConfig) -> TokenResult<WireClaims> {
        if claims.user_id.is_empty() {
            return Err(TokenError::InvalidClaims("user_id is required".to_string()));
        }
        if let Some(key) = claims.custom.keys().find(|key| is_protected_key(key)) {
            return Err(TokenError::InvalidClaims(format!(
                "custom claim '{}' collides with a protected key",
                key
            )));
        }

        let mut wire = WireClaims::new();
        wire.insert("user_id".into(), Value::from(claims.user_id.as_str()));
        wire.insert("token_type".into(), Value::from(config.kind.as_str()));
        wire.insert("exp".into(), Value::from(config.expires_at.timestamp()));
        wire.insert("iat".into(), Value::from(config.issued_at.timestamp()));
        wire.insert("nbf".into(), Value::from(config.issued_at.timestamp()));

        insert_str(&mut wire, "client_id", claims.client_id.as_deref());
        insert_str(&mut wire, "device_id", claims.device_id.as_deref());
        insert_str(&mut wire, "session_id", claims.session_id.as_deref());

        if !claims.scopes.is_empty() {
            wire.insert("scopes".into(), Value::from(claims.scopes.clone()));
        }
        if !claims.metadata.is_empty() {
            wire.insert("metadata".into(), Value::Object(claims.metadata.clone()));
        }

        let issuer = resolve_issuer(claims, self.default_issuer.as_deref());
        insert_str(&mut wire, "iss", issuer.as_deref());

        let mut audience = resolve_audience(config, claims, self.default_audience.as_deref());
        match audience.len() {
            0 => {}
            1 => {
                wire.insert("aud".into(), Value::from(audience.remove(0)));
            }
            _ => {
                wire.insert("aud".into(), Value::from(audience));
            }
        }

        wire.insert("sub".into(), Value::from(resolve_subject(config, claims)));

        let scope = resolve_scope(config);
        if !scope.is_empty() {
            wire.insert("scope".into(), Value::from(scope));
        }

        for (key, value) in &claims.custom {
            wire.insert(key.clone(), value.clone());
        }

        Ok(wire)
    }

    /// 와이어 클레임 집합을 클레임으로 변환합니다.
    ///
    /// `user_id` 외의 필드는 누락되거나 타입이 다르면 빈 값으로 대체됩니다.
    ///
    /// # Errors
    ///
    /// * `InvalidClaims` - `user_id`가 없거나 문자열이 아니거나 비어 있음
    pub fn decode(&self, wire: &WireClaims) -> TokenResult<Claims> {
        let user_id = match wire.get("user_id") {
            Some(Value::String(id)) if !id.is_empty() => id.clone(),
            Some(Value::String(_)) => {
                return Err(TokenError::InvalidClaims("user_id is empty".to_string()));
            }
            Some(_) => {
                return Err(TokenError::InvalidClaims("user_id must be a string".to_string()));
            }
            None => {
                return Err(TokenError::InvalidClaims("user_id is missing".to_string()));
            }
        };

        let token_type = get_str(wire, "token_type").and_then(|kind| kind.parse::<TokenKind>().ok());

        let custom: Map<String, Value> = wire
            .iter()
            .filter(|(key, _)| !is_protected_key(key))
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect();

        Ok(Claims {
            user_id,
            token_type,
            client_id: get_str(wire, "client_id"),
            device_id: get_str(wire, "device_id"),
            session_id: get_str(wire, "session_id"),
            scopes: get_string_list(wire, "scopes"),
            metadata: match wire.get("metadata") {
                Some(Value::Object(map)) => map.clone(),
                _ => Map::new(),
            },
            issuer: get_str(wire, "iss"),
            audience: get_audience(wire),
            subject: get_str(wire, "sub"),
            expires_at: get_timestamp(wire, "exp"),
            issued_at: get_timestamp(wire, "iat"),
            not_before: get_timestamp(wire, "nbf"),
            custom,
        })
    }

    /// 디코딩 없이 와이어 `scope` 목록을 읽습니다.
    pub fn granted_scope(wire: &WireClaims) -> Vec<String> {
        get_string_list(wire, "scope")
    }
}

fn insert_str(wire: &mut WireClaims, key: &str, value: Option<&str>) {
    if let Some(value) = value.filter(|v| !v.is_empty()) {
        wire.insert(key.to_string(), Value::from(value));
    }
}

fn get_str(wire: &WireClaims, key: &str) -> Option<String> {
    wire.get(key)
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

fn get_string_list(wire: &WireClaims, key: &str) -> Vec<String> {
    match wire.get(key) {
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(|item| item.as_str().map(str::to_string))
            .collect(),
        _ => Vec::new(),
    }
}

fn get_timestamp(wire: &WireClaims, key: &str) -> Option<i64> {
    match wire.get(key) {
        Some(Value::Number(n)) => n.as_i64().or_else(|| n.as_f64().map(|f| f as i64)),
        _ => None,
    }
}

fn get_audience(wire: &WireClaims) -> Option<String> {
    match wire.get("aud") {
        Some(Value::String(aud)) if !aud.is_empty() => Some(aud.clone()),
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(Value::as_str)
            .find(|aud| !aud.is_empty())
            .map(str::to_string),
        _ => None,
    }
}
