//! 호출 단위 토큰/검증 설정과 조합 가능한 옵션
//!
//! 옵션은 설정 구조체를 변경하는 클로저이며 순서대로 적용됩니다.
//! 하나라도 에러를 반환하면 해당 호출은 즉시 그 에러로 중단됩니다.
//!
//! # Examples
//!
//! ```rust,ignore
//! use crate::domain::token::options::*;
//!
//! let token = service.issue_access(&claims, vec![
//!     with_audience(["billing"]),
//!     with_subject("custom-subject"),
//! ])?;
//!
//! let validated = service.verify(&token.token, vec![
//!     with_required_scopes(["read"]),
//!     with_required_issuer("auth-service"),
//! ])?;
//! ```

use chrono::{DateTime, Utc};

use super::claims::TokenKind;
use crate::errors::{TokenError, TokenResult};
use crate::utils::string_utils::{require_non_empty, validate_required_string};

/// 발급 호출 단위 설정
#[derive(Debug, Clone, PartialEq)]
pub struct TokenConfig {
    /// 발급할 토큰 종류
    pub kind: TokenKind,
    pub expires_at: DateTime<Utc>,
    pub issued_at: DateTime<Utc>,
    /// 호출 단위 대상 재정의 (비어 있으면 클레임/서비스 기본값 사용)
    pub audience: Vec<String>,
    /// 호출 단위 `scope` 부여
    pub scope: Vec<String>,
    /// 호출 단위 주체 재정의
    pub subject: Option<String>,
}

impl TokenConfig {
    pub fn new(kind: TokenKind, issued_at: DateTime<Utc>, expires_at: DateTime<Utc>) -> Self {
        Self {
            kind,
            expires_at,
            issued_at,
            audience: Vec::new(),
            scope: Vec::new(),
            subject: None,
        }
    }
}

/// 검증 호출 단위 정책
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValidationConfig {
    /// 만료 게이트 생략
    pub skip_expiration: bool,
    /// 정책 게이트 전체 생략 (서명 검증은 생략되지 않음)
    pub skip_validation: bool,
    pub required_scopes: Vec<String>,
    pub required_issuer: Option<String>,
    pub required_audience: Option<String>,
}

/// 토큰 쌍 발급 설정
#[derive(Default)]
pub struct TokenPairConfig {
    pub include_refresh: bool,
    pub access_token_options: Vec<TokenOption>,
    pub refresh_token_options: Vec<RefreshOption>,
}

type Mutator<C> = Box<dyn FnOnce(&mut C) -> TokenResult<()> + Send>;

/// 액세스 토큰 발급 옵션
pub struct TokenOption(Mutator<TokenConfig>);

/// 리프레시 토큰 발급 옵션 (갱신 시 액세스 토큰 옵션으로 변환됨)
pub struct RefreshOption(Mutator<TokenConfig>);

/// 토큰 쌍 발급 옵션
pub struct TokenPairOption(Mutator<TokenPairConfig>);

/// 검증 옵션
pub struct ValidationOption(Mutator<ValidationConfig>);

macro_rules! impl_option {
    ($name:ident, $config:ty) => {
        impl $name {
            /// 임의의 변경 클로저로 옵션을 생성합니다.
            pub fn new<F>(f: F) -> Self
            where
                F: FnOnce(&mut $config) -> TokenResult<()> + Send + 'static,
            {
                Self(Box::new(f))
            }

            pub(crate) fn apply(self, config: &mut $config) -> TokenResult<()> {
                (self.0)(config)
            }
        }
    };
}

impl_option!(TokenOption, TokenConfig);
impl_option!(RefreshOption, TokenConfig);
impl_option!(TokenPairOption, TokenPairConfig);
impl_option!(ValidationOption, ValidationConfig);

impl From<RefreshOption> for TokenOption {
    fn from(option: RefreshOption) -> Self {
        TokenOption(option.0)
    }
}

/// 옵션 목록을 순서대로 적용하고, 첫 에러에서 중단합니다.
pub(crate) fn apply_all<C, O>(config: &mut C, options: Vec<O>, apply: fn(O, &mut C) -> TokenResult<()>) -> TokenResult<()> {
    for option in options {
        apply(option, config)?;
    }
    Ok(())
}

fn non_empty_list<I, S>(field: &'static str, values: I) -> TokenResult<Vec<String>>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let values: Vec<String> = values.into_iter().map(Into::into).collect();
    if values.is_empty() {
        return Err(TokenError::option(field, "최소 한 개의 값이 필요합니다"));
    }
    values
        .into_iter()
        .map(|value| validate_required_string(&value, field))
        .collect()
}

// ---- 액세스 토큰 옵션 ----

/// 호출 단위 대상 (`aud`) 재정의
pub fn with_audience<I, S>(audience: I) -> TokenOption
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let audience = non_empty_list("audience", audience);
    TokenOption::new(move |config| {
        config.audience = audience?;
        Ok(())
    })
}

/// 호출 단위 `scope` 부여
pub fn with_scope<I, S>(scope: I) -> TokenOption
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let scope = non_empty_list("scope", scope);
    TokenOption::new(move |config| {
        config.scope = scope?;
        Ok(())
    })
}

/// 호출 단위 주체 (`sub`) 재정의
pub fn with_subject(subject: impl Into<String>) -> TokenOption {
    let subject = subject.into();
    TokenOption::new(move |config| {
        config.subject = Some(validate_required_string(&subject, "subject")?);
        Ok(())
    })
}

/// 만료 시각 재정의
pub fn with_expires_at(expires_at: DateTime<Utc>) -> TokenOption {
    TokenOption::new(move |config| {
        config.expires_at = expires_at;
        Ok(())
    })
}

/// 발급 시각 재정의
pub fn with_issued_at(issued_at: DateTime<Utc>) -> TokenOption {
    TokenOption::new(move |config| {
        config.issued_at = issued_at;
        Ok(())
    })
}

// ---- 리프레시 토큰 옵션 ----

pub fn with_refresh_audience<I, S>(audience: I) -> RefreshOption
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    RefreshOption(with_audience(audience).0)
}

pub fn with_refresh_scope<I, S>(scope: I) -> RefreshOption
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    RefreshOption(with_scope(scope).0)
}

pub fn with_refresh_subject(subject: impl Into<String>) -> RefreshOption {
    RefreshOption(with_subject(subject).0)
}

pub fn with_refresh_expires_at(expires_at: DateTime<Utc>) -> RefreshOption {
    RefreshOption(with_expires_at(expires_at).0)
}

// ---- 토큰 쌍 옵션 ----

/// 리프레시 토큰도 함께 발급
pub fn with_refresh_token() -> TokenPairOption {
    TokenPairOption::new(|config| {
        config.include_refresh = true;
        Ok(())
    })
}

/// 쌍 발급 시 액세스 토큰에 적용할 옵션
pub fn with_access_token_options(options: Vec<TokenOption>) -> TokenPairOption {
    TokenPairOption::new(move |config| {
        config.access_token_options = options;
        Ok(())
    })
}

/// 쌍 발급 시 리프레시 토큰에 적용할 옵션
pub fn with_refresh_token_options(options: Vec<RefreshOption>) -> TokenPairOption {
    TokenPairOption::new(move |config| {
        config.refresh_token_options = options;
        Ok(())
    })
}

// ---- 검증 옵션 ----

/// 만료 게이트를 생략합니다.
pub fn skip_expiration() -> ValidationOption {
    ValidationOption::new(|config| {
        config.skip_expiration = true;
        Ok(())
    })
}

/// 정책 게이트 전체를 생략합니다. 서명 검증과 디코딩은 항상 수행됩니다.
pub fn skip_validation() -> ValidationOption {
    ValidationOption::new(|config| {
        config.skip_validation = true;
        Ok(())
    })
}

/// 토큰 스코프가 모두 포함해야 하는 스코프 목록
pub fn with_required_scopes<I, S>(scopes: I) -> ValidationOption
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let scopes = non_empty_list("required_scopes", scopes);
    ValidationOption::new(move |config| {
        config.required_scopes = scopes?;
        Ok(())
    })
}

pub fn with_required_issuer(issuer: impl Into<String>) -> ValidationOption {
    let issuer = issuer.into();
    ValidationOption::new(move |config| {
        config.required_issuer = Some(require_non_empty(issuer, "required_issuer")?);
        Ok(())
    })
}

pub fn with_required_audience(audience: impl Into<String>) -> ValidationOption {
    let audience = audience.into();
    ValidationOption::new(move |config| {
        config.required_audience = Some(require_non_empty(audience, "required_audience")?);
        Ok(())
    })
}
