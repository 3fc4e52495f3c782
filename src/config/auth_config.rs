//! # Authentication Configuration Module
//!
//! JWT 토큰 서명 키, 발급자, 대상, 만료 시간 등 토큰 서비스 설정을 관리하는 모듈입니다.
//! 설정값은 서비스 생성 시점에 한 번 캡처되며, 이후에는 변경되지 않습니다.
//! 키를 교체하려면 새 설정으로 서비스 인스턴스를 새로 생성해야 합니다.
//!
//! ## 환경 변수
//!
//! ```bash
//! export JWT_SECRET="your-super-secret-jwt-key"
//! export JWT_EXPIRATION_HOURS="1"
//! export JWT_REFRESH_EXPIRATION_DAYS="7"
//! export JWT_ISSUER="auth-service"
//! export JWT_AUDIENCE="api"
//! export JWT_ALGORITHM="HS256"   # HS256, HS384, HS512
//! ```
//!
//! ## 사용 예제
//!
//! ```rust,ignore
//! use chrono::Duration;
//! use crate::config::JwtConfig;
//!
//! // 환경 변수에서 로딩
//! let config = JwtConfig::from_env();
//!
//! // 직접 구성
//! let config = JwtConfig::new("test-secret-key-123")
//!     .with_issuer("auth-service")
//!     .with_access_token_ttl(Duration::hours(1))
//!     .with_refresh_token_ttl(Duration::hours(24));
//! ```

use std::env;
use std::fmt;
use std::str::FromStr;

use chrono::Duration;
use jsonwebtoken::Algorithm;

/// 기본 액세스 토큰 만료 시간 (시간)
const DEFAULT_EXPIRATION_HOURS: i64 = 24;

/// 기본 리프레시 토큰 만료 시간 (일)
const DEFAULT_REFRESH_EXPIRATION_DAYS: i64 = 7;

/// 토큰 서명에 사용하는 HMAC 알고리즘
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SigningAlgorithm {
    /// HMAC-SHA256
    #[default]
    HS256,
    /// HMAC-SHA384
    HS384,
    /// HMAC-SHA512
    HS512,
}

impl SigningAlgorithm {
    /// 알고리즘 이름을 반환합니다.
    pub fn as_str(&self) -> &'static str {
        match self {
            SigningAlgorithm::HS256 => "HS256",
            SigningAlgorithm::HS384 => "HS384",
            SigningAlgorithm::HS512 => "HS512",
        }
    }
}

impl FromStr for SigningAlgorithm {
    type Err = String;

    /// 대소문자 무관하게 알고리즘 이름을 파싱합니다.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "HS256" => Ok(SigningAlgorithm::HS256),
            "HS384" => Ok(SigningAlgorithm::HS384),
            "HS512" => Ok(SigningAlgorithm::HS512),
            _ => Err(format!("Unsupported signing algorithm: {}", s)),
        }
    }
}

impl From<SigningAlgorithm> for Algorithm {
    fn from(value: SigningAlgorithm) -> Self {
        match value {
            SigningAlgorithm::HS256 => Algorithm::HS256,
            SigningAlgorithm::HS384 => Algorithm::HS384,
            SigningAlgorithm::HS512 => Algorithm::HS512,
        }
    }
}

/// JSON Web Token (JWT) 관련 설정을 담는 불변 구조체
///
/// 토큰 발급, 검증, 만료 시간 정책을 결정합니다.
///
/// ## JWT 보안 모범 사례
///
/// 1. **강력한 비밀키 사용**: 최소 256비트 (32바이트) 랜덤 키
/// 2. **적절한 만료 시간**: 액세스 토큰은 짧게, 리프레시 토큰은 길게
/// 3. **키 순환**: 새 설정으로 서비스를 재생성
///
/// ## 권장 설정값
///
/// - **개발**: 액세스 토큰 24시간, 리프레시 토큰 7일
/// - **프로덕션**: 액세스 토큰 15분, 리프레시 토큰 30일
#[derive(Clone)]
pub struct JwtConfig {
    /// HMAC 서명 비밀키
    pub secret: String,
    /// 서비스 전역 기본 발급자 (`iss`)
    pub issuer: Option<String>,
    /// 서비스 전역 기본 대상 (`aud`)
    pub audience: Option<String>,
    /// 액세스 토큰 유효 기간
    pub access_token_ttl: Duration,
    /// 리프레시 토큰 유효 기간
    pub refresh_token_ttl: Duration,
    /// 서명 알고리즘
    pub algorithm: SigningAlgorithm,
}

impl JwtConfig {
    /// 비밀키만으로 기본 설정을 생성합니다.
    ///
    /// 만료 시간은 액세스 24시간, 리프레시 7일이며 알고리즘은 HS256 입니다.
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            issuer: None,
            audience: None,
            access_token_ttl: Duration::hours(DEFAULT_EXPIRATION_HOURS),
            refresh_token_ttl: Duration::days(DEFAULT_REFRESH_EXPIRATION_DAYS),
            algorithm: SigningAlgorithm::default(),
        }
    }

    /// 기본 발급자를 설정합니다.
    pub fn with_issuer(mut self, issuer: impl Into<String>) -> Self {
        self.issuer = Some(issuer.into()).filter(|s: &String| !s.is_empty());
        self
    }

    /// 기본 대상을 설정합니다.
    pub fn with_audience(mut self, audience: impl Into<String>) -> Self {
        self.audience = Some(audience.into()).filter(|s: &String| !s.is_empty());
        self
    }

    /// 액세스 토큰 유효 기간을 설정합니다.
    ///
    /// 음수 기간은 이미 만료된 토큰을 발급합니다 (테스트 용도).
    pub fn with_access_token_ttl(mut self, ttl: Duration) -> Self {
        self.access_token_ttl = ttl;
        self
    }

    /// 리프레시 토큰 유효 기간을 설정합니다.
    pub fn with_refresh_token_ttl(mut self, ttl: Duration) -> Self {
        self.refresh_token_ttl = ttl;
        self
    }

    /// 서명 알고리즘을 설정합니다.
    pub fn with_algorithm(mut self, algorithm: SigningAlgorithm) -> Self {
        self.algorithm = algorithm;
        self
    }

    /// 환경 변수에서 설정을 로딩합니다.
    ///
    /// # 기본값
    ///
    /// - `JWT_SECRET`: "your-secret-key" (경고 로그 출력, 프로덕션 사용 금지)
    /// - `JWT_EXPIRATION_HOURS`: 24
    /// - `JWT_REFRESH_EXPIRATION_DAYS`: 7
    /// - `JWT_ISSUER`, `JWT_AUDIENCE`: 없음
    /// - `JWT_ALGORITHM`: HS256
    pub fn from_env() -> Self {
        let mut config = Self::new(Self::secret())
            .with_access_token_ttl(ttl_from_hours(Self::expiration_hours()))
            .with_refresh_token_ttl(ttl_from_days(Self::refresh_expiration_days()))
            .with_algorithm(Self::algorithm());

        config.issuer = optional_var("JWT_ISSUER");
        config.audience = optional_var("JWT_AUDIENCE");
        config
    }

    /// JWT 서명에 사용할 비밀키를 환경 변수에서 읽습니다.
    ///
    /// # 환경 변수 설정
    ///
    /// ```bash
    /// # 안전한 JWT 키 생성
    /// openssl rand -base64 32
    /// export JWT_SECRET="your-super-secret-256-bit-key-generated-securely"
    /// ```
    pub fn secret() -> String {
        env::var("JWT_SECRET")
            .unwrap_or_else(|_| {
                log::warn!("JWT_SECRET not set, using default (not secure for production!)");
                "your-secret-key".to_string()
            })
    }

    /// 액세스 토큰 만료 시간 (시간 단위)
    pub fn expiration_hours() -> i64 {
        env::var("JWT_EXPIRATION_HOURS")
            .unwrap_or_else(|_| DEFAULT_EXPIRATION_HOURS.to_string())
            .parse()
            .unwrap_or(DEFAULT_EXPIRATION_HOURS)
    }

    /// 리프레시 토큰 만료 시간 (일 단위)
    pub fn refresh_expiration_days() -> i64 {
        env::var("JWT_REFRESH_EXPIRATION_DAYS")
            .unwrap_or_else(|_| DEFAULT_REFRESH_EXPIRATION_DAYS.to_string())
            .parse()
            .unwrap_or(DEFAULT_REFRESH_EXPIRATION_DAYS)
    }

    /// 서명 알고리즘. 지원하지 않는 값이면 경고 후 HS256을 사용합니다.
    pub fn algorithm() -> SigningAlgorithm {
        match env::var("JWT_ALGORITHM") {
            Ok(value) => value.parse().unwrap_or_else(|e| {
                log::warn!("{}, falling back to HS256", e);
                SigningAlgorithm::HS256
            }),
            Err(_) => SigningAlgorithm::HS256,
        }
    }
}

/// 시간 단위 설정값을 기간으로 변환합니다. 범위를 벗어나면 기본값을 사용합니다.
fn ttl_from_hours(hours: i64) -> Duration {
    Duration::try_hours(hours).unwrap_or_else(|| {
        log::warn!("JWT_EXPIRATION_HOURS={} is out of range, using default", hours);
        Duration::hours(DEFAULT_EXPIRATION_HOURS)
    })
}

/// 일 단위 설정값을 기간으로 변환합니다. 범위를 벗어나면 기본값을 사용합니다.
fn ttl_from_days(days: i64) -> Duration {
    Duration::try_days(days).unwrap_or_else(|| {
        log::warn!("JWT_REFRESH_EXPIRATION_DAYS={} is out of range, using default", days);
        Duration::days(DEFAULT_REFRESH_EXPIRATION_DAYS)
    })
}

/// 비어 있지 않은 환경 변수 값만 반환합니다.
fn optional_var(key: &str) -> Option<String> {
    env::var(key).ok().filter(|value| !value.trim().is_empty())
}

impl fmt::Debug for JwtConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // 비밀키는 출력하지 않습니다
        f.debug_struct("JwtConfig")
            .field("secret", &"***")
            .field("issuer", &self.issuer)
            .field("audience", &self.audience)
            .field("access_token_ttl", &self.access_token_ttl)
            .field("refresh_token_ttl", &self.refresh_token_ttl)
            .field("algorithm", &self.algorithm)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_signing_algorithm_from_string() {
        assert_eq!("HS256".parse::<SigningAlgorithm>().unwrap(), SigningAlgorithm::HS256);
        assert_eq!("hs384".parse::<SigningAlgorithm>().unwrap(), SigningAlgorithm::HS384);
        assert_eq!("Hs512".parse::<SigningAlgorithm>().unwrap(), SigningAlgorithm::HS512);

        // 비대칭 알고리즘은 지원하지 않음
        assert!("RS256".parse::<SigningAlgorithm>().is_err());
        assert!("none".parse::<SigningAlgorithm>().is_err());
    }

    #[test]
    fn test_signing_algorithm_roundtrip() {
        for algorithm in [SigningAlgorithm::HS256, SigningAlgorithm::HS384, SigningAlgorithm::HS512] {
            assert_eq!(algorithm.as_str().parse::<SigningAlgorithm>().unwrap(), algorithm);
        }
        assert_eq!(Algorithm::from(SigningAlgorithm::HS512), Algorithm::HS512);
    }

    #[test]
    fn test_builder_defaults_and_overrides() {
        let config = JwtConfig::new("secret");
        assert_eq!(config.access_token_ttl, Duration::hours(24));
        assert_eq!(config.refresh_token_ttl, Duration::days(7));
        assert_eq!(config.algorithm, SigningAlgorithm::HS256);
        assert!(config.issuer.is_none());

        let config = config
            .with_issuer("test-issuer")
            .with_audience("")
            .with_access_token_ttl(Duration::hours(1));
        assert_eq!(config.issuer.as_deref(), Some("test-issuer"));
        assert!(config.audience.is_none());
        assert_eq!(config.access_token_ttl, Duration::hours(1));
    }

    #[test]
    fn test_debug_hides_secret() {
        let config = JwtConfig::new("super-secret-value");
        let debug = format!("{:?}", config);
        assert!(!debug.contains("super-secret-value"));
    }

    #[test]
    fn test_out_of_range_ttl_falls_back_to_default() {
        assert_eq!(ttl_from_hours(i64::MAX), Duration::hours(24));
        assert_eq!(ttl_from_days(i64::MAX), Duration::days(7));
        assert_eq!(ttl_from_hours(2), Duration::hours(2));
        assert_eq!(ttl_from_days(30), Duration::days(30));
    }

    #[test]
    fn test_env_defaults() {
        if env::var("JWT_EXPIRATION_HOURS").is_err() {
            assert_eq!(JwtConfig::expiration_hours(), 24);
        }

        if env::var("JWT_REFRESH_EXPIRATION_DAYS").is_err() {
            assert_eq!(JwtConfig::refresh_expiration_days(), 7);
        }

        if env::var("JWT_ALGORITHM").is_err() {
            assert_eq!(JwtConfig::algorithm(), SigningAlgorithm::HS256);
        }
    }
}
