//! 토큰 검증자
//!
//! 토큰 문자열을 순차적인 게이트로 검사합니다. 첫 번째 실패에서 즉시 중단합니다.
//!
//! ```text
//! 1. 구조/서명    → InvalidToken / InvalidSignature
//! 2. 클레임 디코딩 → InvalidClaims
//! 3. 정책 (skip_validation 시 생략)
//!    a. 만료       → TokenExpired   (skip_expiration 시 생략)
//!    b. nbf        → InvalidToken
//!    c. 발급자     → InvalidToken
//!    d. 대상       → InvalidToken
//!    e. 스코프     → InvalidToken
//! ```

use std::collections::HashSet;

use jsonwebtoken::errors::{Error as JwtError, ErrorKind};
use jsonwebtoken::{decode, decode_header, Algorithm, DecodingKey, TokenData, Validation};

use crate::config::JwtConfig;
use crate::domain::models::token::options::apply_all;
use crate::domain::models::token::{Claims, ValidatedToken, ValidationConfig, ValidationOption, WireClaims};
use crate::errors::{TokenError, TokenResult};
use crate::services::auth::claims_codec::ClaimsCodec;
use crate::utils::time_utils::{from_timestamp, now_utc};

/// 서명 검증과 정책 게이트를 수행하는 검증자
#[derive(Clone)]
pub struct TokenVerifier {
    codec: ClaimsCodec,
    decoding_key: DecodingKey,
    validation: Validation,
    has_secret: bool,
}

impl TokenVerifier {
    pub fn new(config: &JwtConfig) -> Self {
        Self {
            codec: ClaimsCodec::new(config.issuer.clone(), config.audience.clone()),
            decoding_key: DecodingKey::from_secret(config.secret.as_bytes()),
            validation: signature_validation(config.algorithm.into()),
            has_secret: !config.secret.is_empty(),
        }
    }

    /// 토큰을 검증하고 디코딩된 클레임을 반환합니다.
    ///
    /// 서명 검증과 디코딩은 어떤 옵션으로도 생략되지 않습니다.
    ///
    /// # Examples
    ///
    /// ```rust,ignore
    /// match verifier.verify(token, vec![with_required_scopes(["read"])]) {
    ///     Ok(validated) => println!("User ID: {}", validated.user_id()),
    ///     Err(TokenError::TokenExpired) => { /* 리프레시 유도 */ }
    ///     Err(e) => { /* 재인증 */ }
    /// }
    /// ```
    pub fn verify(&self, token: &str, options: Vec<ValidationOption>) -> TokenResult<ValidatedToken> {
        let mut config = ValidationConfig::default();
        apply_all(&mut config, options, ValidationOption::apply)?;

        self.verify_with(token, &config).inspect_err(|e| {
            log::debug!("토큰 검증 실패: {}", e);
        })
    }

    fn verify_with(&self, token: &str, config: &ValidationConfig) -> TokenResult<ValidatedToken> {
        let token_data = self.decode_wire(token)?;
        let claims = self.codec.decode(&token_data.claims)?;

        validate_claims(&claims, config)?;

        let expires_at = claims.expiry().and_then(from_timestamp);
        Ok(ValidatedToken {
            header: token_data.header,
            claims,
            is_valid: true,
            expires_at,
        })
    }

    /// 구조와 서명을 검사하고 페이로드를 JSON 객체로 디코딩합니다.
    fn decode_wire(&self, token: &str) -> TokenResult<TokenData<WireClaims>> {
        if !is_well_formed(token) {
            return Err(TokenError::InvalidToken("malformed token".to_string()));
        }

        if !self.has_secret {
            log::error!("JWT 서명 키가 비어 있어 토큰을 검증할 수 없습니다");
            return Err(TokenError::InvalidSignature);
        }

        // 헤더의 JSON 오류가 페이로드 오류로 분류되지 않도록 먼저 확인
        decode_header(token).map_err(|_| TokenError::InvalidSignature)?;

        decode::<WireClaims>(token, &self.decoding_key, &self.validation).map_err(from_jwt_error)
    }
}

/// 서명과 알고리즘만 확인하는 `Validation`
///
/// 시간, 발급자, 대상 검사는 정책 게이트에서 수행합니다.
pub(crate) fn signature_validation(algorithm: Algorithm) -> Validation {
    let mut validation = Validation::new(algorithm);
    validation.validate_exp = false;
    validation.validate_nbf = false;
    validation.validate_aud = false;
    validation.required_spec_claims = HashSet::new();
    validation
}

/// 점으로 구분된 비어 있지 않은 세그먼트 세 개인지 확인
fn is_well_formed(token: &str) -> bool {
    let segments: Vec<&str> = token.split('.').collect();
    segments.len() == 3 && segments.iter().all(|segment| !segment.is_empty())
}

fn from_jwt_error(error: JwtError) -> TokenError {
    match error.kind() {
        ErrorKind::InvalidToken => TokenError::InvalidToken("malformed token".to_string()),
        ErrorKind::InvalidSignature | ErrorKind::InvalidAlgorithm | ErrorKind::Base64(_) => {
            TokenError::InvalidSignature
        }
        ErrorKind::Json(e) => TokenError::InvalidClaims(format!("payload is not a JSON object: {}", e)),
        ErrorKind::Utf8(e) => TokenError::InvalidClaims(format!("payload is not UTF-8: {}", e)),
        _ => TokenError::InvalidSignature,
    }
}

/// 현재 시각 기준으로 정책 게이트를 적용합니다.
pub fn validate_claims(claims: &Claims, config: &ValidationConfig) -> TokenResult<()> {
    validate_claims_at(claims, config, now_utc().timestamp())
}

/// 주어진 시각(Unix 초) 기준으로 정책 게이트를 적용합니다.
pub fn validate_claims_at(claims: &Claims, config: &ValidationConfig, now: i64) -> TokenResult<()> {
    if config.skip_validation {
        return Ok(());
    }

    if !config.skip_expiration && claims.is_expired_at(now) {
        return Err(TokenError::TokenExpired);
    }

    if claims.is_before_activation(now) {
        return Err(TokenError::InvalidToken("token not yet valid".to_string()));
    }

    if let Some(required) = &config.required_issuer {
        if claims.issuer.as_ref() != Some(required) {
            return Err(TokenError::InvalidToken("invalid issuer".to_string()));
        }
    }

    if let Some(required) = &config.required_audience {
        if claims.audience.as_ref() != Some(required) {
            return Err(TokenError::InvalidToken("invalid audience".to_string()));
        }
    }

    if !config.required_scopes.is_empty() && !has_required_scopes(&claims.scopes, &config.required_scopes) {
        return Err(TokenError::InvalidToken("insufficient scopes".to_string()));
    }

    Ok(())
}

fn has_required_scopes(scopes: &[String], required: &[String]) -> bool {
    let granted: HashSet<&str> = scopes.iter().map(String::as_str).collect();
    required.iter().all(|scope| granted.contains(scope.as_str()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SigningAlgorithm;
    use crate::domain::models::token::{
        skip_expiration, skip_validation, with_audience, with_expires_at, with_required_audience,
        with_required_issuer, with_required_scopes,
    };
    use crate::services::auth::token_issuer::TokenIssuer;
    use chrono::Duration;

    fn config() -> JwtConfig {
        JwtConfig::new("test-secret-key-123")
            .with_issuer("test-issuer")
            .with_access_token_ttl(Duration::hours(1))
    }

    fn issue(claims: &Claims) -> String {
        TokenIssuer::new(&config()).issue_access(claims, vec![]).unwrap().token
    }

    fn scoped_claims() -> Claims {
        Claims {
            scopes: vec!["read".to_string(), "write".to_string()],
            ..Claims::new("u1")
        }
    }

    #[test]
    fn test_verify_valid_token() {
        let verifier = TokenVerifier::new(&config());
        let token = issue(&scoped_claims());

        let validated = verifier.verify(&token, vec![with_required_scopes(["read"])]).unwrap();

        assert!(validated.is_valid);
        assert_eq!(validated.user_id(), "u1");
        assert_eq!(validated.claims.scopes, vec!["read", "write"]);
        assert_eq!(validated.header.alg, Algorithm::HS256);
        assert_eq!(
            validated.expires_at.map(|t| t.timestamp()),
            validated.claims.expires_at
        );
    }

    #[test]
    fn test_malformed_tokens() {
        let verifier = TokenVerifier::new(&config());

        for token in ["", "abc", "a.b", "a..c", "a.b.c.d"] {
            assert!(
                matches!(verifier.verify(token, vec![]), Err(TokenError::InvalidToken(_))),
                "token {:?}",
                token
            );
        }
    }

    #[test]
    fn test_tampered_token_is_invalid_signature() {
        let verifier = TokenVerifier::new(&config());
        let token = issue(&scoped_claims());

        let positions = [2, token.len() / 2, token.len() - 5];
        for position in positions {
            let mut bytes = token.clone().into_bytes();
            if bytes[position] == b'.' {
                continue;
            }
            bytes[position] = if bytes[position] == b'A' { b'B' } else { b'A' };
            let tampered = String::from_utf8(bytes).unwrap();

            assert_eq!(
                verifier.verify(&tampered, vec![]).unwrap_err(),
                TokenError::InvalidSignature
            );
        }
    }

    #[test]
    fn test_wrong_secret_or_algorithm() {
        let token = issue(&Claims::new("u1"));

        let other_secret = TokenVerifier::new(&JwtConfig::new("another-secret"));
        assert_eq!(other_secret.verify(&token, vec![]).unwrap_err(), TokenError::InvalidSignature);

        let other_alg = TokenVerifier::new(&config().with_algorithm(SigningAlgorithm::HS384));
        assert_eq!(other_alg.verify(&token, vec![]).unwrap_err(), TokenError::InvalidSignature);

        let empty_secret = TokenVerifier::new(&JwtConfig::new(""));
        assert_eq!(empty_secret.verify(&token, vec![]).unwrap_err(), TokenError::InvalidSignature);
    }

    #[test]
    fn test_signed_payload_without_user_id_is_invalid_claims() {
        let header = jsonwebtoken::Header::new(Algorithm::HS256);
        let key = jsonwebtoken::EncodingKey::from_secret(b"test-secret-key-123");
        let token = jsonwebtoken::encode(&header, &serde_json::json!({"sub": "u1"}), &key).unwrap();

        let verifier = TokenVerifier::new(&config());
        assert!(matches!(verifier.verify(&token, vec![]), Err(TokenError::InvalidClaims(_))));
    }

    #[test]
    fn test_signed_non_object_payload_is_invalid_claims() {
        let key = jsonwebtoken::EncodingKey::from_secret(b"test-secret-key-123");
        let token = jsonwebtoken::encode(
            &jsonwebtoken::Header::new(Algorithm::HS256),
            &serde_json::json!(["u1"]),
            &key,
        )
        .unwrap();

        let verifier = TokenVerifier::new(&config());
        assert!(matches!(verifier.verify(&token, vec![]), Err(TokenError::InvalidClaims(_))));
    }

    #[test]
    fn test_zero_exp_and_nbf_are_unset() {
        let key = jsonwebtoken::EncodingKey::from_secret(b"test-secret-key-123");
        let token = jsonwebtoken::encode(
            &jsonwebtoken::Header::new(Algorithm::HS256),
            &serde_json::json!({"user_id": "u1", "exp": 0, "nbf": 0}),
            &key,
        )
        .unwrap();

        let validated = TokenVerifier::new(&config()).verify(&token, vec![]).unwrap();
        assert_eq!(validated.user_id(), "u1");
        assert!(validated.expires_at.is_none());

        let claims = Claims {
            expires_at: Some(-1),
            not_before: Some(-1),
            ..Claims::new("u1")
        };
        assert!(validate_claims(&claims, &ValidationConfig::default()).is_ok());
    }

    #[test]
    fn test_expiration_gate() {
        let verifier = TokenVerifier::new(&config());
        let issuer = TokenIssuer::new(&config());
        let expired = issuer
            .issue_access(&Claims::new("u1"), vec![with_expires_at(now_utc() - Duration::seconds(10))])
            .unwrap();

        assert_eq!(verifier.verify(&expired.token, vec![]).unwrap_err(), TokenError::TokenExpired);
        assert!(verifier.verify(&expired.token, vec![skip_expiration()]).is_ok());
        assert!(verifier.verify(&expired.token, vec![skip_validation()]).is_ok());
    }

    #[test]
    fn test_expires_exactly_after_ttl() {
        let verifier = TokenVerifier::new(&config());
        let token = issue(&Claims::new("u1"));
        let claims = verifier.verify(&token, vec![]).unwrap().claims;
        let issued_at = claims.issued_at.unwrap();
        let policy = ValidationConfig::default();

        assert!(validate_claims_at(&claims, &policy, issued_at + 3600).is_ok());
        assert_eq!(
            validate_claims_at(&claims, &policy, issued_at + 3601).unwrap_err(),
            TokenError::TokenExpired
        );

        let skip = ValidationConfig { skip_expiration: true, ..Default::default() };
        assert!(validate_claims_at(&claims, &skip, issued_at + 3601).is_ok());
    }

    #[test]
    fn test_not_before_gate() {
        let claims = Claims {
            not_before: Some(1_000),
            expires_at: Some(5_000),
            ..Claims::new("u1")
        };
        let policy = ValidationConfig::default();

        assert!(matches!(validate_claims_at(&claims, &policy, 999), Err(TokenError::InvalidToken(_))));
        assert!(validate_claims_at(&claims, &policy, 1_000).is_ok());
    }

    #[test]
    fn test_issuer_and_audience_gates() {
        let verifier = TokenVerifier::new(&config());
        let token = TokenIssuer::new(&config())
            .issue_access(&Claims::new("u1"), vec![with_audience(["api"])])
            .unwrap()
            .token;

        assert!(verifier
            .verify(&token, vec![with_required_issuer("test-issuer"), with_required_audience("api")])
            .is_ok());
        assert!(matches!(
            verifier.verify(&token, vec![with_required_issuer("other")]),
            Err(TokenError::InvalidToken(_))
        ));
        assert!(matches!(
            verifier.verify(&token, vec![with_required_audience("other")]),
            Err(TokenError::InvalidToken(_))
        ));
    }

    #[test]
    fn test_scope_containment() {
        let verifier = TokenVerifier::new(&config());
        let token = issue(&scoped_claims());

        assert!(verifier.verify(&token, vec![with_required_scopes(["write", "read"])]).is_ok());
        assert!(matches!(
            verifier.verify(&token, vec![with_required_scopes(["read", "admin"])]),
            Err(TokenError::InvalidToken(_))
        ));

        let unscoped = issue(&Claims::new("u1"));
        assert!(matches!(
            verifier.verify(&unscoped, vec![with_required_scopes(["read"])]),
            Err(TokenError::InvalidToken(_))
        ));
    }

    #[test]
    fn test_gate_order_expiration_before_scopes() {
        let claims = Claims {
            expires_at: Some(100),
            ..Claims::new("u1")
        };
        let policy = ValidationConfig {
            required_scopes: vec!["admin".to_string()],
            required_issuer: Some("x".to_string()),
            ..Default::default()
        };

        assert_eq!(validate_claims_at(&claims, &policy, 200).unwrap_err(), TokenError::TokenExpired);
    }

    #[test]
    fn test_skip_validation_never_skips_signature() {
        let verifier = TokenVerifier::new(&config());
        let mut token = issue(&Claims::new("u1"));
        token.push('x');

        assert_eq!(
            verifier.verify(&token, vec![skip_validation()]).unwrap_err(),
            TokenError::InvalidSignature
        );
    }
}
