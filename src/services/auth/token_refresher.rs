//! 토큰 갱신자
//!
//! 리프레시 토큰을 검증한 뒤 같은 신원을 가진 새 액세스 토큰을 발급합니다.
//! 액세스 토큰으로는 갱신할 수 없습니다.

use std::sync::Arc;

use crate::domain::models::token::{
    Claims, RefreshOption, SignedToken, TokenKind, TokenOption, ValidationOption,
};
use crate::errors::{TokenError, TokenResult};
use crate::services::auth::token_issuer::TokenIssuer;
use crate::services::auth::token_verifier::TokenVerifier;

/// 검증자와 발급자를 조합한 갱신자
#[derive(Clone)]
pub struct TokenRefresher {
    issuer: Arc<TokenIssuer>,
    verifier: Arc<TokenVerifier>,
}

impl TokenRefresher {
    pub fn new(issuer: Arc<TokenIssuer>, verifier: Arc<TokenVerifier>) -> Self {
        Self { issuer, verifier }
    }

    /// 기본 검증 정책(만료 검사만)으로 리프레시 토큰을 검증하고 새 액세스 토큰을 발급합니다.
    ///
    /// # Errors
    ///
    /// * `InvalidToken` - 리프레시 토큰이 아님
    /// * 그 외 검증/발급 에러는 그대로 전달
    pub fn refresh(&self, refresh_token: &str, options: Vec<RefreshOption>) -> TokenResult<SignedToken> {
        self.refresh_with_policy(refresh_token, vec![], options)
    }

    /// 검증 정책을 지정하여 갱신합니다.
    pub fn refresh_with_policy(
        &self,
        refresh_token: &str,
        validation: Vec<ValidationOption>,
        options: Vec<RefreshOption>,
    ) -> TokenResult<SignedToken> {
        let validated = self.verifier.verify(refresh_token, validation)?;

        if !validated.claims.is_refresh() {
            log::warn!("리프레시 토큰이 아닌 토큰으로 갱신 시도: 사용자 ID {}", validated.user_id());
            return Err(TokenError::InvalidToken("refresh token required".to_string()));
        }

        let claims = access_claims_from(validated.claims);
        let options = options.into_iter().map(TokenOption::from).collect();

        let token = self.issuer.issue_access(&claims, options)?;
        log::info!("액세스 토큰 갱신: 사용자 ID {}", claims.user_id);
        Ok(token)
    }
}

/// 리프레시 클레임의 신원 필드를 복사한 액세스 클레임
fn access_claims_from(refresh: Claims) -> Claims {
    Claims {
        user_id: refresh.user_id,
        token_type: Some(TokenKind::Access),
        client_id: refresh.client_id,
        device_id: refresh.device_id,
        session_id: refresh.session_id,
        scopes: refresh.scopes,
        metadata: refresh.metadata,
        issuer: refresh.issuer,
        audience: refresh.audience,
        subject: refresh.subject,
        custom: refresh.custom,
        ..Default::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::JwtConfig;
    use crate::domain::models::token::{with_refresh_expires_at, with_refresh_scope, with_required_issuer};
    use crate::utils::time_utils::now_utc;
    use chrono::Duration;

    fn components() -> (Arc<TokenIssuer>, TokenRefresher) {
        let config = JwtConfig::new("test-secret-key-123")
            .with_issuer("test-issuer")
            .with_access_token_ttl(Duration::hours(1))
            .with_refresh_token_ttl(Duration::hours(24));
        let issuer = Arc::new(TokenIssuer::new(&config));
        let verifier = Arc::new(TokenVerifier::new(&config));
        (issuer.clone(), TokenRefresher::new(issuer, verifier))
    }

    fn identity() -> Claims {
        let mut claims = Claims {
            client_id: Some("web".to_string()),
            device_id: Some("d1".to_string()),
            session_id: Some("s1".to_string()),
            scopes: vec!["read".to_string(), "write".to_string()],
            ..Claims::new("u1")
        };
        claims.set_metadata("role", "admin");
        claims.set_custom("tenant", "acme");
        claims
    }

    #[test]
    fn test_refresh_issues_access_token_with_same_identity() {
        let (issuer, refresher) = components();
        let refresh_token = issuer.issue_refresh(&identity(), vec![]).unwrap();

        let access = refresher.refresh(&refresh_token.token, vec![]).unwrap();
        assert!(access.is_access_token());
        assert_eq!(access.expires_in, 3600);

        let verifier = TokenVerifier::new(
            &JwtConfig::new("test-secret-key-123").with_issuer("test-issuer"),
        );
        let claims = verifier.verify(&access.token, vec![]).unwrap().claims;
        let original = identity();

        assert_eq!(claims.user_id, "u1");
        assert_eq!(claims.token_type, Some(TokenKind::Access));
        assert_eq!(claims.client_id, original.client_id);
        assert_eq!(claims.device_id, original.device_id);
        assert_eq!(claims.session_id, original.session_id);
        assert_eq!(claims.scopes, original.scopes);
        assert_eq!(claims.metadata, original.metadata);
        assert_eq!(claims.custom, original.custom);
        assert_eq!(claims.issuer.as_deref(), Some("test-issuer"));
    }

    #[test]
    fn test_access_token_cannot_be_refreshed() {
        let (issuer, refresher) = components();
        let access = issuer.issue_access(&identity(), vec![]).unwrap();

        assert!(matches!(
            refresher.refresh(&access.token, vec![]),
            Err(TokenError::InvalidToken(_))
        ));
    }

    #[test]
    fn test_expired_refresh_token() {
        let (issuer, refresher) = components();
        let expired = issuer
            .issue_refresh(
                &identity(),
                vec![with_refresh_expires_at(now_utc() - Duration::seconds(1))],
            )
            .unwrap();

        assert_eq!(refresher.refresh(&expired.token, vec![]).unwrap_err(), TokenError::TokenExpired);
    }

    #[test]
    fn test_refresh_options_are_applied() {
        let (issuer, refresher) = components();
        let refresh_token = issuer.issue_refresh(&identity(), vec![]).unwrap();

        let access = refresher
            .refresh(&refresh_token.token, vec![with_refresh_scope(["profile"])])
            .unwrap();
        assert_eq!(access.scope(), ["profile".to_string()]);
    }

    #[test]
    fn test_refresh_with_policy() {
        let (issuer, refresher) = components();
        let refresh_token = issuer.issue_refresh(&identity(), vec![]).unwrap();

        assert!(refresher
            .refresh_with_policy(&refresh_token.token, vec![with_required_issuer("test-issuer")], vec![])
            .is_ok());
        assert!(matches!(
            refresher.refresh_with_policy(&refresh_token.token, vec![with_required_issuer("other")], vec![]),
            Err(TokenError::InvalidToken(_))
        ));
    }
}
