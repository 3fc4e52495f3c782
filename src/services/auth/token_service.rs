//! JWT 토큰 관리 서비스 구현
//!
//! 발급자, 검증자, 갱신자를 하나의 설정으로 묶은 진입점입니다.
//! 액세스 토큰과 리프레시 토큰의 생성, 검증, 갱신을 담당합니다.

use std::sync::Arc;

use once_cell::sync::OnceCell;

use crate::config::JwtConfig;
use crate::domain::models::token::options::apply_all;
use crate::domain::models::token::{
    Claims, RefreshOption, SignedToken, TokenOption, TokenPair, TokenPairOption, ValidatedToken,
    ValidationConfig, ValidationOption, BEARER,
};
use crate::errors::{TokenError, TokenResult};
use crate::services::auth::token_issuer::TokenIssuer;
use crate::services::auth::token_refresher::TokenRefresher;
use crate::services::auth::token_verifier::{validate_claims, TokenVerifier};

/// 싱글톤 인스턴스 저장소
static TOKEN_SERVICE_INSTANCE: OnceCell<Arc<TokenService>> = OnceCell::new();

/// JWT 토큰 관리 서비스
///
/// 설정은 생성 시 고정되며, 키를 교체하려면 새 인스턴스를 생성합니다.
pub struct TokenService {
    config: JwtConfig,
    issuer: Arc<TokenIssuer>,
    verifier: Arc<TokenVerifier>,
    refresher: TokenRefresher,
}

impl TokenService {
    pub fn new(config: JwtConfig) -> Self {
        let issuer = Arc::new(TokenIssuer::new(&config));
        let verifier = Arc::new(TokenVerifier::new(&config));
        let refresher = TokenRefresher::new(issuer.clone(), verifier.clone());

        log::info!(
            "토큰 서비스 초기화: 알고리즘 {}, 액세스 {}초, 리프레시 {}초",
            config.algorithm.as_str(),
            config.access_token_ttl.num_seconds(),
            config.refresh_token_ttl.num_seconds()
        );

        Self {
            config,
            issuer,
            verifier,
            refresher,
        }
    }

    /// 환경 변수 설정으로 생성된 싱글톤 인스턴스를 가져옵니다.
    pub fn instance() -> Arc<Self> {
        TOKEN_SERVICE_INSTANCE
            .get_or_init(|| Arc::new(Self::new(JwtConfig::from_env())))
            .clone()
    }

    pub fn config(&self) -> &JwtConfig {
        &self.config
    }

    pub fn issuer(&self) -> &TokenIssuer {
        &self.issuer
    }

    pub fn verifier(&self) -> &TokenVerifier {
        &self.verifier
    }

    /// 사용자를 위한 JWT 액세스 토큰 생성
    ///
    /// # Examples
    ///
    /// ```rust,ignore
    /// let token_service = TokenService::instance();
    /// let access_token = token_service.issue_access(&Claims::new("u1"), vec![])?;
    /// ```
    pub fn issue_access(&self, claims: &Claims, options: Vec<TokenOption>) -> TokenResult<SignedToken> {
        self.issuer.issue_access(claims, options)
    }

    /// 사용자를 위한 리프레시 토큰 생성
    ///
    /// # Security
    ///
    /// 리프레시 토큰은 Secure HttpOnly Cookie에 저장하는 것을 권장합니다.
    pub fn issue_refresh(&self, claims: &Claims, options: Vec<RefreshOption>) -> TokenResult<SignedToken> {
        self.issuer.issue_refresh(claims, options)
    }

    /// 토큰 쌍 생성 (액세스 + 선택적 리프레시)
    ///
    /// ```rust,ignore
    /// let pair = token_service.issue_pair(&claims, vec![with_refresh_token()])?;
    /// println!("Expires in: {} seconds", pair.access_token.expires_in);
    /// ```
    pub fn issue_pair(&self, claims: &Claims, options: Vec<TokenPairOption>) -> TokenResult<TokenPair> {
        self.issuer.issue_pair(claims, options)
    }

    /// JWT 토큰 검증 및 클레임 추출
    pub fn verify(&self, token: &str, options: Vec<ValidationOption>) -> TokenResult<ValidatedToken> {
        self.verifier.verify(token, options)
    }

    /// 이미 디코딩된 클레임에 정책 게이트만 적용
    pub fn validate_claims(&self, claims: &Claims, options: Vec<ValidationOption>) -> TokenResult<()> {
        let mut config = ValidationConfig::default();
        apply_all(&mut config, options, ValidationOption::apply)?;
        validate_claims(claims, &config)
    }

    /// 리프레시 토큰으로 새 액세스 토큰 발급
    pub fn refresh(&self, refresh_token: &str, options: Vec<RefreshOption>) -> TokenResult<SignedToken> {
        self.refresher.refresh(refresh_token, options)
    }

    /// 검증 정책을 지정한 갱신
    pub fn refresh_with_policy(
        &self,
        refresh_token: &str,
        validation: Vec<ValidationOption>,
        options: Vec<RefreshOption>,
    ) -> TokenResult<SignedToken> {
        self.refresher.refresh_with_policy(refresh_token, validation, options)
    }

    /// 액세스 토큰으로부터 사용자 ID 추출
    pub fn extract_user_id(&self, token: &str) -> TokenResult<String> {
        Ok(self.verify(token, vec![])?.claims.user_id)
    }

    /// Bearer 토큰에서 실제 토큰 부분 추출
    ///
    /// HTTP Authorization 헤더의 "Bearer {token}" 형식에서 토큰 부분만을 추출합니다.
    ///
    /// ```rust,ignore
    /// let auth_header = "Bearer eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9...";
    /// let token = token_service.extract_bearer_token(auth_header)?;
    /// let validated = token_service.verify(token, vec![])?;
    /// ```
    pub fn extract_bearer_token<'a>(&self, auth_header: &'a str) -> TokenResult<&'a str> {
        auth_header
            .strip_prefix(BEARER)
            .and_then(|rest| rest.strip_prefix(' '))
            .filter(|token| !token.is_empty() && !token.contains(' '))
            .ok_or_else(|| TokenError::InvalidToken("유효하지 않은 인증 헤더 형식입니다".to_string()))
    }
}
