//! 토큰 발급자
//!
//! 클레임과 토큰 종류별 설정을 서명하여 불투명한 토큰 문자열과 만료 정보를 만듭니다.
//! 현재 시각은 호출마다 한 번만 읽으며, 초 미만은 절삭됩니다.

use chrono::{DateTime, Duration, SubsecRound, Utc};
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};

use crate::config::JwtConfig;
use crate::domain::models::token::options::apply_all;
use crate::domain::models::token::{
    Claims, RefreshOption, SignedToken, TokenConfig, TokenKind, TokenOption, TokenPair,
    TokenPairConfig, TokenPairOption,
};
use crate::errors::{ErrorContext, TokenError, TokenResult};
use crate::services::auth::claims_codec::ClaimsCodec;
use crate::utils::time_utils::now_utc;

/// 액세스/리프레시 토큰 발급자
///
/// 생성 이후 상태를 변경하지 않으므로 여러 스레드에서 동시에 호출해도 안전합니다.
#[derive(Clone)]
pub struct TokenIssuer {
    codec: ClaimsCodec,
    encoding_key: EncodingKey,
    algorithm: Algorithm,
    has_secret: bool,
    access_token_ttl: Duration,
    refresh_token_ttl: Duration,
}

impl TokenIssuer {
    pub fn new(config: &JwtConfig) -> Self {
        Self {
            codec: ClaimsCodec::new(config.issuer.clone(), config.audience.clone()),
            encoding_key: EncodingKey::from_secret(config.secret.as_bytes()),
            algorithm: config.algorithm.into(),
            has_secret: !config.secret.is_empty(),
            access_token_ttl: config.access_token_ttl,
            refresh_token_ttl: config.refresh_token_ttl,
        }
    }

    /// 액세스 토큰 발급
    ///
    /// # Errors
    ///
    /// * `OptionError` - 옵션이 입력을 거부함
    /// * `InvalidClaims` - `user_id` 누락 또는 커스텀 키 충돌
    /// * `SigningError` - 서명 키/설정 오류
    ///
    /// # Examples
    ///
    /// ```rust,ignore
    /// let token = issuer.issue_access(&Claims::new("u1"), vec![with_scope(["read"])])?;
    /// println!("{}", token.auth_header());
    /// ```
    pub fn issue_access(&self, claims: &Claims, options: Vec<TokenOption>) -> TokenResult<SignedToken> {
        self.issue_at(claims, TokenKind::Access, now_utc(), options)
    }

    /// 리프레시 토큰 발급
    pub fn issue_refresh(&self, claims: &Claims, options: Vec<RefreshOption>) -> TokenResult<SignedToken> {
        let options = options.into_iter().map(TokenOption::from).collect();
        self.issue_at(claims, TokenKind::Refresh, now_utc(), options)
    }

    /// 토큰 쌍 발급
    ///
    /// 액세스 토큰은 항상, 리프레시 토큰은 [`with_refresh_token`] 옵션이 있을 때만 발급합니다.
    /// 두 토큰은 같은 발급 시각을 공유합니다.
    ///
    /// [`with_refresh_token`]: crate::domain::models::token::with_refresh_token
    pub fn issue_pair(&self, claims: &Claims, options: Vec<TokenPairOption>) -> TokenResult<TokenPair> {
        let mut pair_config = TokenPairConfig::default();
        apply_all(&mut pair_config, options, TokenPairOption::apply)?;

        let now = now_utc();
        let access_token = self.issue_at(claims, TokenKind::Access, now, pair_config.access_token_options)?;

        let refresh_token = if pair_config.include_refresh {
            let options = pair_config
                .refresh_token_options
                .into_iter()
                .map(TokenOption::from)
                .collect();
            Some(self.issue_at(claims, TokenKind::Refresh, now, options)?)
        } else {
            None
        };

        Ok(TokenPair {
            access_token,
            refresh_token,
        })
    }

    fn ttl(&self, kind: TokenKind) -> Duration {
        match kind {
            TokenKind::Access => self.access_token_ttl,
            TokenKind::Refresh => self.refresh_token_ttl,
        }
    }

    fn issue_at(
        &self,
        claims: &Claims,
        kind: TokenKind,
        now: DateTime<Utc>,
        options: Vec<TokenOption>,
    ) -> TokenResult<SignedToken> {
        let expires_at = now.checked_add_signed(self.ttl(kind)).ok_or_else(|| {
            log::error!("{} 토큰 유효 기간이 표현 가능한 범위를 벗어났습니다", kind);
            TokenError::SigningError(format!("{} token ttl is out of range", kind))
        })?;

        let mut config = TokenConfig::new(kind, now, expires_at);
        apply_all(&mut config, options, TokenOption::apply)?;
        config.issued_at = config.issued_at.trunc_subsecs(0);
        config.expires_at = config.expires_at.trunc_subsecs(0);

        let wire = self.codec.encode(claims, &config)?;

        if !self.has_secret {
            log::error!("JWT 서명 키가 비어 있어 토큰을 발급할 수 없습니다");
            return Err(TokenError::SigningError("signing secret is empty".to_string()));
        }

        let token = encode(&Header::new(self.algorithm), &wire, &self.encoding_key)
            .with_context(|| format!("{} 토큰 서명 실패", kind))?;

        log::debug!("{} 토큰 발급: 사용자 ID {}", kind, claims.user_id);

        Ok(SignedToken::new(
            token,
            kind,
            config.issued_at,
            config.expires_at,
            config.scope,
        ))
    }
}
