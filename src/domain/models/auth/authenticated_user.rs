use std::future::{ready, Ready};

use actix_web::{Error, FromRequest, HttpMessage, HttpRequest};
use serde::Serialize;

use crate::domain::models::token::Claims;

/// 검증된 토큰에서 추출된 사용자 정보
///
/// 인증 미들웨어가 요청 extensions에 넣어 두며, 핸들러에서 추출자로 받습니다.
#[derive(Debug, Clone, Serialize)]
pub struct AuthenticatedUser {
    /// 사용자 고유 ID
    pub user_id: String,

    /// 요청에 사용된 원본 토큰
    #[serde(skip)]
    pub token: String,

    /// 디코딩된 클레임
    pub claims: Claims,
}

impl AuthenticatedUser {
    pub fn new(token: impl Into<String>, claims: Claims) -> Self {
        Self {
            user_id: claims.user_id.clone(),
            token: token.into(),
            claims,
        }
    }

    /// 특정 스코프를 보유하고 있는지 확인
    pub fn has_scope(&self, scope: &str) -> bool {
        self.claims.has_scope(scope)
    }

    /// 여러 스코프 중 하나라도 보유하고 있는지 확인
    pub fn has_any_scope(&self, scopes: &[&str]) -> bool {
        scopes.iter().any(|scope| self.has_scope(scope))
    }

    pub fn session_id(&self) -> Option<&str> {
        self.claims.session_id.as_deref()
    }
}

/// ActixWeb FromRequest trait 구현
impl FromRequest for AuthenticatedUser {
    type Error = Error;
    type Future = Ready<actix_web::Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut actix_web::dev::Payload) -> Self::Future {
        match req.extensions().get::<AuthenticatedUser>() {
            Some(user) => ready(Ok(user.clone())),
            None => ready(Err(actix_web::error::ErrorUnauthorized(
                "인증되지 않은 요청입니다"
            ))),
        }
    }
}

/// 선택적 인증 사용자 추출자
#[derive(Debug, Clone)]
pub struct OptionalUser(pub Option<AuthenticatedUser>);

impl FromRequest for OptionalUser {
    type Error = Error;
    type Future = Ready<actix_web::Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut actix_web::dev::Payload) -> Self::Future {
        let user = req.extensions().get::<AuthenticatedUser>().cloned();
        ready(Ok(OptionalUser(user)))
    }
}
