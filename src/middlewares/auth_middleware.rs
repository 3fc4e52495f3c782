//! JWT 인증 미들웨어
//!
//! ActixWeb 요청 파이프라인에서 Bearer 토큰을 검증하고 사용자 정보를 추출합니다.

use std::future::{ready, Ready};
use std::rc::Rc;
use std::sync::Arc;

use actix_web::{
    dev::{Service, ServiceRequest, ServiceResponse, Transform},
    Error, Result,
    body::EitherBody,
};
use crate::domain::auth::authentication_request::{AuthMode, RequiredScope};
use crate::middlewares::auth_inner::AuthMiddlewareService;
use crate::services::auth::TokenService;

/// JWT 인증 미들웨어
#[derive(Clone)]
pub struct AuthMiddleware {
    token_service: Arc<TokenService>,
    /// 인증 모드 (Required/Optional)
    mode: AuthMode,
    /// 접근에 필요한 스코프 (선택사항)
    required_scope: Option<RequiredScope>,
}

impl AuthMiddleware {
    /// 새로운 인증 미들웨어 생성
    pub fn new(token_service: Arc<TokenService>, mode: AuthMode) -> Self {
        Self {
            token_service,
            mode,
            required_scope: None,
        }
    }

    /// 스코프 요구사항이 있는 인증 미들웨어 생성
    pub fn new_with_scope(token_service: Arc<TokenService>, mode: AuthMode, required_scope: RequiredScope) -> Self {
        Self {
            token_service,
            mode,
            required_scope: Some(required_scope),
        }
    }

    /// 필수 인증 미들웨어 생성
    pub fn required(token_service: Arc<TokenService>) -> Self {
        Self::new(token_service, AuthMode::Required)
    }

    /// 선택적 인증 미들웨어 생성
    pub fn optional(token_service: Arc<TokenService>) -> Self {
        Self::new(token_service, AuthMode::Optional)
    }

    /// 특정 스코프 요구 인증 미들웨어 생성
    pub fn required_with_scope(token_service: Arc<TokenService>, scope: &str) -> Self {
        Self::new_with_scope(
            token_service,
            AuthMode::Required,
            RequiredScope::Single(scope.to_string())
        )
    }

    /// 모든 스코프 요구 인증 미들웨어 생성
    pub fn required_with_scopes(token_service: Arc<TokenService>, scopes: Vec<&str>) -> Self {
        let scope_strings: Vec<String> = scopes.into_iter().map(|s| s.to_string()).collect();
        Self::new_with_scope(
            token_service,
            AuthMode::Required,
            RequiredScope::All(scope_strings)
        )
    }
}

/// ActixWeb Transform trait 구현
impl<S, B> Transform<S, ServiceRequest> for AuthMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Transform = AuthMiddlewareService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AuthMiddlewareService {
            service: Rc::new(service),
            token_service: self.token_service.clone(),
            mode: self.mode,
            required_scope: self.required_scope.clone(),
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::JwtConfig;
    use crate::domain::auth::authenticated_user::{AuthenticatedUser, OptionalUser};
    use crate::domain::models::token::{with_expires_at, Claims};
    use crate::utils::time_utils::now_utc;
    use actix_web::{http::StatusCode, test, web, App, HttpResponse};
    use chrono::Duration;

    fn token_service() -> Arc<TokenService> {
        Arc::new(TokenService::new(JwtConfig::new("test-secret-key-123")))
    }

    fn access_token(service: &TokenService, scopes: &[&str]) -> String {
        let claims = Claims {
            scopes: scopes.iter().map(|s| s.to_string()).collect(),
            ..Claims::new("u1")
        };
        service.issue_access(&claims, vec![]).unwrap().auth_header()
    }

    async fn whoami(user: AuthenticatedUser) -> HttpResponse {
        HttpResponse::Ok().body(user.user_id)
    }

    async fn maybe_whoami(user: OptionalUser) -> HttpResponse {
        match user.0 {
            Some(user) => HttpResponse::Ok().body(user.user_id),
            None => HttpResponse::Ok().body("anonymous"),
        }
    }

    #[actix_web::test]
    async fn test_required_auth_accepts_valid_token() {
        let service = token_service();
        let header = access_token(&service, &["read"]);
        let app = test::init_service(
            App::new()
                .wrap(AuthMiddleware::required(service.clone()))
                .route("/me", web::get().to(whoami)),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/me")
            .insert_header(("Authorization", header))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(test::read_body(resp).await, "u1");
    }

    #[actix_web::test]
    async fn test_required_auth_rejects_missing_and_expired_tokens() {
        let service = token_service();
        let expired = service
            .issue_access(&Claims::new("u1"), vec![with_expires_at(now_utc() - Duration::seconds(5))])
            .unwrap()
            .auth_header();
        let app = test::init_service(
            App::new()
                .wrap(AuthMiddleware::required(service.clone()))
                .route("/me", web::get().to(whoami)),
        )
        .await;

        let req = test::TestRequest::get().uri("/me").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

        let req = test::TestRequest::get()
            .uri("/me")
            .insert_header(("Authorization", expired))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["error"], "token_expired");
    }

    #[actix_web::test]
    async fn test_required_scope_is_forbidden_when_missing() {
        let service = token_service();
        let app = test::init_service(
            App::new()
                .wrap(AuthMiddleware::required_with_scopes(service.clone(), vec!["read", "write"]))
                .route("/me", web::get().to(whoami)),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/me")
            .insert_header(("Authorization", access_token(&service, &["read"])))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::FORBIDDEN);

        let req = test::TestRequest::get()
            .uri("/me")
            .insert_header(("Authorization", access_token(&service, &["write", "read"])))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);
    }

    #[actix_web::test]
    async fn test_optional_auth() {
        let service = token_service();
        let app = test::init_service(
            App::new()
                .wrap(AuthMiddleware::optional(service.clone()))
                .route("/me", web::get().to(maybe_whoami)),
        )
        .await;

        let req = test::TestRequest::get().uri("/me").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(test::read_body(resp).await, "anonymous");

        let req = test::TestRequest::get()
            .uri("/me")
            .insert_header(("Authorization", "Bearer not.a.token"))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(test::read_body(resp).await, "anonymous");

        let req = test::TestRequest::get()
            .uri("/me")
            .insert_header(("Authorization", access_token(&service, &[])))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(test::read_body(resp).await, "u1");
    }
}
