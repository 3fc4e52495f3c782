//! 미들웨어 모듈
//!
//! ActixWeb 요청 처리 파이프라인에서 사용되는 인증 미들웨어를 제공합니다.
//!
//! # 인증 미들웨어 (AuthMiddleware)
//! - `Authorization: Bearer <token>` 헤더에서 토큰 추출 및 검증
//! - 사용자 정보를 request extension에 저장
//! - 선택적/강제 인증 모드와 스코프 요구사항 지원
//!
//! # 사용 방법
//!
//! ```rust,ignore
//! use actix_web::{web, App};
//! use crate::middlewares::AuthMiddleware;
//! use crate::services::auth::TokenService;
//!
//! let token_service = TokenService::instance();
//!
//! App::new()
//!     .service(
//!         web::scope("/api/protected")
//!             .wrap(AuthMiddleware::required_with_scope(token_service.clone(), "read"))
//!             .route("/me", web::get().to(me))
//!     )
//!     .service(
//!         web::scope("/api/public")
//!             .wrap(AuthMiddleware::optional(token_service))
//!             .route("/status", web::get().to(health_check))
//!     )
//! ```

pub mod auth_middleware;
mod auth_inner;

pub use auth_middleware::AuthMiddleware;
