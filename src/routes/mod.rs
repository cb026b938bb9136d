//! API 라우트 설정 모듈
//!
//! 모든 리소스는 `/api/v1/{resource}` 아래의 공통 엔드포인트로 제공됩니다.
//! 리소스별 라우트를 따로 등록하지 않고, 경로 세그먼트를 레지스트리에서 해석합니다.
//!
//! # Examples
//!
//! ```rust,ignore
//! use actix_web::{web, App};
//!
//! let app = App::new()
//!     .app_data(web::Data::new(state))
//!     .configure(configure_all_routes);
//! ```

use actix_web::{get, web, HttpResponse};
use chrono::Utc;
use serde_json::json;

use crate::handlers;
use crate::handlers::rest::AppState;

/// 모든 라우트를 설정합니다
///
/// # Arguments
///
/// * `cfg` - Actix-web 서비스 설정 객체
pub fn configure_all_routes(cfg: &mut web::ServiceConfig) {
    // Health check endpoint
    cfg.service(health_check);

    cfg.service(web::scope("/api/v1").configure(configure_resource_routes));
}

/// 리소스 공통 엔드포인트를 등록합니다
///
/// # Available Routes
///
/// - `GET /{resource}` - 목록 조회
/// - `GET /{resource}/{id}` - 단건 조회
/// - `POST /{resource}` - 생성
/// - `PUT /{resource}/{id}` - 수정
/// - `PATCH /{resource}/{id}` - 수정 (`PUT`과 동일)
/// - `DELETE /{resource}/{id}` - 삭제
///
/// # Examples
///
/// ```bash
/// curl -X POST http://localhost:8080/api/v1/notes \
///   -H "Content-Type: application/json" \
///   -d '{"note":{"title":"hello"}}'
///
/// curl http://localhost:8080/api/v1/notes
/// ```
pub fn configure_resource_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(handlers::rest::list_resources)
        .service(handlers::rest::get_resource)
        .service(handlers::rest::create_resource)
        .service(handlers::rest::replace_resource)
        .service(handlers::rest::update_resource)
        .service(handlers::rest::delete_resource);
}

/// 서비스 상태를 확인하는 헬스체크 엔드포인트
///
/// # Examples
///
/// ```bash
/// curl http://localhost:8080/health
/// ```
///
/// Response:
/// ```json
/// {
///   "status": "healthy",
///   "service": "resource_api",
///   "version": "0.1.0",
///   "timestamp": "2023-01-01T00:00:00Z",
///   "database": "connected",
///   "resources": ["notes", "users"]
/// }
/// ```
#[get("/health")]
async fn health_check(state: web::Data<AppState>) -> HttpResponse {
    HttpResponse::Ok().json(json!({
        "status": "healthy",
        "service": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": Utc::now().to_rfc3339(),
        "database": if state.database.is_some() { "connected" } else { "detached" },
        "resources": state.registry.route_keys(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ResourceConfig;
    use crate::core::registry::ResourceRegistry;
    use crate::testing::register_recording_controller;
    use actix_web::{test, App};
    use serde_json::Value;
    use std::sync::Arc;

    #[actix_web::test]
    async fn test_health_lists_registered_resources() {
        let mut registry = ResourceRegistry::new(ResourceConfig::default());
        register_recording_controller(&mut registry, "Gadget", false);
        let state = AppState::new(Arc::new(registry), None);

        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state))
                .configure(configure_all_routes),
        )
        .await;

        let request = test::TestRequest::get().uri("/health").to_request();
        let body: Value = test::call_and_read_body_json(&app, request).await;

        assert_eq!(body["status"], "healthy");
        assert_eq!(body["database"], "detached");
        assert_eq!(body["resources"], json!(["gadgets"]));
    }
}
