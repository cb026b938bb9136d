//! # REST Resource HTTP Handlers
//!
//! 등록된 모든 리소스에 공통으로 적용되는 HTTP 엔드포인트입니다.
//! 경로의 첫 번째 세그먼트(`{resource}`)를 레지스트리의 라우트 키로 해석하여
//! 해당 리소스의 컨트롤러로 요청을 보냅니다.
//!
//! ## 엔드포인트
//!
//! | 메서드 | 경로 | 핸들러 | 성공 상태 코드 |
//! |--------|------|--------|----------------|
//! | `GET` | `/{resource}` | `get` | 200 OK |
//! | `GET` | `/{resource}/{id}` | `get_one` | 200 OK |
//! | `POST` | `/{resource}` | `post` | 201 Created |
//! | `PUT` | `/{resource}/{id}` | `put` | 200 OK |
//! | `PATCH` | `/{resource}/{id}` | `patch` | 200 OK |
//! | `DELETE` | `/{resource}/{id}` | `delete` | 204 No Content |
//!
//! ## 요청 처리 흐름
//!
//! ```text
//! HTTP 요청
//!   │
//!   ├─ 라우트 키 → ResourceDefinition (없으면 404)
//!   ├─ 요청별 DataContext / ResourceController 생성
//!   ├─ atomic 리소스 → TransactionCoordinator::dispatch
//!   │  일반 리소스   → ResourceController::dispatch
//!   └─ Reply → JSON 봉투 응답
//! ```
//!
//! ## 사용 예제
//!
//! ```bash
//! curl -X POST http://localhost:8080/api/v1/users \
//!   -H "Content-Type: application/json" \
//!   -d '{"user": {"email": "user@example.com", "username": "newuser"}}'
//!
//! curl http://localhost:8080/api/v1/users/665f1c2e8b3a4d0012345678
//! ```

use std::sync::Arc;

use actix_web::{delete, get, patch, post, put, web, HttpResponse};

use crate::core::errors::{ApiError, ApiResult, ErrorList};
use crate::core::registry::ResourceRegistry;
use crate::db::{DataContext, Database, MongoTransaction, TransactionCoordinator};
use crate::domain::dto::{extract_payload, render};
use crate::domain::model::Payload;
use crate::handlers::controller::{NameForm, ResourceController, ResourceNames, RouteCall};
use crate::services::resolver::ResourceResolver;
use crate::utils::string_utils::validate_required_string;

/// 모든 워커가 공유하는 애플리케이션 상태
///
/// 레지스트리는 시작 시 한 번 구성된 뒤 읽기 전용으로 사용됩니다.
/// `database`가 `None`이면 요청마다 만드는 컨텍스트도 연결 없이 만들어집니다.
#[derive(Clone)]
pub struct AppState {
    pub registry: Arc<ResourceRegistry>,
    pub database: Option<Arc<Database>>,
}

impl AppState {
    pub fn new(registry: Arc<ResourceRegistry>, database: Option<Arc<Database>>) -> Self {
        Self { registry, database }
    }
}

/// 요청 하나를 해당 리소스의 컨트롤러로 실행하고 응답을 렌더링합니다
///
/// `build`는 리소스 이름을 받아 호출을 구성합니다. 본문 봉투 키가 리소스 이름에서
/// 결정되기 때문에 라우트 키를 해석한 뒤에 호출됩니다.
async fn execute<F>(state: &AppState, resource: &str, build: F) -> ApiResult<HttpResponse>
where
    F: FnOnce(&ResourceNames) -> ApiResult<RouteCall>,
{
    let definition = state.registry.controller(resource).ok_or_else(|| {
        ApiError::not_found(
            "Resource not available.",
            ErrorList::new()
                .dev(format!("No resource is registered at /{}", resource))
                .code("43758093745021"),
        )
    })?;

    let call = build(&definition.names)?;

    let context = DataContext::new(state.database.clone());
    let controller = ResourceController::new(
        &definition,
        ResourceResolver::new(state.registry.clone()),
        context.clone(),
    );

    let reply = if controller.is_atomic() {
        let mut coordinator = TransactionCoordinator::new(MongoTransaction::new(context));
        coordinator.dispatch(&controller, call).await?
    } else {
        controller.dispatch(call).await?
    };

    Ok(render(reply, controller.names()))
}

fn payload_of(body: &[u8], names: &ResourceNames) -> Option<Payload> {
    extract_payload(body, &names.envelope_key(NameForm::Singular))
}

/// 리소스 목록 조회
#[get("/{resource}")]
pub async fn list_resources(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let resource = path.into_inner();

    execute(&state, &resource, |_| Ok(RouteCall::Get)).await
}

/// 기본 키로 레코드 하나 조회
#[get("/{resource}/{id}")]
pub async fn get_resource(
    state: web::Data<AppState>,
    path: web::Path<(String, String)>,
) -> Result<HttpResponse, ApiError> {
    let (resource, id) = path.into_inner();

    execute(&state, &resource, |_| {
        Ok(RouteCall::GetOne {
            id: validate_required_string(&id, "id")?,
        })
    })
    .await
}

/// 새 레코드 생성
///
/// 본문은 `{"user": {...}}` 봉투 형태와 `{...}` 형태를 모두 받습니다.
#[post("/{resource}")]
pub async fn create_resource(
    state: web::Data<AppState>,
    path: web::Path<String>,
    body: web::Bytes,
) -> Result<HttpResponse, ApiError> {
    let resource = path.into_inner();

    execute(&state, &resource, |names| {
        Ok(RouteCall::Post {
            payload: payload_of(&body, names),
        })
    })
    .await
}

#[put("/{resource}/{id}")]
pub async fn replace_resource(
    state: web::Data<AppState>,
    path: web::Path<(String, String)>,
    body: web::Bytes,
) -> Result<HttpResponse, ApiError> {
    let (resource, id) = path.into_inner();

    execute(&state, &resource, |names| {
        Ok(RouteCall::Put {
            id: validate_required_string(&id, "id")?,
            payload: payload_of(&body, names),
        })
    })
    .await
}

#[patch("/{resource}/{id}")]
pub async fn update_resource(
    state: web::Data<AppState>,
    path: web::Path<(String, String)>,
    body: web::Bytes,
) -> Result<HttpResponse, ApiError> {
    let (resource, id) = path.into_inner();

    execute(&state, &resource, |names| {
        Ok(RouteCall::Patch {
            id: validate_required_string(&id, "id")?,
            payload: payload_of(&body, names),
        })
    })
    .await
}

#[delete("/{resource}/{id}")]
pub async fn delete_resource(
    state: web::Data<AppState>,
    path: web::Path<(String, String)>,
) -> Result<HttpResponse, ApiError> {
    let (resource, id) = path.into_inner();

    execute(&state, &resource, |_| {
        Ok(RouteCall::Delete {
            id: validate_required_string(&id, "id")?,
        })
    })
    .await
}
