//! # Resource Controller
//!
//! 리소스 하나에 대한 CRUD 처리를 담당하는 제네릭 컨트롤러입니다.
//! 리소스별 동작은 [`ResourceHooks`] 구현으로 확장하며, 컨트롤러 자체는
//! 모델/엔티티 해석, 훅 실행 순서, "결과 없음" 에러 정책만 책임집니다.
//!
//! ## 처리 흐름
//!
//! | 작업 | 순서 | 실패 |
//! |------|------|------|
//! | `get` | `find` | 엔티티 에러 전파 |
//! | `get_one` | `find_first` | 결과 없음 → 404 |
//! | `post` | 본문 확인 → `validate` → 차단 컬럼 제거 → `before_save` → `save` → `after_save` → `find_first` | 본문 없음 → 400, 재조회 실패 → 500 |
//! | `put` / `patch` | `post`와 같고 `id` 전달 | 본문 없음 → 400, 재조회 실패 → 500 |
//! | `delete` | 엔티티 해석 → `before_delete` → `delete` → `after_delete` | 엔티티 에러 전파 |
//!
//! 모든 단계는 순차적으로 실행되며, 어느 단계든 에러를 반환하면 남은 단계는 실행되지 않습니다.
//!
//! ## 리소스 정의 예제
//!
//! ```rust,ignore
//! pub struct NoteController;
//!
//! #[async_trait]
//! impl ResourceHooks for NoteController {
//!     async fn before_save(&self, mut payload: Payload, _id: Option<&str>) -> ApiResult<Payload> {
//!         payload.insert("updated_at".into(), json!(Utc::now().to_rfc3339()));
//!         Ok(payload)
//!     }
//! }
//! ```

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use log::debug;
use once_cell::sync::OnceCell;
use serde_json::Value;

use crate::core::errors::{ApiError, ApiResult, ErrorList};
use crate::core::registry::ResourceDefinition;
use crate::db::DataContext;
use crate::domain::entity::{Entity, ResultSet, SearchHelper};
use crate::domain::model::{strip_block_columns, Model, Payload};
use crate::services::resolver::ResourceResolver;
use crate::utils::string_utils::{last_path_segment, lowercase_first};

const CONTROLLER_SUFFIX: &str = "Controller";

/// 리소스 이름 형태
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameForm {
    Singular,
    Plural,
}

/// 컨트롤러에서 유도한 리소스 이름
///
/// 복수형은 단수형에 `s`를 붙인 값이며 불규칙 복수형은 지원하지 않습니다.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceNames {
    pub singular: String,
    pub plural: String,
}

impl ResourceNames {
    pub fn new(singular: impl Into<String>) -> Self {
        let singular = singular.into();
        let plural = format!("{}s", singular);
        Self { singular, plural }
    }

    /// 타입 이름에서 네임스페이스 접두사와 `Controller` 접미사를 제거해 이름을 유도합니다
    ///
    /// # Examples
    ///
    /// ```rust,ignore
    /// let names = ResourceNames::derive("resource_api::resources::users::UserController", "resource_api::resources::");
    /// assert_eq!(names.singular, "User");
    /// assert_eq!(names.plural, "Users");
    /// ```
    pub fn derive(type_name: &str, namespace: &str) -> Self {
        let stripped = type_name.strip_prefix(namespace).unwrap_or(type_name);
        let segment = last_path_segment(stripped);
        let singular = segment.strip_suffix(CONTROLLER_SUFFIX).unwrap_or(segment);

        Self::new(singular)
    }

    /// 훅이 명시한 이름이 있으면 그것을, 없으면 훅 타입 이름에서 유도한 이름을 사용합니다
    pub fn for_hooks(hooks: &dyn ResourceHooks, namespace: &str) -> Self {
        match hooks.resource_name() {
            Some(name) => Self::new(name),
            None => Self::derive(hooks.controller_type(), namespace),
        }
    }

    pub fn controller_name(&self, form: NameForm) -> &str {
        match form {
            NameForm::Singular => &self.singular,
            NameForm::Plural => &self.plural,
        }
    }

    /// 요청/응답 JSON 봉투 키 (`user`, `users`)
    pub fn envelope_key(&self, form: NameForm) -> String {
        lowercase_first(self.controller_name(form))
    }

    /// URL 경로에 사용하는 소문자 복수형 (`users`)
    pub fn route_key(&self) -> String {
        self.plural.to_lowercase()
    }
}

/// 리소스별 확장 지점
///
/// 모든 메서드는 기본 구현(통과)을 가지므로 필요한 것만 재정의합니다.
/// 훅은 요청을 처리하는 태스크 안에서 순서대로 실행되며, 에러를 반환하면
/// 남은 단계가 중단되고 에러가 그대로 전파됩니다.
#[async_trait]
pub trait ResourceHooks: Send + Sync {
    /// 이름 유도에 사용되는 구현 타입의 전체 경로
    fn controller_type(&self) -> &'static str {
        std::any::type_name::<Self>()
    }

    /// 타입 이름 대신 사용할 단수형 리소스 이름
    fn resource_name(&self) -> Option<&'static str> {
        None
    }

    /// 엔티티 생성 시 전달할 검색 설정
    fn search_helper(&self) -> SearchHelper {
        SearchHelper::new()
    }

    /// 엔티티가 캐시되기 직전에 한 번 호출됩니다
    fn configure_entity(&self, entity: Box<dyn Entity>) -> Box<dyn Entity> {
        entity
    }

    /// 저장 직전에 본문을 변환합니다. `id`는 갱신일 때만 `Some`입니다.
    async fn before_save(&self, payload: Payload, _id: Option<&str>) -> ApiResult<Payload> {
        Ok(payload)
    }

    async fn after_save(&self, _payload: &Payload, _id: &str) -> ApiResult<()> {
        Ok(())
    }

    async fn before_delete(&self, _id: &str) -> ApiResult<()> {
        Ok(())
    }

    async fn after_delete(&self, _id: &str) -> ApiResult<()> {
        Ok(())
    }
}

/// 라우트 핸들러의 닫힌 집합
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteHandler {
    Get,
    GetOne,
    Post,
    Put,
    Patch,
    Delete,
}

impl fmt::Display for RouteHandler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RouteHandler::Get => "get",
            RouteHandler::GetOne => "get_one",
            RouteHandler::Post => "post",
            RouteHandler::Put => "put",
            RouteHandler::Patch => "patch",
            RouteHandler::Delete => "delete",
        };
        f.write_str(name)
    }
}

/// 인자를 포함한 핸들러 호출
#[derive(Debug, Clone, PartialEq)]
pub enum RouteCall {
    Get,
    GetOne { id: String },
    Post { payload: Option<Payload> },
    Put { id: String, payload: Option<Payload> },
    Patch { id: String, payload: Option<Payload> },
    Delete { id: String },
}

impl RouteCall {
    pub fn handler(&self) -> RouteHandler {
        match self {
            RouteCall::Get => RouteHandler::Get,
            RouteCall::GetOne { .. } => RouteHandler::GetOne,
            RouteCall::Post { .. } => RouteHandler::Post,
            RouteCall::Put { .. } => RouteHandler::Put,
            RouteCall::Patch { .. } => RouteHandler::Patch,
            RouteCall::Delete { .. } => RouteHandler::Delete,
        }
    }
}

/// 디스패치 결과
#[derive(Debug, Clone, PartialEq)]
pub enum Reply {
    Collection(ResultSet),
    Single(Value),
    Created(Value),
    NoContent,
}

/// 요청 하나를 처리하는 리소스 컨트롤러
///
/// 모델과 엔티티는 처음 사용할 때 한 번만 생성되어 컨트롤러 수명 동안 재사용됩니다.
pub struct ResourceController {
    names: ResourceNames,
    hooks: Arc<dyn ResourceHooks>,
    atomic: bool,
    resolver: ResourceResolver,
    context: Arc<DataContext>,
    model: OnceCell<Arc<dyn Model>>,
    entity: OnceCell<Box<dyn Entity>>,
}

impl ResourceController {
    pub fn new(definition: &ResourceDefinition, resolver: ResourceResolver, context: Arc<DataContext>) -> Self {
        Self::with_hooks(
            definition.names.clone(),
            definition.create_hooks(),
            definition.atomic,
            resolver,
            context,
        )
    }

    pub fn with_hooks(
        names: ResourceNames,
        hooks: Arc<dyn ResourceHooks>,
        atomic: bool,
        resolver: ResourceResolver,
        context: Arc<DataContext>,
    ) -> Self {
        Self {
            names,
            hooks,
            atomic,
            resolver,
            context,
            model: OnceCell::new(),
            entity: OnceCell::new(),
        }
    }

    pub fn names(&self) -> &ResourceNames {
        &self.names
    }

    pub fn controller_name(&self, form: NameForm) -> &str {
        self.names.controller_name(form)
    }

    pub fn is_atomic(&self) -> bool {
        self.atomic
    }

    pub fn context(&self) -> &Arc<DataContext> {
        &self.context
    }

    pub fn get_model(&self) -> ApiResult<&Arc<dyn Model>> {
        self.model
            .get_or_try_init(|| self.resolver.resolve_model(&self.names.singular, &self.context))
    }

    /// 엔티티를 생성하고 `configure_entity`를 한 번 적용한 뒤 캐시합니다
    pub fn get_entity(&self) -> ApiResult<&dyn Entity> {
        let entity = self.entity.get_or_try_init(|| -> ApiResult<Box<dyn Entity>> {
            let model = self.get_model()?.clone();
            let entity = self
                .resolver
                .resolve_entity(&self.names.singular, model, self.hooks.search_helper())?;
            Ok(self.hooks.configure_entity(entity))
        })?;

        Ok(entity.as_ref())
    }

    pub async fn get(&self) -> ApiResult<ResultSet> {
        self.get_entity()?.find().await
    }

    pub async fn get_one(&self, id: &str) -> ApiResult<ResultSet> {
        let result = self.get_entity()?.find_first(id).await?;

        if result.count_results() == 0 {
            return Err(ApiError::not_found(
                "Resource not available.",
                ErrorList::new()
                    .dev("The resource you requested is not available.")
                    .code("43758093745021"),
            ));
        }

        Ok(result)
    }

    pub async fn post(&self, payload: Option<Payload>) -> ApiResult<ResultSet> {
        let payload = match payload {
            Some(payload) if !payload.is_empty() => payload,
            _ => {
                return Err(ApiError::bad_request(
                    "There was an error adding new record.  Missing POST data.",
                    ErrorList::new()
                        .dev("Invalid data posted to the server")
                        .code("568136818916816555"),
                ));
            }
        };

        let entity = self.get_entity()?;
        let payload = self.prepare(payload, None).await?;

        let id = entity.save(&payload, None).await?;
        self.hooks.after_save(&payload, &id).await?;

        let result = entity.find_first(&id).await?;
        if result.count_results() == 0 {
            return Err(ApiError::integrity_failure(
                "There was an error retrieving the newly created record.",
                ErrorList::new()
                    .dev("The resource you requested is not available after it was just created")
                    .code("1238510381861"),
            ));
        }

        debug!("➕ {} 생성: {} (request {})", self.names.singular, id, self.context.request_id());
        Ok(result)
    }

    pub async fn put(&self, id: &str, payload: Option<Payload>) -> ApiResult<ResultSet> {
        let payload = match payload {
            Some(payload) if !payload.is_empty() => payload,
            _ => {
                return Err(ApiError::bad_request(
                    "There was an error updating an existing record.",
                    ErrorList::new()
                        .dev("Invalid data posted to the server")
                        .code("568136818916816"),
                ));
            }
        };

        let entity = self.get_entity()?;
        let payload = self.prepare(payload, Some(id)).await?;

        let id = entity.save(&payload, Some(id)).await?;
        self.hooks.after_save(&payload, &id).await?;

        let result = entity.find_first(&id).await?;
        if result.count_results() == 0 {
            return Err(ApiError::integrity_failure(
                "There was an error retrieving the just updated record.",
                ErrorList::new()
                    .dev("The resource you requested is not available after it was just updated")
                    .code("1238510381861"),
            ));
        }

        debug!("✏️ {} 수정: {} (request {})", self.names.singular, id, self.context.request_id());
        Ok(result)
    }

    /// `put`과 동일합니다
    pub async fn patch(&self, id: &str, payload: Option<Payload>) -> ApiResult<ResultSet> {
        self.put(id, payload).await
    }

    /// 엔티티를 먼저 해석하므로 설정 오류에서는 훅이 실행되지 않습니다
    pub async fn delete(&self, id: &str) -> ApiResult<()> {
        let entity = self.get_entity()?;

        self.hooks.before_delete(id).await?;
        entity.delete(id).await?;
        self.hooks.after_delete(id).await?;

        debug!("🗑️ {} 삭제: {} (request {})", self.names.singular, id, self.context.request_id());
        Ok(())
    }

    /// 호출을 해당 핸들러로 보냅니다
    pub async fn dispatch(&self, call: RouteCall) -> ApiResult<Reply> {
        debug!(
            "➡️ {}::{} (request {})",
            self.names.plural,
            call.handler(),
            self.context.request_id()
        );

        match call {
            RouteCall::Get => self.get().await.map(Reply::Collection),
            RouteCall::GetOne { id } => self.get_one(&id).await.map(|result| Reply::Single(first_record(result))),
            RouteCall::Post { payload } => self.post(payload).await.map(|result| Reply::Created(first_record(result))),
            RouteCall::Put { id, payload } => self
                .put(&id, payload)
                .await
                .map(|result| Reply::Single(first_record(result))),
            RouteCall::Patch { id, payload } => self
                .patch(&id, payload)
                .await
                .map(|result| Reply::Single(first_record(result))),
            RouteCall::Delete { id } => self.delete(&id).await.map(|_| Reply::NoContent),
        }
    }

    // 모델 검증 → 차단 컬럼 제거 → before_save
    async fn prepare(&self, payload: Payload, id: Option<&str>) -> ApiResult<Payload> {
        let model = self.get_model()?;
        model.validate(&payload)?;
        let payload = strip_block_columns(model.as_ref(), payload);

        self.hooks.before_save(payload, id).await
    }
}

fn first_record(result: ResultSet) -> Value {
    result.into_records().into_iter().next().unwrap_or_default()
}
