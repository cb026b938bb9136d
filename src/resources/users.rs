//! # Users 리소스
//!
//! 커스텀 엔티티를 가진 트랜잭션 리소스의 예시입니다.
//!
//! | 구성 요소 | 타입 | 비고 |
//! |-----------|------|------|
//! | 모델 | [`UserModel`] | `users` 컬렉션, `validator` 기반 형식 검증 |
//! | 엔티티 | [`UserEntity`] | 기본 엔티티를 감싸 `password_hash`를 응답에서 제거 |
//! | 컨트롤러 | [`UserController`] | 생성 시 email 필수, 타임스탬프 기록, atomic |

use std::any::Any;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use log::info;
use serde::Deserialize;
use serde_json::Value;
use validator::Validate;

use crate::core::errors::{ApiError, ApiResult, ErrorList};
use crate::core::registry::{ControllerRegistration, EntityRegistration, ModelRegistration};
use crate::core::validation::{FieldViolation, MessageBag, ValidationException};
use crate::db::DataContext;
use crate::domain::entity::{Entity, ResultSet, SearchHelper};
use crate::domain::model::{Model, Payload};
use crate::handlers::controller::ResourceHooks;
use crate::repositories::DocumentEntity;

const HIDDEN_FIELDS: &[&str] = &["password_hash"];

/// 사용자 입력 형식 검증
///
/// 부분 수정(`PATCH`)도 같은 검증을 거치므로 모든 필드는 선택입니다.
#[derive(Debug, Deserialize, Validate)]
struct UserInput {
    #[validate(email(message = "유효한 이메일 주소를 입력해주세요"))]
    email: Option<String>,

    #[validate(length(min = 3, max = 30, message = "사용자명은 3-30자 사이여야 합니다"))]
    username: Option<String>,

    #[validate(length(max = 50, message = "표시 이름은 50자 이하여야 합니다"))]
    display_name: Option<String>,
}

pub struct UserModel {
    context: Arc<DataContext>,
}

impl UserModel {
    pub const NAME: &'static str = "User";

    pub fn create(context: Arc<DataContext>) -> Arc<dyn Model> {
        Arc::new(Self { context })
    }
}

impl Model for UserModel {
    fn source(&self) -> &str {
        "users"
    }

    fn block_columns(&self) -> &[&'static str] {
        &["_id", "id", "password_hash", "created_at"]
    }

    fn context(&self) -> &Arc<DataContext> {
        &self.context
    }

    fn validate(&self, payload: &Payload) -> ApiResult<()> {
        let input: UserInput = serde_json::from_value(Value::Object(payload.clone())).map_err(|e| {
            let mut bag = MessageBag::new();
            bag.push(e.to_string());
            ValidationException::new("Invalid user", ErrorList::new().code("USR-400"), Vec::new(), &bag)
        })?;

        input
            .validate()
            .map_err(|errors| ValidationException::from_validation_errors("Invalid user", &errors))?;

        Ok(())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// 응답 레코드에서 민감한 필드를 제거하는 사용자 엔티티
pub struct UserEntity {
    inner: Box<dyn Entity>,
}

impl UserEntity {
    pub const NAME: &'static str = "UserEntity";

    pub fn create(model: Arc<dyn Model>, search: SearchHelper) -> Box<dyn Entity> {
        Box::new(Self::wrap(DocumentEntity::create(model, search)))
    }

    pub fn wrap(inner: Box<dyn Entity>) -> Self {
        Self { inner }
    }

    fn redact(results: ResultSet) -> ResultSet {
        ResultSet::new(
            results
                .into_records()
                .into_iter()
                .map(|mut record| {
                    if let Value::Object(fields) = &mut record {
                        for field in HIDDEN_FIELDS {
                            fields.remove(*field);
                        }
                    }
                    record
                })
                .collect(),
        )
    }
}

#[async_trait]
impl Entity for UserEntity {
    async fn find(&self) -> ApiResult<ResultSet> {
        self.inner.find().await.map(Self::redact)
    }

    async fn find_first(&self, id: &str) -> ApiResult<ResultSet> {
        self.inner.find_first(id).await.map(Self::redact)
    }

    async fn save(&self, payload: &Payload, id: Option<&str>) -> ApiResult<String> {
        self.inner.save(payload, id).await
    }

    async fn delete(&self, id: &str) -> ApiResult<()> {
        self.inner.delete(id).await
    }

    fn model(&self) -> &Arc<dyn Model> {
        self.inner.model()
    }

    fn search_helper(&self) -> &SearchHelper {
        self.inner.search_helper()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

pub struct UserController;

impl UserController {
    pub fn create() -> Arc<dyn ResourceHooks> {
        Arc::new(Self)
    }
}

#[async_trait]
impl ResourceHooks for UserController {
    fn search_helper(&self) -> SearchHelper {
        SearchHelper::new().sort("created_at", -1).limit(100)
    }

    async fn before_save(&self, mut payload: Payload, id: Option<&str>) -> ApiResult<Payload> {
        let now = Value::String(Utc::now().to_rfc3339());

        if id.is_none() {
            if !payload.contains_key("email") {
                let violations = vec![FieldViolation::new("email", "required", "email은(는) 필수입니다")];
                let mut bag = MessageBag::new();
                bag.extend_from_violations(&violations);

                return Err(ApiError::from(ValidationException::new(
                    "Invalid user",
                    ErrorList::new().code("USR-001"),
                    violations,
                    &bag,
                )));
            }
            payload.insert("created_at".to_string(), now.clone());
        }

        payload.insert("updated_at".to_string(), now);
        Ok(payload)
    }

    async fn after_save(&self, _payload: &Payload, id: &str) -> ApiResult<()> {
        info!("👤 사용자 저장 완료: {}", id);
        Ok(())
    }

    async fn after_delete(&self, id: &str) -> ApiResult<()> {
        info!("👤 사용자 삭제 완료: {}", id);
        Ok(())
    }
}

inventory::submit! {
    ModelRegistration { name: UserModel::NAME, constructor: UserModel::create }
}

inventory::submit! {
    EntityRegistration { name: UserEntity::NAME, constructor: UserEntity::create }
}

inventory::submit! {
    ControllerRegistration { constructor: UserController::create, atomic: true }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handlers::controller::ResourceNames;
    use crate::testing::MemoryEntity;
    use serde_json::json;

    fn payload(value: Value) -> Payload {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_controller_name_is_user() {
        let names = ResourceNames::for_hooks(&UserController, "resource_api::resources::");

        assert_eq!(names.singular, "User");
        assert_eq!(names.route_key(), "users");
    }

    #[test]
    fn test_invalid_email_is_rejected() {
        let model = UserModel::create(DataContext::detached());

        let error = model.validate(&payload(json!({ "email": "not-an-email" }))).unwrap_err();

        match error {
            ApiError::Validation(exception) => {
                assert_eq!(exception.validation_list()[0].field, "email");
                assert_eq!(exception.report().dev_message, "유효한 이메일 주소를 입력해주세요");
            }
            other => panic!("Expected Validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_wrong_field_type_is_validation_error() {
        let model = UserModel::create(DataContext::detached());

        let error = model.validate(&payload(json!({ "username": 42 }))).unwrap_err();

        assert!(matches!(error, ApiError::Validation(_)));
        assert_eq!(error.report().code.as_deref(), Some("USR-400"));
    }

    #[test]
    fn test_valid_partial_update_passes() {
        let model = UserModel::create(DataContext::detached());

        assert!(model.validate(&payload(json!({ "display_name": "Alice" }))).is_ok());
    }

    #[actix_web::test]
    async fn test_create_requires_email() {
        let error = UserController
            .before_save(payload(json!({ "username": "alice" })), None)
            .await
            .unwrap_err();

        assert_eq!(error.report().code.as_deref(), Some("USR-001"));
        assert_eq!(error.report().dev_message, "email은(는) 필수입니다");
    }

    #[actix_web::test]
    async fn test_timestamps_are_stamped() {
        let created = UserController
            .before_save(payload(json!({ "email": "a@b.io" })), None)
            .await
            .unwrap();
        assert!(created.contains_key("created_at"));
        assert!(created.contains_key("updated_at"));

        let updated = UserController
            .before_save(payload(json!({ "display_name": "A" })), Some("1"))
            .await
            .unwrap();
        assert!(!updated.contains_key("created_at"));
        assert!(updated.contains_key("updated_at"));
    }

    #[actix_web::test]
    async fn test_user_entity_hides_password_hash() {
        let model = UserModel::create(DataContext::detached());
        let entity = UserEntity::wrap(MemoryEntity::boxed(model, SearchHelper::new()));

        let id = entity
            .save(&payload(json!({ "email": "a@b.io", "password_hash": "$2b$12$secret" })), None)
            .await
            .unwrap();

        let one = entity.find_first(&id).await.unwrap();
        assert_eq!(one.first().unwrap()["email"], "a@b.io");
        assert!(one.first().unwrap().get("password_hash").is_none());

        let all = entity.find().await.unwrap();
        assert!(all.records().iter().all(|record| record.get("password_hash").is_none()));
    }
}
