//! # Notes 리소스
//!
//! 기본 엔티티(`DocumentEntity`)를 그대로 사용하는 리소스입니다.
//! 트랜잭션 없이 처리됩니다.

use std::any::Any;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use serde::Deserialize;
use serde_json::Value;
use validator::Validate;

use crate::core::errors::{ApiResult, ErrorList};
use crate::core::registry::{ControllerRegistration, ModelRegistration};
use crate::core::validation::{MessageBag, ValidationException};
use crate::db::DataContext;
use crate::domain::entity::SearchHelper;
use crate::domain::model::{Model, Payload};
use crate::handlers::controller::ResourceHooks;

#[derive(Debug, Deserialize, Validate)]
struct NoteInput {
    #[validate(length(min = 1, max = 200, message = "제목은 1-200자 사이여야 합니다"))]
    title: Option<String>,

    #[validate(length(max = 10000))]
    body: Option<String>,
}

pub struct NoteModel {
    context: Arc<DataContext>,
}

impl NoteModel {
    pub const NAME: &'static str = "Note";

    pub fn create(context: Arc<DataContext>) -> Arc<dyn Model> {
        Arc::new(Self { context })
    }
}

impl Model for NoteModel {
    fn source(&self) -> &str {
        "notes"
    }

    fn block_columns(&self) -> &[&'static str] {
        &["_id", "id"]
    }

    fn context(&self) -> &Arc<DataContext> {
        &self.context
    }

    fn validate(&self, payload: &Payload) -> ApiResult<()> {
        let input: NoteInput = serde_json::from_value(Value::Object(payload.clone())).map_err(|e| {
            let mut bag = MessageBag::new();
            bag.push(e.to_string());
            ValidationException::new("Invalid note", ErrorList::new(), Vec::new(), &bag)
        })?;

        input
            .validate()
            .map_err(|errors| ValidationException::from_validation_errors("Invalid note", &errors))?;
        Ok(())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

pub struct NoteController;

impl NoteController {
    pub fn create() -> Arc<dyn ResourceHooks> {
        Arc::new(Self)
    }
}

#[async_trait]
impl ResourceHooks for NoteController {
    fn search_helper(&self) -> SearchHelper {
        SearchHelper::new().sort("updated_at", -1)
    }

    async fn before_save(&self, mut payload: Payload, _id: Option<&str>) -> ApiResult<Payload> {
        payload.insert("updated_at".to_string(), Value::String(Utc::now().to_rfc3339()));
        Ok(payload)
    }
}

inventory::submit! {
    ModelRegistration { name: NoteModel::NAME, constructor: NoteModel::create }
}

inventory::submit! {
    ControllerRegistration { constructor: NoteController::create, atomic: false }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::errors::ApiError;
    use serde_json::json;

    #[test]
    fn test_empty_title_is_rejected() {
        let model = NoteModel::create(DataContext::detached());
        let payload = json!({ "title": "" }).as_object().cloned().unwrap();

        assert!(matches!(model.validate(&payload), Err(ApiError::Validation(_))));
    }

    #[actix_web::test]
    async fn test_updated_at_is_stamped() {
        let payload = json!({ "title": "hello" }).as_object().cloned().unwrap();

        let saved = NoteController.before_save(payload, None).await.unwrap();

        assert!(saved["updated_at"].is_string());
    }
}
