//! # Resource Resolver
//!
//! 리소스 이름으로 모델과 엔티티를 생성합니다.
//!
//! ## 해석 규칙
//!
//! ```text
//! resolve_model("User")
//!   └─ <namespaces.models>User 조회 ─▶ 생성자(context)
//!      └─ 없음 ─▶ ApiError::Configuration
//!
//! resolve_entity("User", model, search)
//!   ├─ <namespaces.entities>UserEntity 등록됨 ─▶ 커스텀 생성자(model, search)
//!   └─ 등록 안 됨 ─▶ <namespaces.default_entity> 생성자(model, search)
//!      └─ 없음 ─▶ ApiError::Configuration
//! ```
//!
//! 설정 에러는 요청 단위 문제가 아니라 배포 결함이므로 재시도하지 않습니다.

use std::sync::Arc;

use log::{debug, error};

use crate::core::errors::{ApiError, ApiResult};
use crate::core::registry::ResourceRegistry;
use crate::db::DataContext;
use crate::domain::entity::{Entity, SearchHelper};
use crate::domain::model::Model;

#[derive(Clone)]
pub struct ResourceResolver {
    registry: Arc<ResourceRegistry>,
}

impl ResourceResolver {
    pub fn new(registry: Arc<ResourceRegistry>) -> Self {
        Self { registry }
    }

    /// 단수형 리소스 이름에 해당하는 모델을 생성합니다
    ///
    /// # Errors
    ///
    /// 모델이 등록되지 않았으면 `ApiError::Configuration`
    pub fn resolve_model(&self, singular: &str, context: &Arc<DataContext>) -> ApiResult<Arc<dyn Model>> {
        let name = self.registry.config().model_name(singular);

        let constructor = self.registry.model(&name).ok_or_else(|| {
            error!("❌ 모델 타입이 등록되지 않았습니다: {}", name);
            ApiError::Configuration(format!("모델 타입이 등록되지 않았습니다: {}", name))
        })?;

        debug!("🧩 모델 생성: {} (request {})", name, context.request_id());
        Ok(constructor(context.clone()))
    }

    /// 커스텀 엔티티가 있으면 그것을, 없으면 기본 엔티티를 생성합니다
    ///
    /// # Errors
    ///
    /// 커스텀 엔티티도 기본 엔티티도 등록되지 않았으면 `ApiError::Configuration`
    pub fn resolve_entity(
        &self,
        singular: &str,
        model: Arc<dyn Model>,
        search: SearchHelper,
    ) -> ApiResult<Box<dyn Entity>> {
        let config = self.registry.config();
        let custom_name = config.custom_entity_name(singular);

        let name = if self.registry.has_entity(&custom_name) {
            custom_name
        } else {
            config.namespaces.default_entity.clone()
        };

        let constructor = self.registry.entity(&name).ok_or_else(|| {
            error!("❌ 기본 엔티티 타입이 등록되지 않았습니다: {}", name);
            ApiError::Configuration(format!("기본 엔티티 타입이 등록되지 않았습니다: {}", name))
        })?;

        debug!("🧩 엔티티 생성: {} (request {})", name, model.context().request_id());
        Ok(constructor(model, search))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ResourceConfig;
    use crate::testing::{FakeModel, MemoryEntity};

    struct GadgetEntity {
        inner: MemoryEntity,
    }

    #[async_trait::async_trait]
    impl Entity for GadgetEntity {
        async fn find(&self) -> ApiResult<crate::domain::entity::ResultSet> {
            self.inner.find().await
        }

        async fn find_first(&self, id: &str) -> ApiResult<crate::domain::entity::ResultSet> {
            self.inner.find_first(id).await
        }

        async fn save(&self, payload: &crate::domain::model::Payload, id: Option<&str>) -> ApiResult<String> {
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

        fn as_any(&self) -> &dyn std::any::Any {
            self
        }
    }

    fn registry(with_custom: bool, with_default: bool) -> Arc<ResourceRegistry> {
        let mut registry = ResourceRegistry::new(ResourceConfig::default());
        registry.register_model("Gadget", |context| FakeModel::shared("gadgets", context));
        registry.register_model("Widget", |context| FakeModel::shared("widgets", context));
        if with_custom {
            registry.register_entity("GadgetEntity", |model, search| -> Box<dyn Entity> {
                Box::new(GadgetEntity {
                    inner: MemoryEntity::new(model, search),
                })
            });
        }
        if with_default {
            registry.register_entity("DocumentEntity", MemoryEntity::boxed);
        }
        Arc::new(registry)
    }

    #[test]
    fn test_model_is_built_with_request_context() {
        let resolver = ResourceResolver::new(registry(false, true));
        let context = DataContext::detached();

        let model = resolver.resolve_model("Gadget", &context).unwrap();

        assert_eq!(model.source(), "gadgets");
        assert_eq!(model.context().request_id(), context.request_id());
    }

    #[test]
    fn test_missing_model_is_configuration_failure() {
        let resolver = ResourceResolver::new(registry(false, true));

        let result = resolver.resolve_model("Ghost", &DataContext::detached());

        match result {
            Err(ApiError::Configuration(message)) => assert!(message.contains("models::Ghost")),
            _ => panic!("Expected Configuration error"),
        }
    }

    #[test]
    fn test_custom_entity_is_preferred() {
        let resolver = ResourceResolver::new(registry(true, true));
        let model = resolver.resolve_model("Gadget", &DataContext::detached()).unwrap();

        let entity = resolver.resolve_entity("Gadget", model, SearchHelper::new()).unwrap();

        assert!(entity.as_any().is::<GadgetEntity>());
    }

    #[test]
    fn test_default_entity_when_no_custom_entity() {
        let resolver = ResourceResolver::new(registry(true, true));
        let model = resolver.resolve_model("Widget", &DataContext::detached()).unwrap();
        let search = SearchHelper::new().limit(5);

        let entity = resolver.resolve_entity("Widget", model, search.clone()).unwrap();

        assert!(entity.as_any().is::<MemoryEntity>());
        assert_eq!(entity.search_helper(), &search);
        assert_eq!(entity.model().source(), "widgets");
    }

    #[test]
    fn test_missing_default_entity_is_configuration_failure() {
        let resolver = ResourceResolver::new(registry(false, false));
        let model = resolver.resolve_model("Widget", &DataContext::detached()).unwrap();

        let result = resolver.resolve_entity("Widget", model, SearchHelper::new());

        assert!(matches!(result, Err(ApiError::Configuration(_))));
    }
}
