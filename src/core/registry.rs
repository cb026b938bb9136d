//! # Resource Registry - 이름 기반 리소스 해석 시스템
//!
//! 모델, 엔티티, 컨트롤러의 생성자를 정규화된 이름으로 보관하는 레지스트리입니다.
//! 서버 시작 시 한 번 채워지고 이후에는 읽기 전용으로 공유됩니다.
//!
//! ## 이름 규칙
//!
//! | 구성 요소 | 등록 이름 | 레지스트리 키 |
//! |-----------|-----------|---------------|
//! | 모델 | `User` | `<namespaces.models>User` |
//! | 커스텀 엔티티 | `UserEntity` | `<namespaces.entities>UserEntity` |
//! | 기본 엔티티 | `DocumentEntity` | `<namespaces.entities>DocumentEntity` |
//! | 컨트롤러 | 훅 타입 이름에서 유도 | 소문자 복수형 (`users`) |
//!
//! ## 동작 원리
//!
//! ```text
//! 1. 컴파일 타임
//!    ├─ inventory::submit! → ModelRegistration / EntityRegistration / ControllerRegistration
//!    └─ inventory::collect! → 전역 목록에 수집
//!
//! 2. 서버 시작
//!    ├─ ResourceRegistry::from_inventory(config)
//!    ├─ 등록 이름 → 정규화된 이름으로 변환하여 맵 구성
//!    └─ Arc<ResourceRegistry>로 모든 워커에 공유
//!
//! 3. 요청 처리
//!    ├─ 라우트 키(`users`) → ResourceDefinition
//!    └─ 리졸버가 모델/엔티티 생성자를 이름으로 조회
//! ```
//!
//! ## 등록 예제
//!
//! ```rust,ignore
//! inventory::submit! {
//!     ModelRegistration { name: "User", constructor: UserModel::create }
//! }
//!
//! inventory::submit! {
//!     ControllerRegistration { constructor: UserController::create, atomic: true }
//! }
//! ```

use std::collections::HashMap;
use std::sync::Arc;

use log::{debug, warn};

use crate::config::ResourceConfig;
use crate::db::DataContext;
use crate::domain::entity::{Entity, SearchHelper};
use crate::domain::model::Model;
use crate::handlers::controller::{ResourceHooks, ResourceNames};
use crate::utils::display_terminal::{
    print_boxed_title, print_registry_summary, print_step_complete, print_step_start, print_sub_task,
};

/// 모델 생성자. 요청별 데이터 컨텍스트를 받아 모델을 만듭니다.
pub type ModelConstructor = Arc<dyn Fn(Arc<DataContext>) -> Arc<dyn Model> + Send + Sync>;

/// 엔티티 생성자. 모델과 검색 설정을 받아 엔티티를 만듭니다.
pub type EntityConstructor = Arc<dyn Fn(Arc<dyn Model>, SearchHelper) -> Box<dyn Entity> + Send + Sync>;

/// 컨트롤러 훅 생성자
pub type HooksConstructor = Arc<dyn Fn() -> Arc<dyn ResourceHooks> + Send + Sync>;

/// 모델 등록 정보
pub struct ModelRegistration {
    /// 네임스페이스를 제외한 모델 이름 (예: `User`)
    pub name: &'static str,
    pub constructor: fn(Arc<DataContext>) -> Arc<dyn Model>,
}

/// 엔티티 등록 정보
pub struct EntityRegistration {
    /// 네임스페이스를 제외한 엔티티 이름 (예: `UserEntity`, `DocumentEntity`)
    pub name: &'static str,
    pub constructor: fn(Arc<dyn Model>, SearchHelper) -> Box<dyn Entity>,
}

/// 컨트롤러 등록 정보
///
/// 리소스 이름은 생성된 훅의 타입 이름(또는 명시적 이름)에서 유도됩니다.
pub struct ControllerRegistration {
    pub constructor: fn() -> Arc<dyn ResourceHooks>,
    /// `true`이면 모든 요청이 트랜잭션 안에서 처리됩니다
    pub atomic: bool,
}

inventory::collect!(ModelRegistration);
inventory::collect!(EntityRegistration);
inventory::collect!(ControllerRegistration);

/// 라우트 하나에 대응하는 리소스 정의
pub struct ResourceDefinition {
    pub names: ResourceNames,
    pub hooks: HooksConstructor,
    pub atomic: bool,
}

impl ResourceDefinition {
    /// 요청마다 새로운 훅 인스턴스를 생성합니다
    pub fn create_hooks(&self) -> Arc<dyn ResourceHooks> {
        (self.hooks)()
    }
}

/// 리소스 레지스트리
///
/// 모든 조회는 정규화된 이름 기준이며, 결과가 없으면 `None`을 반환합니다.
/// 없는 이름을 에러로 바꾸는 것은 리졸버의 책임입니다.
pub struct ResourceRegistry {
    config: Arc<ResourceConfig>,
    models: HashMap<String, ModelConstructor>,
    entities: HashMap<String, EntityConstructor>,
    controllers: HashMap<String, Arc<ResourceDefinition>>,
}

impl ResourceRegistry {
    /// 비어 있는 레지스트리를 생성합니다
    pub fn new(config: ResourceConfig) -> Self {
        Self {
            config: Arc::new(config),
            models: HashMap::new(),
            entities: HashMap::new(),
            controllers: HashMap::new(),
        }
    }

    /// `inventory`로 수집된 모든 등록 정보로 레지스트리를 구성합니다
    pub fn from_inventory(config: ResourceConfig) -> Self {
        print_boxed_title("🔄 INITIALIZING RESOURCE REGISTRY");

        let mut registry = Self::new(config);

        print_step_start(1, "Registering models");
        let mut count = 0;
        for registration in inventory::iter::<ModelRegistration>() {
            registry.register_model(registration.name, registration.constructor);
            print_sub_task(registration.name, "✓ Registered");
            count += 1;
        }
        print_step_complete(1, "Models registered", count);

        print_step_start(2, "Registering entities");
        count = 0;
        for registration in inventory::iter::<EntityRegistration>() {
            registry.register_entity(registration.name, registration.constructor);
            print_sub_task(registration.name, "✓ Registered");
            count += 1;
        }
        print_step_complete(2, "Entities registered", count);

        print_step_start(3, "Registering controllers");
        count = 0;
        for registration in inventory::iter::<ControllerRegistration>() {
            let route_key = registry.register_controller(registration.constructor, registration.atomic);
            print_sub_task(&route_key, if registration.atomic { "✓ Registered (atomic)" } else { "✓ Registered" });
            count += 1;
        }
        print_step_complete(3, "Controllers registered", count);

        print_registry_summary(registry.models.len(), registry.entities.len(), registry.controllers.len());

        registry
    }

    pub fn config(&self) -> &Arc<ResourceConfig> {
        &self.config
    }

    /// 모델 생성자를 `<namespaces.models><name>` 키로 등록합니다
    pub fn register_model<F>(&mut self, name: &str, constructor: F)
    where
        F: Fn(Arc<DataContext>) -> Arc<dyn Model> + Send + Sync + 'static,
    {
        let key = self.config.model_name(name);
        if self.models.insert(key.clone(), Arc::new(constructor)).is_some() {
            warn!("⚠️ 모델이 중복 등록되어 교체되었습니다: {}", key);
        }
        debug!("📦 모델 등록: {}", key);
    }

    /// 엔티티 생성자를 `<namespaces.entities><name>` 키로 등록합니다
    pub fn register_entity<F>(&mut self, name: &str, constructor: F)
    where
        F: Fn(Arc<dyn Model>, SearchHelper) -> Box<dyn Entity> + Send + Sync + 'static,
    {
        let key = self.config.entity_name(name);
        if self.entities.insert(key.clone(), Arc::new(constructor)).is_some() {
            warn!("⚠️ 엔티티가 중복 등록되어 교체되었습니다: {}", key);
        }
        debug!("📦 엔티티 등록: {}", key);
    }

    /// 컨트롤러를 등록하고 라우트 키를 반환합니다
    ///
    /// 이름 유도를 위해 훅을 한 번 생성합니다.
    pub fn register_controller<F>(&mut self, constructor: F, atomic: bool) -> String
    where
        F: Fn() -> Arc<dyn ResourceHooks> + Send + Sync + 'static,
    {
        let sample = constructor();
        let names = ResourceNames::for_hooks(sample.as_ref(), &self.config.namespaces.controllers);
        let route_key = names.route_key();

        let definition = ResourceDefinition {
            names,
            hooks: Arc::new(constructor),
            atomic,
        };

        if self.controllers.insert(route_key.clone(), Arc::new(definition)).is_some() {
            warn!("⚠️ 컨트롤러가 중복 등록되어 교체되었습니다: {}", route_key);
        }
        debug!("📦 컨트롤러 등록: /{}", route_key);

        route_key
    }

    pub fn model(&self, qualified_name: &str) -> Option<ModelConstructor> {
        self.models.get(qualified_name).cloned()
    }

    pub fn has_entity(&self, qualified_name: &str) -> bool {
        self.entities.contains_key(qualified_name)
    }

    pub fn entity(&self, qualified_name: &str) -> Option<EntityConstructor> {
        self.entities.get(qualified_name).cloned()
    }

    /// 라우트 키(소문자 복수형)로 리소스 정의를 찾습니다
    pub fn controller(&self, route_key: &str) -> Option<Arc<ResourceDefinition>> {
        self.controllers.get(&route_key.to_lowercase()).cloned()
    }

    pub fn route_keys(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = self.controllers.keys().map(String::as_str).collect();
        keys.sort_unstable();
        keys
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{FakeModel, MemoryEntity};

    struct GadgetController;

    impl ResourceHooks for GadgetController {}

    struct NamedHooks;

    impl ResourceHooks for NamedHooks {
        fn resource_name(&self) -> Option<&'static str> {
            Some("Widget")
        }
    }

    fn registry() -> ResourceRegistry {
        ResourceRegistry::new(ResourceConfig::default())
    }

    #[test]
    fn test_models_are_keyed_by_qualified_name() {
        let mut registry = registry();
        registry.register_model("Gadget", |context| FakeModel::shared("gadgets", context));

        assert!(registry.model("models::Gadget").is_some());
        assert!(registry.model("Gadget").is_none());
    }

    #[test]
    fn test_entities_are_keyed_by_qualified_name() {
        let mut registry = registry();
        registry.register_entity("GadgetEntity", MemoryEntity::boxed);

        assert!(registry.has_entity("entities::GadgetEntity"));
        assert!(!registry.has_entity("entities::DocumentEntity"));
        assert!(registry.entity("entities::GadgetEntity").is_some());
    }

    #[test]
    fn test_controller_route_key_is_lowercase_plural() {
        let mut registry = registry();
        let route_key = registry.register_controller(|| Arc::new(GadgetController), true);

        assert_eq!(route_key, "gadgets");

        let definition = registry.controller("Gadgets").unwrap();
        assert_eq!(definition.names.singular, "Gadget");
        assert_eq!(definition.names.plural, "Gadgets");
        assert!(definition.atomic);
    }

    #[test]
    fn test_explicit_resource_name_wins() {
        let mut registry = registry();
        registry.register_controller(|| Arc::new(NamedHooks), false);

        assert!(registry.controller("widgets").is_some());
        assert_eq!(registry.route_keys(), vec!["widgets"]);
    }

    #[test]
    fn test_duplicate_registration_replaces_entry() {
        let mut registry = registry();
        registry.register_controller(|| Arc::new(GadgetController), false);
        registry.register_controller(|| Arc::new(GadgetController), true);

        assert_eq!(registry.route_keys().len(), 1);
        assert!(registry.controller("gadgets").unwrap().atomic);
    }

    #[test]
    fn test_inventory_registers_sample_resources() {
        let registry = ResourceRegistry::from_inventory(ResourceConfig::default());

        assert!(registry.model("models::User").is_some());
        assert!(registry.model("models::Note").is_some());
        assert!(registry.has_entity("entities::UserEntity"));
        assert!(registry.has_entity("entities::DocumentEntity"));
        assert!(!registry.has_entity("entities::NoteEntity"));
        assert_eq!(registry.route_keys(), vec!["notes", "users"]);
    }
}
