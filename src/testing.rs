//! 단위 테스트용 메모리 구현
//!
//! 데이터베이스 없이 컨트롤러, 리졸버, HTTP 경계를 검증하기 위한
//! 모델/엔티티/훅 구현과 호출 기록용 저널을 제공합니다.

use std::any::Any;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::Value;

use crate::config::ResourceConfig;
use crate::core::errors::{ApiError, ApiResult, ErrorList};
use crate::core::registry::ResourceRegistry;
use crate::core::validation::{FieldViolation, MessageBag, ValidationException};
use crate::db::DataContext;
use crate::domain::entity::{Entity, ResultSet, SearchHelper};
use crate::domain::model::{Model, Payload};
use crate::handlers::controller::{ResourceController, ResourceHooks, ResourceNames};
use crate::services::resolver::ResourceResolver;

/// 호출 순서를 기록하는 공유 저널
#[derive(Clone, Default)]
pub struct Journal(Arc<Mutex<Vec<String>>>);

impl Journal {
    pub fn record(&self, entry: impl Into<String>) {
        self.0.lock().unwrap().push(entry.into());
    }

    pub fn entries(&self) -> Vec<String> {
        self.0.lock().unwrap().clone()
    }

    /// 접두사가 일치하는 기록 수
    pub fn count(&self, prefix: &str) -> usize {
        self.0.lock().unwrap().iter().filter(|entry| entry.starts_with(prefix)).count()
    }

    pub fn clear(&self) {
        self.0.lock().unwrap().clear();
    }
}

#[derive(Default)]
pub struct MemoryStore {
    records: Vec<Value>,
    next_id: u64,
}

pub type SharedStore = Arc<Mutex<MemoryStore>>;

pub struct FakeModel {
    source: String,
    context: Arc<DataContext>,
    block_columns: Vec<&'static str>,
    required: Vec<&'static str>,
}

impl FakeModel {
    pub fn new(source: &str, context: Arc<DataContext>) -> Self {
        Self {
            source: source.to_string(),
            context,
            block_columns: Vec::new(),
            required: Vec::new(),
        }
    }

    pub fn shared(source: &str, context: Arc<DataContext>) -> Arc<dyn Model> {
        Arc::new(Self::new(source, context))
    }

    pub fn with_block_columns(mut self, columns: &[&'static str]) -> Self {
        self.block_columns = columns.to_vec();
        self
    }

    pub fn with_required(mut self, field: &'static str) -> Self {
        self.required.push(field);
        self
    }
}

impl Model for FakeModel {
    fn source(&self) -> &str {
        &self.source
    }

    fn block_columns(&self) -> &[&'static str] {
        &self.block_columns
    }

    fn context(&self) -> &Arc<DataContext> {
        &self.context
    }

    fn validate(&self, payload: &Payload) -> ApiResult<()> {
        let violations: Vec<FieldViolation> = self
            .required
            .iter()
            .filter(|field| !payload.contains_key(**field))
            .map(|field| FieldViolation::new(*field, "required", format!("{} is required", field)))
            .collect();

        if violations.is_empty() {
            return Ok(());
        }

        let mut bag = MessageBag::new();
        bag.extend_from_violations(&violations);
        Err(ValidationException::new("Invalid record", ErrorList::new(), violations, &bag).into())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// 순번 문자열 ID를 부여하는 메모리 엔티티
pub struct MemoryEntity {
    model: Arc<dyn Model>,
    search: SearchHelper,
    store: SharedStore,
    journal: Journal,
    lose_writes: bool,
}

impl MemoryEntity {
    pub fn new(model: Arc<dyn Model>, search: SearchHelper) -> Self {
        Self {
            model,
            search,
            store: SharedStore::default(),
            journal: Journal::default(),
            lose_writes: false,
        }
    }

    pub fn boxed(model: Arc<dyn Model>, search: SearchHelper) -> Box<dyn Entity> {
        Box::new(Self::new(model, search))
    }

    pub fn with_store(mut self, store: SharedStore) -> Self {
        self.store = store;
        self
    }

    pub fn with_journal(mut self, journal: Journal) -> Self {
        self.journal = journal;
        self
    }

    /// 저장 호출은 성공하지만 아무것도 기록하지 않습니다
    pub fn losing_writes(mut self) -> Self {
        self.lose_writes = true;
        self
    }
}

#[async_trait]
impl Entity for MemoryEntity {
    async fn find(&self) -> ApiResult<ResultSet> {
        self.journal.record("entity.find");
        let store = self.store.lock().unwrap();

        let limit = self.search.limit.map(|limit| limit as usize).unwrap_or(usize::MAX);
        Ok(ResultSet::new(store.records.iter().take(limit).cloned().collect()))
    }

    async fn find_first(&self, id: &str) -> ApiResult<ResultSet> {
        self.journal.record("entity.find_first");
        let store = self.store.lock().unwrap();

        Ok(ResultSet::new(
            store.records.iter().filter(|record| record["id"] == id).cloned().collect(),
        ))
    }

    async fn save(&self, payload: &Payload, id: Option<&str>) -> ApiResult<String> {
        self.journal.record(format!("entity.save:{}", id.unwrap_or("-")));
        let mut store = self.store.lock().unwrap();

        match id {
            None => {
                store.next_id += 1;
                let id = store.next_id.to_string();
                if !self.lose_writes {
                    let mut record = payload.clone();
                    record.insert("id".to_string(), Value::String(id.clone()));
                    store.records.push(Value::Object(record));
                }
                Ok(id)
            }
            Some(id) => {
                if !self.lose_writes {
                    if let Some(Value::Object(record)) = store.records.iter_mut().find(|record| record["id"] == id) {
                        for (key, value) in payload {
                            record.insert(key.clone(), value.clone());
                        }
                    }
                }
                Ok(id.to_string())
            }
        }
    }

    async fn delete(&self, id: &str) -> ApiResult<()> {
        self.journal.record("entity.delete");
        let mut store = self.store.lock().unwrap();

        let before = store.records.len();
        store.records.retain(|record| record["id"] != id);
        if store.records.len() == before {
            return Err(ApiError::not_found("Resource not available.", ErrorList::new()));
        }
        Ok(())
    }

    fn model(&self) -> &Arc<dyn Model> {
        &self.model
    }

    fn search_helper(&self) -> &SearchHelper {
        &self.search
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// 모든 훅 호출을 저널에 기록하는 훅 구현
#[derive(Default)]
pub struct RecordingHooks {
    name: Option<&'static str>,
    journal: Journal,
    store: SharedStore,
    seen: Arc<Mutex<Vec<Payload>>>,
    fail_before_save: Option<ValidationException>,
}

impl RecordingHooks {
    pub fn named(name: &'static str) -> Self {
        Self {
            name: Some(name),
            ..Self::default()
        }
    }

    pub fn journal(&self) -> Journal {
        self.journal.clone()
    }

    pub fn store(&self) -> SharedStore {
        self.store.clone()
    }

    /// `before_save`가 받은 본문 목록
    pub fn seen_payloads(&self) -> Arc<Mutex<Vec<Payload>>> {
        self.seen.clone()
    }

    pub fn failing_before_save(mut self, exception: ValidationException) -> Self {
        self.fail_before_save = Some(exception);
        self
    }
}

#[async_trait]
impl ResourceHooks for RecordingHooks {
    fn resource_name(&self) -> Option<&'static str> {
        self.name
    }

    fn configure_entity(&self, entity: Box<dyn Entity>) -> Box<dyn Entity> {
        self.journal.record("configure_entity");
        entity
    }

    async fn before_save(&self, payload: Payload, id: Option<&str>) -> ApiResult<Payload> {
        self.journal.record(format!("before_save:{}", id.unwrap_or("-")));
        self.seen.lock().unwrap().push(payload.clone());

        if let Some(exception) = &self.fail_before_save {
            return Err(exception.clone().into());
        }
        Ok(payload)
    }

    async fn after_save(&self, _payload: &Payload, _id: &str) -> ApiResult<()> {
        self.journal.record("after_save");
        Ok(())
    }

    async fn before_delete(&self, id: &str) -> ApiResult<()> {
        self.journal.record(format!("before_delete:{}", id));
        Ok(())
    }

    async fn after_delete(&self, id: &str) -> ApiResult<()> {
        self.journal.record(format!("after_delete:{}", id));
        Ok(())
    }
}

/// 메모리 엔티티를 기본 엔티티(`DocumentEntity`)로 등록합니다
pub fn register_memory_entity(registry: &mut ResourceRegistry, store: SharedStore, journal: Journal) {
    registry.register_entity("DocumentEntity", move |model, search| -> Box<dyn Entity> {
        Box::new(
            MemoryEntity::new(model, search)
                .with_store(store.clone())
                .with_journal(journal.clone()),
        )
    });
}

/// 기록용 훅 컨트롤러를 등록하고 라우트 키를 반환합니다
pub fn register_recording_controller(registry: &mut ResourceRegistry, name: &'static str, atomic: bool) -> String {
    registry.register_controller(move || -> Arc<dyn ResourceHooks> { Arc::new(RecordingHooks::named(name)) }, atomic)
}

/// `Gadget` 모델(차단 컬럼 `_id`, `owner`)과 훅의 저장소/저널을 공유하는 기본 엔티티
pub fn gadget_registry(hooks: &RecordingHooks) -> ResourceRegistry {
    let mut registry = ResourceRegistry::new(ResourceConfig::default());
    registry.register_model("Gadget", |context| -> Arc<dyn Model> {
        Arc::new(FakeModel::new("gadgets", context).with_block_columns(&["_id", "owner"]))
    });
    register_memory_entity(&mut registry, hooks.store(), hooks.journal());
    registry
}

pub fn gadget_controller(hooks: RecordingHooks, registry: ResourceRegistry) -> ResourceController {
    ResourceController::with_hooks(
        ResourceNames::new("Gadget"),
        Arc::new(hooks),
        false,
        ResourceResolver::new(Arc::new(registry)),
        DataContext::detached(),
    )
}
