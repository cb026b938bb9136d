//! # 기본 도큐먼트 엔티티
//!
//! 커스텀 엔티티가 등록되지 않은 모든 리소스가 사용하는 MongoDB 엔티티입니다.
//! 모델의 `source()`를 컬렉션 이름으로, `primary_key()`를 조회 키로 사용합니다.
//!
//! ## 특징
//!
//! - **트랜잭션 참여**: 컨텍스트에 세션이 열려 있으면 모든 쿼리를 그 세션으로 실행
//! - **ID 해석**: 24자리 hex 문자열은 `ObjectId`로, 그 외에는 문자열 그대로 조회
//! - **레코드 형식**: 기본 키를 `id` 문자열로 바꾼 relaxed Extended JSON

use std::any::Any;
use std::sync::Arc;

use async_trait::async_trait;
use futures_util::TryStreamExt;
use log::debug;
use mongodb::bson::{self, doc, oid::ObjectId, Bson, Document};
use mongodb::Collection;
use serde_json::{Map, Value};

use crate::core::errors::{ApiError, ApiResult, ErrorContext, ErrorList};
use crate::core::registry::EntityRegistration;
use crate::domain::entity::{Entity, ResultSet, SearchHelper};
use crate::domain::model::{Model, Payload};

pub struct DocumentEntity {
    model: Arc<dyn Model>,
    search: SearchHelper,
}

impl DocumentEntity {
    /// 레지스트리에 등록되는 이름
    pub const NAME: &'static str = "DocumentEntity";

    pub fn new(model: Arc<dyn Model>, search: SearchHelper) -> Self {
        Self { model, search }
    }

    pub fn create(model: Arc<dyn Model>, search: SearchHelper) -> Box<dyn Entity> {
        Box::new(Self::new(model, search))
    }

    fn collection(&self) -> ApiResult<Collection<Document>> {
        let database = self.model.context().database()?;
        Ok(database.get_database().collection::<Document>(self.model.source()))
    }

    fn id_filter(&self, id: &str) -> Document {
        let mut filter = Document::new();
        match ObjectId::parse_str(id) {
            Ok(object_id) => filter.insert(self.model.primary_key(), object_id),
            Err(_) => filter.insert(self.model.primary_key(), id),
        };
        filter
    }
}

fn db_error(error: mongodb::error::Error) -> ApiError {
    ApiError::DatabaseError(error.to_string())
}

fn to_document(map: &Payload) -> ApiResult<Document> {
    bson::to_document(map).context("BSON 도큐먼트 변환 실패")
}

fn id_to_string(id: &Bson) -> String {
    match id {
        Bson::ObjectId(object_id) => object_id.to_hex(),
        Bson::String(value) => value.clone(),
        other => other.to_string(),
    }
}

/// 도큐먼트를 API 레코드로 변환합니다. 기본 키는 `id` 문자열이 됩니다.
fn to_record(mut document: Document, primary_key: &str) -> Value {
    let id = document.remove(primary_key).map(|id| id_to_string(&id));

    let mut record = match Bson::Document(document).into_relaxed_extjson() {
        Value::Object(record) => record,
        _ => Map::new(),
    };

    if let Some(id) = id {
        record.insert("id".to_string(), Value::String(id));
    }

    Value::Object(record)
}

#[async_trait]
impl Entity for DocumentEntity {
    async fn find(&self) -> ApiResult<ResultSet> {
        let collection = self.collection()?;

        let mut action = collection.find(to_document(&self.search.filter)?);
        if !self.search.sort.is_empty() {
            action = action.sort(to_document(&self.search.sort)?);
        }
        if let Some(limit) = self.search.limit {
            action = action.limit(limit);
        }

        let mut slot = self.model.context().session().await;
        let documents: Vec<Document> = match slot.as_mut() {
            Some(session) => {
                let mut cursor = action.session(&mut *session).await.map_err(db_error)?;
                cursor.stream(session).try_collect().await.map_err(db_error)?
            }
            None => action.await.map_err(db_error)?.try_collect().await.map_err(db_error)?,
        };

        let primary_key = self.model.primary_key();
        Ok(ResultSet::new(
            documents.into_iter().map(|document| to_record(document, primary_key)).collect(),
        ))
    }

    async fn find_first(&self, id: &str) -> ApiResult<ResultSet> {
        let collection = self.collection()?;
        let filter = self.id_filter(id);

        let mut slot = self.model.context().session().await;
        let found = match slot.as_mut() {
            Some(session) => collection.find_one(filter).session(session).await,
            None => collection.find_one(filter).await,
        }
        .map_err(db_error)?;

        Ok(match found {
            Some(document) => ResultSet::new(vec![to_record(document, self.model.primary_key())]),
            None => ResultSet::empty(),
        })
    }

    async fn save(&self, payload: &Payload, id: Option<&str>) -> ApiResult<String> {
        let mut document = to_document(payload)?;

        let Some(id) = id else {
            let collection = self.collection()?;
            let mut slot = self.model.context().session().await;
            let result = match slot.as_mut() {
                Some(session) => collection.insert_one(document).session(session).await,
                None => collection.insert_one(document).await,
            }
            .map_err(db_error)?;

            return Ok(id_to_string(&result.inserted_id));
        };

        // 빈 `$set`은 서버가 거부합니다
        document.remove(self.model.primary_key());
        if document.is_empty() {
            debug!("⏭️ 변경할 필드가 없어 수정을 건너뜁니다: {}/{}", self.model.source(), id);
            return Ok(id.to_string());
        }

        let collection = self.collection()?;
        let update = doc! { "$set": document };
        let filter = self.id_filter(id);

        let mut slot = self.model.context().session().await;
        match slot.as_mut() {
            Some(session) => collection.update_one(filter, update).session(session).await,
            None => collection.update_one(filter, update).await,
        }
        .map_err(db_error)?;

        Ok(id.to_string())
    }

    async fn delete(&self, id: &str) -> ApiResult<()> {
        let collection = self.collection()?;
        let filter = self.id_filter(id);

        let mut slot = self.model.context().session().await;
        let result = match slot.as_mut() {
            Some(session) => collection.delete_one(filter).session(session).await,
            None => collection.delete_one(filter).await,
        }
        .map_err(db_error)?;

        if result.deleted_count == 0 {
            return Err(ApiError::not_found(
                "Resource not available.",
                ErrorList::new()
                    .dev("The resource you requested is not available.")
                    .code("43758093745021")
                    .more(Value::String(id.to_string())),
            ));
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

inventory::submit! {
    EntityRegistration {
        name: DocumentEntity::NAME,
        constructor: DocumentEntity::create,
    }
}
