//! # Entity
//!
//! 모델 하나에 대한 데이터 액세스 연산을 정의합니다.
//! 기본 구현은 MongoDB 컬렉션을 사용하는
//! [`DocumentEntity`](crate::repositories::document_entity::DocumentEntity)이며,
//! 리소스별 커스텀 엔티티로 교체할 수 있습니다.

use std::any::Any;
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

use crate::core::errors::ApiResult;
use crate::domain::model::{Model, Payload};

/// 조회 결과 레코드 목록
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResultSet {
    records: Vec<Value>,
}

impl ResultSet {
    pub fn new(records: Vec<Value>) -> Self {
        Self { records }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn count_results(&self) -> usize {
        self.records.len()
    }

    pub fn records(&self) -> &[Value] {
        &self.records
    }

    pub fn first(&self) -> Option<&Value> {
        self.records.first()
    }

    pub fn into_records(self) -> Vec<Value> {
        self.records
    }
}

/// 엔티티 생성 시 전달되는 검색 설정
///
/// 필터, 정렬, 최대 개수를 담으며 `find()`에 그대로 적용됩니다.
/// 기본 키 조회(`find_first`)에는 적용되지 않습니다.
///
/// # Examples
///
/// ```rust,ignore
/// let search = SearchHelper::new()
///     .filter("archived", false)
///     .sort("created_at", -1)
///     .limit(50);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchHelper {
    pub filter: Payload,
    pub sort: Payload,
    pub limit: Option<i64>,
}

impl SearchHelper {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn filter(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.filter.insert(field.into(), value.into());
        self
    }

    /// `1`은 오름차순, `-1`은 내림차순
    pub fn sort(mut self, field: impl Into<String>, direction: i32) -> Self {
        self.sort.insert(field.into(), Value::from(direction));
        self
    }

    pub fn limit(mut self, limit: i64) -> Self {
        self.limit = Some(limit);
        self
    }
}

#[async_trait]
pub trait Entity: Send + Sync {
    /// 검색 설정을 적용한 전체 조회
    async fn find(&self) -> ApiResult<ResultSet>;

    /// 기본 키로 조회합니다. 없으면 빈 결과를 반환합니다.
    async fn find_first(&self, id: &str) -> ApiResult<ResultSet>;

    /// `id`가 없으면 삽입, 있으면 갱신하고 레코드의 기본 키를 반환합니다
    async fn save(&self, payload: &Payload, id: Option<&str>) -> ApiResult<String>;

    async fn delete(&self, id: &str) -> ApiResult<()>;

    fn model(&self) -> &Arc<dyn Model>;

    fn search_helper(&self) -> &SearchHelper;

    fn as_any(&self) -> &dyn Any;
}
