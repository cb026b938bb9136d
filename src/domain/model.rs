//! # Model
//!
//! 저장되는 레코드의 형태를 설명하는 모델 trait입니다.
//! 모델은 요청마다 [`DataContext`]와 함께 생성되며, 컬렉션 이름과 기본 키,
//! 클라이언트가 보낼 수 없는 차단 컬럼을 알려줍니다.

use std::any::Any;
use std::sync::Arc;

use serde_json::{Map, Value};

use crate::core::errors::ApiResult;
use crate::db::DataContext;

/// 요청 본문에서 추출한 레코드 필드
pub type Payload = Map<String, Value>;

pub trait Model: Send + Sync {
    /// 레코드가 저장되는 컬렉션 이름
    fn source(&self) -> &str;

    fn primary_key(&self) -> &str {
        "_id"
    }

    /// 클라이언트 요청 본문에서 항상 제거되는 필드
    fn block_columns(&self) -> &[&'static str] {
        &[]
    }

    /// 모델을 생성할 때 사용한 요청 컨텍스트
    fn context(&self) -> &Arc<DataContext>;

    /// 본문을 모델 형태에 맞춰 검증합니다
    ///
    /// 검증 실패는 `ApiError::Validation`으로 반환하며, 이후 저장 단계는 실행되지 않습니다.
    fn validate(&self, _payload: &Payload) -> ApiResult<()> {
        Ok(())
    }

    fn as_any(&self) -> &dyn Any;
}

/// 차단 컬럼을 제거한 본문을 반환합니다
pub fn strip_block_columns(model: &dyn Model, mut payload: Payload) -> Payload {
    for column in model.block_columns() {
        payload.remove(*column);
    }
    payload
}
