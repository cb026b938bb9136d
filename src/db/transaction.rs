//! # Transaction Coordination
//!
//! 디스패치된 작업 하나를 트랜잭션으로 감싸고, 작업 결과로 커밋/롤백을 결정합니다.
//!
//! ```text
//! begin ─▶ state = { is_atomic: true, should_rollback: false }
//!   │
//!   ▼
//! operation.await (정확히 한 번)
//!   ├─ Ok(value)  ─▶ should_rollback = false ─▶ commit   ─▶ Ok(value)
//!   └─ Err(error) ─▶ should_rollback = true  ─▶ rollback ─▶ Err(error)
//! ```
//!
//! 롤백 실패는 로그로만 남기고, 호출자에게는 항상 원래 에러를 돌려줍니다.
//! 재시도는 하지 않습니다.

use std::future::Future;
use std::sync::Arc;

use async_trait::async_trait;
use log::{debug, error, info};

use crate::core::errors::{ApiError, ApiResult};
use crate::db::DataContext;
use crate::handlers::controller::{Reply, ResourceController, RouteCall};

/// 요청 하나의 트랜잭션 상태
///
/// 코디네이터 인스턴스가 소유하며 시작 시점과 종료 시점에만 기록됩니다.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TransactionState {
    pub is_atomic: bool,
    pub should_rollback: bool,
}

/// 트랜잭션 경계 추상화
#[async_trait]
pub trait TransactionBoundary: Send + Sync {
    async fn begin(&self) -> ApiResult<()>;
    async fn commit(&self) -> ApiResult<()>;
    async fn rollback(&self) -> ApiResult<()>;
}

/// MongoDB 멀티 도큐먼트 트랜잭션 경계
///
/// 시작한 세션을 [`DataContext`]의 세션 슬롯에 넣어 두므로,
/// 같은 컨텍스트로 만든 엔티티의 쿼리는 모두 이 트랜잭션 안에서 실행됩니다.
pub struct MongoTransaction {
    context: Arc<DataContext>,
}

impl MongoTransaction {
    pub fn new(context: Arc<DataContext>) -> Self {
        Self { context }
    }
}

#[async_trait]
impl TransactionBoundary for MongoTransaction {
    async fn begin(&self) -> ApiResult<()> {
        let database = self.context.database()?;

        let mut session = database
            .client()
            .start_session()
            .await
            .map_err(|e| ApiError::DatabaseError(format!("세션 시작 실패: {}", e)))?;

        session
            .start_transaction()
            .await
            .map_err(|e| ApiError::DatabaseError(format!("트랜잭션 시작 실패: {}", e)))?;

        *self.context.session().await = Some(session);

        debug!("🔒 트랜잭션 시작 (request {})", self.context.request_id());
        Ok(())
    }

    async fn commit(&self) -> ApiResult<()> {
        let session = self.context.session().await.take();

        match session {
            Some(mut session) => {
                session
                    .commit_transaction()
                    .await
                    .map_err(|e| ApiError::DatabaseError(format!("트랜잭션 커밋 실패: {}", e)))?;
                debug!("✅ 트랜잭션 커밋 (request {})", self.context.request_id());
                Ok(())
            }
            None => Err(ApiError::InternalError("커밋할 트랜잭션이 없습니다".to_string())),
        }
    }

    async fn rollback(&self) -> ApiResult<()> {
        let session = self.context.session().await.take();

        match session {
            Some(mut session) => {
                session
                    .abort_transaction()
                    .await
                    .map_err(|e| ApiError::DatabaseError(format!("트랜잭션 롤백 실패: {}", e)))?;
                info!("↩️ 트랜잭션 롤백 (request {})", self.context.request_id());
                Ok(())
            }
            None => Err(ApiError::InternalError("롤백할 트랜잭션이 없습니다".to_string())),
        }
    }
}

/// 작업 하나를 트랜잭션으로 감싸는 코디네이터
///
/// 요청마다 새로 만들어지며 다른 요청과 상태를 공유하지 않습니다.
///
/// # Examples
///
/// ```rust,ignore
/// let mut coordinator = TransactionCoordinator::new(MongoTransaction::new(context.clone()));
/// let reply = coordinator.dispatch(&controller, RouteCall::Post { payload }).await?;
///
/// assert!(!coordinator.state().should_rollback);
/// ```
pub struct TransactionCoordinator<B: TransactionBoundary> {
    boundary: B,
    state: TransactionState,
}

impl<B: TransactionBoundary> TransactionCoordinator<B> {
    pub fn new(boundary: B) -> Self {
        Self {
            boundary,
            state: TransactionState::default(),
        }
    }

    pub fn state(&self) -> TransactionState {
        self.state
    }

    /// 작업을 트랜잭션 안에서 정확히 한 번 실행합니다
    ///
    /// 성공 결과와 실패 에러는 변형 없이 그대로 반환됩니다.
    /// 커밋 실패는 `DatabaseError`로 반환되며 이때 `should_rollback`이 설정됩니다.
    pub async fn run_atomic<T, F>(&mut self, operation: F) -> ApiResult<T>
    where
        F: Future<Output = ApiResult<T>>,
    {
        self.boundary.begin().await?;
        self.state = TransactionState {
            is_atomic: true,
            should_rollback: false,
        };

        match operation.await {
            Ok(value) => {
                self.state.should_rollback = false;
                if let Err(commit_error) = self.boundary.commit().await {
                    // 커밋에 실패한 세션은 버려지면서 드라이버가 트랜잭션을 중단합니다
                    self.state.should_rollback = true;
                    return Err(commit_error);
                }
                Ok(value)
            }
            Err(operation_error) => {
                self.state.should_rollback = true;
                if let Err(rollback_error) = self.boundary.rollback().await {
                    error!("❌ 롤백 실패 (원래 에러: {}): {}", operation_error, rollback_error);
                }
                Err(operation_error)
            }
        }
    }

    /// 컨트롤러 디스패치를 트랜잭션으로 감쌉니다
    pub async fn dispatch(&mut self, controller: &ResourceController, call: RouteCall) -> ApiResult<Reply> {
        self.run_atomic(controller.dispatch(call)).await
    }
}
