//! Database Connection Management Module
//!
//! MongoDB 데이터베이스 연결과 요청 단위 데이터 컨텍스트를 관리하는 모듈입니다.
//!
//! # 환경 변수 설정
//!
//! ```bash
//! # MongoDB 연결 URI (트랜잭션 사용 시 레플리카셋 필요)
//! export MONGODB_URI="mongodb://localhost:27017/?replicaSet=rs0"
//!
//! # 사용할 데이터베이스 이름
//! export DATABASE_NAME="resource_api"
//! ```
//!
//! # 기본 사용법
//!
//! ```rust,ignore
//! use crate::db::{Database, DataContext};
//!
//! let database = Arc::new(Database::new().await?);
//!
//! // 요청마다 새로운 컨텍스트
//! let context = DataContext::new(Some(database.clone()));
//! ```

pub mod transaction;

use std::sync::Arc;

use futures_util::lock::{Mutex, MutexGuard};
use log::info;
use mongodb::{options::ClientOptions, Client, ClientSession};
use uuid::Uuid;

use crate::config::DatabaseConfig;
use crate::core::errors::{ApiError, ApiResult};

pub use transaction::{MongoTransaction, TransactionBoundary, TransactionCoordinator, TransactionState};

/// MongoDB 데이터베이스 연결 래퍼
///
/// MongoDB 클라이언트와 데이터베이스 이름을 보관하며,
/// 엔티티 계층과 트랜잭션 경계에서 공유됩니다.
#[derive(Clone)]
pub struct Database {
    /// MongoDB 클라이언트 인스턴스
    client: Client,
    /// 사용할 데이터베이스 이름
    database_name: String,
}

impl Database {
    /// 새 MongoDB 데이터베이스 연결을 생성합니다.
    ///
    /// [`DatabaseConfig`]에서 연결 정보를 읽어 클라이언트를 초기화하고,
    /// `ping` 명령으로 연결 상태를 검증한 후 반환합니다.
    ///
    /// ## 사용 예제
    /// ```rust,ignore
    /// use crate::db::Database;
    ///
    /// let database = Database::new().await?;
    /// ```
    pub async fn new() -> Result<Self, Box<dyn std::error::Error>> {
        let database_name = DatabaseConfig::database_name();

        let mut client_options = ClientOptions::parse(DatabaseConfig::uri()).await?;
        client_options.app_name = Some(DatabaseConfig::app_name());

        let client = Client::with_options(client_options)?;

        // 연결 테스트
        client
            .database(&database_name)
            .run_command(mongodb::bson::doc! { "ping": 1 })
            .await?;

        info!("✅ MongoDB 연결 성공: {}", database_name);

        Ok(Self {
            client,
            database_name,
        })
    }

    /// MongoDB 데이터베이스 인스턴스를 반환합니다.
    ///
    /// ## 사용 예제
    /// ```rust,ignore
    /// let notes = database.get_database().collection::<Document>("notes");
    /// ```
    pub fn get_database(&self) -> mongodb::Database {
        self.client.database(&self.database_name)
    }

    /// 세션과 트랜잭션 시작에 사용되는 클라이언트
    pub fn client(&self) -> &Client {
        &self.client
    }

    pub fn database_name(&self) -> &str {
        &self.database_name
    }
}

/// 요청 단위 데이터 액세스 컨텍스트
///
/// 요청 하나에서 생성된 모델, 엔티티, 트랜잭션 경계가 같은 컨텍스트를 공유합니다.
/// 트랜잭션이 열려 있는 동안에는 세션 슬롯에 MongoDB 세션이 들어 있으며,
/// 기본 엔티티는 이 세션으로 쿼리를 실행합니다.
///
/// 요청 사이에서 공유되지 않습니다.
pub struct DataContext {
    request_id: Uuid,
    database: Option<Arc<Database>>,
    session: Mutex<Option<ClientSession>>,
}

impl DataContext {
    pub fn new(database: Option<Arc<Database>>) -> Arc<Self> {
        Arc::new(Self {
            request_id: Uuid::new_v4(),
            database,
            session: Mutex::new(None),
        })
    }

    /// 데이터베이스 연결이 없는 컨텍스트 (메모리 엔티티, 테스트용)
    pub fn detached() -> Arc<Self> {
        Self::new(None)
    }

    /// 로그 상관관계에 사용하는 요청 ID
    pub fn request_id(&self) -> Uuid {
        self.request_id
    }

    pub fn database(&self) -> ApiResult<&Arc<Database>> {
        self.database.as_ref().ok_or_else(|| {
            ApiError::Configuration(format!(
                "데이터베이스 연결이 없는 컨텍스트입니다 (request {})",
                self.request_id
            ))
        })
    }

    /// 세션 슬롯을 잠그고 반환합니다
    ///
    /// 잠금은 쿼리 하나가 끝날 때까지만 유지해야 합니다.
    pub async fn session(&self) -> MutexGuard<'_, Option<ClientSession>> {
        self.session.lock().await
    }

    pub async fn in_transaction(&self) -> bool {
        self.session.lock().await.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detached_context_has_no_database() {
        let context = DataContext::detached();

        assert!(matches!(context.database(), Err(ApiError::Configuration(_))));
    }

    #[test]
    fn test_each_context_gets_its_own_request_id() {
        let first = DataContext::detached();
        let second = DataContext::detached();

        assert_ne!(first.request_id(), second.request_id());
    }

    #[actix_web::test]
    async fn test_new_context_is_not_in_transaction() {
        let context = DataContext::detached();

        assert!(!context.in_transaction().await);
    }
}
