//! 리소스 API 서버
//!
//! MongoDB 컬렉션을 REST 리소스로 노출하는 범용 CRUD 프레임워크입니다.
//! 리소스 하나는 모델, (선택) 커스텀 엔티티, 컨트롤러 훅으로 정의되며
//! 컴파일 타임 레지스트리에 등록되면 `/api/v1/{resource}` 아래에서 바로 제공됩니다.
//!
//! # Features
//!
//! - **이름 기반 해석**: 컨트롤러 이름 → 모델 / 커스텀 엔티티 / 기본 엔티티
//! - **CRUD 훅**: `before_save`, `after_save`, `before_delete`, `after_delete`
//! - **트랜잭션**: atomic 리소스의 요청은 MongoDB 트랜잭션 안에서 처리
//! - **구조화된 에러**: 모든 실패는 `ErrorReport` 형태의 JSON으로 응답
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────┐
//! │   HTTP Routes   │ ← /api/v1/{resource}[/{id}]
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │    Handlers     │ ← ResourceController + TransactionCoordinator
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │    Services     │ ← ResourceResolver (ResourceRegistry 조회)
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │  Repositories   │ ← DocumentEntity
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │     MongoDB     │ ← 저장소
//! └─────────────────┘
//! ```
//!
//! # Examples
//!
//! ```rust,ignore
//! use resource_api::config::ResourceConfig;
//! use resource_api::core::registry::ResourceRegistry;
//! use resource_api::handlers::AppState;
//!
//! let registry = Arc::new(ResourceRegistry::from_inventory(ResourceConfig::from_env()));
//! let state = AppState::new(registry, Some(database));
//! ```

pub mod core;
pub mod config;
pub mod db;
pub mod domain;
pub mod repositories;
pub mod resources;
pub mod services;
pub mod utils;
pub mod routes;
pub mod handlers;

#[cfg(test)]
pub(crate) mod testing;
