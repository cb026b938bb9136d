//! 데이터 액세스 계층을 담당하는 리포지토리 모듈
//!
//! 리소스가 커스텀 엔티티를 등록하지 않았을 때 사용되는 기본 MongoDB 엔티티를 제공합니다.
//!
//! # Examples
//!
//! ```rust,ignore
//! use crate::repositories::document_entity::DocumentEntity;
//!
//! let entity = DocumentEntity::create(model, SearchHelper::new());
//! let results = entity.find().await?;
//! ```

pub mod document_entity;

pub use document_entity::DocumentEntity;
