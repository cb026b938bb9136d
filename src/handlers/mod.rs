//! # HTTP Request Handlers Module
//!
//! 리소스 컨트롤러와 이를 HTTP에 연결하는 핸들러들을 정의하는 모듈입니다.
//!
//! ## 아키텍처 위치
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//!   rest - /{resource}[/{id}] 엔드포인트          ← Web Layer
//! ├─────────────────────────────────────────────┤
//!   controller - ResourceController + 훅          ← Controller Layer
//! ├─────────────────────────────────────────────┤
//!   services::resolver - 모델/엔티티 해석          ← Resolution
//! ├─────────────────────────────────────────────┤
//!   repositories - DocumentEntity (MongoDB)       ← Data Access
//! └─────────────────────────────────────────────┘
//! ```
//!
//! ## 모듈 구성
//!
//! - [`controller`] - 이름 유도, [`controller::ResourceHooks`], CRUD 처리 순서, 디스패치
//! - [`rest`] - actix-web 핸들러와 공유 상태 [`rest::AppState`]

pub mod controller;
pub mod rest;

pub use controller::{Reply, ResourceController, ResourceHooks, ResourceNames, RouteCall, RouteHandler};
pub use rest::AppState;
