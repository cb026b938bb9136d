//! # Domain Layer Module
//!
//! 리소스 프레임워크가 다루는 도메인 추상화를 정의합니다.
//!
//! ## 아키텍처 개요
//!
//! ```text
//! Domain Layer (이 모듈)
//! ├── Model    - 레코드 형태 (컬렉션, 기본 키, 차단 컬럼, 검증)
//! ├── Entity   - 모델에 대한 데이터 액세스 (find / find_first / save / delete)
//! └── DTOs     - 요청 본문 추출과 응답 봉투
//!      │
//!      ▼
//! Handlers (ResourceController)
//!      │
//!      ▼
//! Repositories (DocumentEntity), DB
//! ```
//!
//! ## 모듈 구성
//!
//! - [`model`] - `Model` trait, `Payload`, 차단 컬럼 제거
//! - [`entity`] - `Entity` trait, `ResultSet`, `SearchHelper`
//! - [`dto`] - HTTP 경계의 요청/응답 변환

pub mod dto;
pub mod entity;
pub mod model;
