//! # Core Framework Module
//!
//! 리소스 프레임워크의 핵심 구성 요소를 제공하는 모듈입니다.
//!
//! ## 모듈 구성
//!
//! ### [`registry`] - 리소스 레지스트리
//! - **ResourceRegistry**: 모델/엔티티/컨트롤러 생성자를 이름으로 보관
//! - **자동 등록**: `inventory` 기반 컴파일 타임 등록
//! - **런타임 등록**: 테스트나 임베딩 환경에서 직접 등록
//!
//! ### [`errors`] - 통합 에러 처리
//! - **ApiError**: 애플리케이션 전역 에러 타입
//! - **ErrorReport**: 실패 하나를 설명하는 구조화된 리포트
//! - **HTTP 통합**: Actix-Web `ResponseError` 구현
//!
//! ### [`validation`] - 검증 실패 보고
//! - **ValidationException**: 항상 400으로 응답하는 비즈니스 규칙 위반
//! - **MessageBag**: 명시적으로 전달되는 메시지 소스
//!
//! ## 사용 패턴
//!
//! ```rust,ignore
//! use crate::core::registry::ResourceRegistry;
//! use crate::config::ResourceConfig;
//!
//! let registry = ResourceRegistry::from_inventory(ResourceConfig::from_env());
//! let definition = registry.controller("users");
//! ```

pub mod errors;
pub mod registry;
pub mod validation;
