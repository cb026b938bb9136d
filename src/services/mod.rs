//! # 서비스 계층
//!
//! 요청 처리 중 리소스 이름을 실제 모델/엔티티 인스턴스로 바꾸는 서비스를 제공합니다.
//!
//! - [`resolver`] - 레지스트리 기반 모델/엔티티 해석

pub mod resolver;

pub use resolver::ResourceResolver;
