//! # Configuration Module
//!
//! 리소스 서비스의 설정 관리를 담당하는 모듈입니다.
//! 환경 변수 기반의 설정값들을 중앙집중식으로 관리합니다.
//!
//! ## 모듈 구성
//!
//! - [`data_config`] - 데이터베이스, 서버, 환경, Rate Limiting 설정
//! - [`resource_config`] - 모델/엔티티/컨트롤러 네임스페이스 규칙
//!
//! ## 사용 예제
//!
//! ```rust,ignore
//! use crate::config::{Environment, ServerConfig, ResourceConfig};
//!
//! let env = Environment::current();
//! let address = ServerConfig::bind_address();
//! let resources = ResourceConfig::from_env();
//! ```
//!
//! ## 환경 변수 설정 가이드
//!
//! ```bash
//! # 서버 설정
//! export HOST="0.0.0.0"
//! export PORT="8080"
//!
//! # MongoDB
//! export MONGODB_URI="mongodb://localhost:27017/?replicaSet=rs0"
//! export DATABASE_NAME="resource_api"
//!
//! # 네임스페이스
//! export NAMESPACE_MODELS="models::"
//! export NAMESPACE_DEFAULT_ENTITY="entities::DocumentEntity"
//! ```

pub mod data_config;
pub mod resource_config;

pub use data_config::*;
pub use resource_config::*;
