//! 리소스 해석 설정 모듈
//!
//! 모델/엔티티/컨트롤러의 네임스페이스 규칙을 관리합니다.
//! 서버 시작 시 한 번 로드되어 `Arc<ResourceConfig>`로 공유되며 이후 변경되지 않습니다.
//!
//! # Environment Variables
//!
//! ```bash
//! NAMESPACE_MODELS="models::"
//! NAMESPACE_ENTITIES="entities::"
//! NAMESPACE_DEFAULT_ENTITY="entities::DocumentEntity"
//! NAMESPACE_CONTROLLERS="resource_api::resources::"
//! ```

use std::env;

/// 네임스페이스 규칙
///
/// 레지스트리 키는 `<namespace><TypeName>` 형태의 정규화된 이름입니다.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamespaceConfig {
    /// 모델 네임스페이스 (예: `models::` → `models::User`)
    pub models: String,
    /// 엔티티 네임스페이스 (예: `entities::` → `entities::UserEntity`)
    pub entities: String,
    /// 커스텀 엔티티가 없을 때 사용할 기본 엔티티의 정규화된 이름
    pub default_entity: String,
    /// 컨트롤러 타입 이름에서 제거할 모듈 경로 접두사
    pub controllers: String,
}

impl Default for NamespaceConfig {
    fn default() -> Self {
        Self {
            models: "models::".to_string(),
            entities: "entities::".to_string(),
            default_entity: "entities::DocumentEntity".to_string(),
            controllers: concat!(env!("CARGO_CRATE_NAME"), "::resources::").to_string(),
        }
    }
}

/// 리소스 해석 설정
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResourceConfig {
    pub namespaces: NamespaceConfig,
}

impl ResourceConfig {
    /// 환경 변수에서 설정을 로드합니다. 설정되지 않은 값은 기본값을 사용합니다.
    pub fn from_env() -> Self {
        let defaults = NamespaceConfig::default();

        Self {
            namespaces: NamespaceConfig {
                models: env::var("NAMESPACE_MODELS").unwrap_or(defaults.models),
                entities: env::var("NAMESPACE_ENTITIES").unwrap_or(defaults.entities),
                default_entity: env::var("NAMESPACE_DEFAULT_ENTITY").unwrap_or(defaults.default_entity),
                controllers: env::var("NAMESPACE_CONTROLLERS").unwrap_or(defaults.controllers),
            },
        }
    }

    /// `<models><name>` 형태의 모델 이름
    pub fn model_name(&self, name: &str) -> String {
        format!("{}{}", self.namespaces.models, name)
    }

    /// `<entities><name>` 형태의 엔티티 이름
    pub fn entity_name(&self, name: &str) -> String {
        format!("{}{}", self.namespaces.entities, name)
    }

    /// 리소스 단수형 이름에 대응하는 커스텀 엔티티 이름 (`<entities><Singular>Entity`)
    pub fn custom_entity_name(&self, singular: &str) -> String {
        self.entity_name(&format!("{}Entity", singular))
    }
}
