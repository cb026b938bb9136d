//! # 문자열 유틸리티
//!
//! 경로 파라미터 검증과 리소스 이름 변환에 사용하는 공통 함수들입니다.

use crate::core::errors::{ApiError, ApiResult, ErrorList};

/// 필수 문자열을 검증하고 앞뒤 공백을 제거합니다
///
/// # Arguments
///
/// * `value` - 검증할 문자열
/// * `field_name` - 에러 메시지에 사용할 필드 이름
///
/// # Errors
///
/// 공백만 있거나 비어 있으면 `ApiError::BadRequest`를 반환합니다.
///
/// # Examples
///
/// ```rust,ignore
/// let id = validate_required_string("  42 ", "id")?;
/// assert_eq!(id, "42");
/// ```
pub fn validate_required_string(value: &str, field_name: &str) -> ApiResult<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ApiError::bad_request(
            format!("{}은(는) 필수입니다", field_name),
            ErrorList::new().dev(format!("Missing required value: {}", field_name)),
        ));
    }
    Ok(trimmed.to_string())
}

/// 정규화된 타입 이름에서 마지막 경로 세그먼트를 반환합니다
///
/// 제네릭 인자는 무시합니다 (`a::b::Foo<c::Bar>` → `Foo`).
pub fn last_path_segment(type_name: &str) -> &str {
    let without_generics = type_name.split('<').next().unwrap_or(type_name);
    without_generics.rsplit("::").next().unwrap_or(without_generics)
}

/// 첫 글자만 소문자로 바꿉니다 (`BlogPost` → `blogPost`)
pub fn lowercase_first(value: &str) -> String {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_required_string() {
        // 성공 케이스
        assert_eq!(validate_required_string("Hello", "id").unwrap(), "Hello");
        assert_eq!(validate_required_string("  World  ", "id").unwrap(), "World");

        // 실패 케이스
        assert!(validate_required_string("", "id").is_err());
        assert!(matches!(
            validate_required_string("\t\n", "id"),
            Err(ApiError::BadRequest(_))
        ));
    }

    #[test]
    fn test_last_path_segment() {
        assert_eq!(last_path_segment("resource_api::resources::users::UserController"), "UserController");
        assert_eq!(last_path_segment("NoteController"), "NoteController");
        assert_eq!(last_path_segment("a::Wrapper<b::Inner>"), "Wrapper");
    }

    #[test]
    fn test_lowercase_first() {
        assert_eq!(lowercase_first("User"), "user");
        assert_eq!(lowercase_first("BlogPost"), "blogPost");
        assert_eq!(lowercase_first(""), "");
    }
}
