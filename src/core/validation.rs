//! # Validation Reporting
//!
//! "요청 형식은 올바르지만 비즈니스 규칙 검증에 실패한" 경우를 보고하는 표준 경로입니다.
//! 컨트롤러가 직접 던지는 HTTP 상태 에러와 구분되며, 항상 400 Bad Request로 응답하고
//! 필드 단위 검증 실패 목록을 함께 전달합니다.
//!
//! ## 구성
//!
//! - [`FieldViolation`] / [`ValidationList`] - 필드 단위 검증 실패 목록
//! - [`MessageBag`] - 검증 단계에서 수집한 메시지 소스 (항상 명시적으로 전달)
//! - [`ValidationException`] - 제목과 검증 목록을 가진 에러, `send()`로 응답 기록
//!
//! ## 사용 예제
//!
//! ```rust,ignore
//! use validator::Validate;
//!
//! if let Err(errors) = input.validate() {
//!     return Err(ValidationException::from_validation_errors("Invalid user", &errors).into());
//! }
//! ```

use actix_web::http::StatusCode;
use actix_web::HttpResponse;
use serde::Serialize;
use thiserror::Error;

use crate::core::errors::{error_response, ErrorList, ErrorReport};

/// 필드 하나의 검증 실패
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct FieldViolation {
    pub field: String,
    pub code: String,
    pub message: String,
}

impl FieldViolation {
    pub fn new(field: impl Into<String>, code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            code: code.into(),
            message: message.into(),
        }
    }
}

/// 순서가 유지되는 필드 검증 실패 목록
pub type ValidationList = Vec<FieldViolation>;

/// `validator` 크레이트의 검증 결과를 필드 이름 순으로 정렬된 목록으로 변환합니다
///
/// 메시지가 지정되지 않은 규칙은 규칙 코드를 메시지로 사용합니다.
pub fn violations_from(errors: &validator::ValidationErrors) -> ValidationList {
    let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
    fields.sort_by(|(a, _), (b, _)| a.cmp(b));

    fields
        .into_iter()
        .flat_map(|(field, field_errors)| {
            let field = field.to_string();
            field_errors.iter().map(move |error| {
                let message = error
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("{} 검증 실패: {}", field, error.code));
                FieldViolation::new(field.clone(), error.code.to_string(), message)
            })
        })
        .collect()
}

/// 검증 단계에서 수집된 메시지 모음
///
/// 명시적 개발자 메시지가 없는 [`ErrorReport`]의 대체 메시지 소스입니다.
/// 전역 상태가 아니라 요청을 처리하는 코드가 직접 만들어 넘깁니다.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MessageBag {
    messages: Vec<String>,
}

impl MessageBag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, message: impl Into<String>) {
        self.messages.push(message.into());
    }

    pub fn extend_from_violations(&mut self, violations: &[FieldViolation]) {
        self.messages
            .extend(violations.iter().map(|violation| violation.message.clone()));
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn messages(&self) -> &[String] {
        &self.messages
    }

    /// 수집된 메시지를 하나의 문자열로 합칩니다. 비어 있으면 빈 문자열입니다.
    pub fn get_string(&self) -> String {
        self.messages.join("; ")
    }
}

/// 비즈니스 규칙 검증 실패
///
/// [`ErrorReport`]를 감싸고 제목과 검증 목록을 설정합니다.
/// 훅(`before_save` 등)이나 모델 검증 단계에서 반환하면 남은 단계가 중단되고,
/// 트랜잭션 안이라면 롤백이 일어납니다.
///
/// # Examples
///
/// ```rust,ignore
/// let exception = ValidationException::new(
///     "Invalid user",
///     ErrorList::new().code("USR-001"),
///     vec![FieldViolation::new("email", "email", "유효한 이메일 주소를 입력해주세요")],
///     &bag,
/// );
///
/// return Err(exception.into());
/// ```
#[derive(Debug, Clone, Error)]
#[error("{}", .report.title)]
pub struct ValidationException {
    report: ErrorReport,
}

impl ValidationException {
    pub fn new(
        title: impl Into<String>,
        error_list: ErrorList,
        validation_list: ValidationList,
        messages: &MessageBag,
    ) -> Self {
        let report = ErrorReport::new(error_list, messages)
            .with_title(title)
            .with_validation_list(validation_list)
            .with_status(StatusCode::BAD_REQUEST);

        Self { report }
    }

    /// `validator` 검증 결과로부터 예외를 생성합니다
    ///
    /// 필드 메시지들이 메시지 소스가 되므로 개발자 메시지는 검증 메시지들을 합친 값이 됩니다.
    pub fn from_validation_errors(title: impl Into<String>, errors: &validator::ValidationErrors) -> Self {
        let violations = violations_from(errors);
        let mut bag = MessageBag::new();
        bag.extend_from_violations(&violations);

        Self::new(title, ErrorList::new(), violations, &bag)
    }

    pub fn report(&self) -> &ErrorReport {
        &self.report
    }

    pub fn validation_list(&self) -> &[FieldViolation] {
        &self.report.validation_list
    }

    /// 상태 코드를 400으로 고정하고 구조화된 에러를 출력 경계로 기록합니다
    pub fn send(&self) -> HttpResponse {
        error_response(StatusCode::BAD_REQUEST, &self.report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    #[derive(Validate)]
    struct SignupInput {
        #[validate(email(message = "유효한 이메일 주소를 입력해주세요"))]
        email: String,
        #[validate(length(min = 3))]
        username: String,
    }

    #[test]
    fn test_violations_are_sorted_by_field() {
        let input = SignupInput {
            email: "not-an-email".to_string(),
            username: "ab".to_string(),
        };
        let errors = input.validate().unwrap_err();

        let violations = violations_from(&errors);

        assert_eq!(violations.len(), 2);
        assert_eq!(violations[0].field, "email");
        assert_eq!(violations[0].message, "유효한 이메일 주소를 입력해주세요");
        assert_eq!(violations[1].field, "username");
        assert_eq!(violations[1].code, "length");
    }

    #[test]
    fn test_message_bag_joins_messages() {
        let mut bag = MessageBag::new();
        assert!(bag.is_empty());
        assert_eq!(bag.get_string(), "");

        bag.push("first");
        bag.push("second");

        assert_eq!(bag.messages().len(), 2);
        assert_eq!(bag.get_string(), "first; second");
    }

    #[test]
    fn test_exception_sets_title_and_validation_list() {
        let violations = vec![FieldViolation::new("email", "required", "email은(는) 필수입니다")];
        let exception = ValidationException::new(
            "Invalid user",
            ErrorList::new().code("USR-001"),
            violations.clone(),
            &MessageBag::new(),
        );

        assert_eq!(exception.to_string(), "Invalid user");
        assert_eq!(exception.report().title, "Invalid user");
        assert_eq!(exception.report().code.as_deref(), Some("USR-001"));
        assert_eq!(exception.validation_list(), violations.as_slice());
        assert_eq!(exception.report().http_status, 400);
    }

    #[test]
    fn test_from_validation_errors_uses_messages_as_dev_message() {
        let input = SignupInput {
            email: "bad".to_string(),
            username: "valid_name".to_string(),
        };
        let errors = input.validate().unwrap_err();

        let exception = ValidationException::from_validation_errors("Invalid user", &errors);

        assert_eq!(exception.report().dev_message, "유효한 이메일 주소를 입력해주세요");
        assert_eq!(exception.validation_list().len(), 1);
    }

    #[test]
    fn test_send_fixes_bad_request_status() {
        let exception = ValidationException::new("Invalid", ErrorList::new(), vec![], &MessageBag::new());

        assert_eq!(exception.send().status(), StatusCode::BAD_REQUEST);
    }
}
