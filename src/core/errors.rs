//! # API Error Handling System
//!
//! 리소스 요청 처리 중 발생하는 모든 실패를 구조화된 에러로 표현하는 모듈입니다.
//! 모든 실패 경로는 최종적으로 [`ErrorReport`]를 가진 [`ApiError`]로 끝나며,
//! `actix_web::ResponseError` 구현을 통해 일관된 JSON 응답으로 변환됩니다.
//!
//! ## 에러 분류
//!
//! | ApiError | HTTP Status | 사용 시나리오 |
//! |----------|-------------|---------------|
//! | `NotFound` | 404 Not Found | 기본 키 조회 결과가 없음 |
//! | `BadRequest` | 400 Bad Request | 쓰기 요청의 본문 누락/파싱 불가 |
//! | `Validation` | 400 Bad Request | 비즈니스 규칙 검증 실패 (필드 목록 포함) |
//! | `IntegrityFailure` | 500 Internal Server Error | 쓰기 직후 재조회 결과가 없음 |
//! | `Configuration` | 500 Internal Server Error | 모델/엔티티 타입 미등록 (배포 설정 결함) |
//! | `DatabaseError` | 500 Internal Server Error | MongoDB 연산 실패 |
//! | `InternalError` | 500 Internal Server Error | 예상치 못한 오류 |
//!
//! ## 응답 형식
//!
//! ```json
//! {
//!   "error": {
//!     "httpStatusCode": 404,
//!     "statusText": "Not Found",
//!     "title": "Resource not available.",
//!     "devMessage": "The resource you requested is not available.",
//!     "code": "43758093745021",
//!     "more": null,
//!     "validationList": []
//!   }
//! }
//! ```
//!
//! ## 사용 패턴
//!
//! ```rust,ignore
//! use crate::core::errors::{ApiError, ErrorList};
//!
//! if result.count_results() == 0 {
//!     return Err(ApiError::not_found(
//!         "Resource not available.",
//!         ErrorList::new()
//!             .dev("The resource you requested is not available.")
//!             .code("43758093745021"),
//!     ));
//! }
//! ```

use actix_web::http::StatusCode;
use actix_web::HttpResponse;
use serde::Serialize;
use serde_json::{json, Value};
use thiserror::Error;

use crate::core::validation::{MessageBag, ValidationException, ValidationList};

/// 에러 생성 시 전달되는 부가 정보
///
/// 원래의 `['dev' => ..., 'code' => ..., 'more' => ...]` 형태 목록을 타입으로 옮긴 것입니다.
/// 빠진 키는 `None`으로 남습니다.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ErrorList {
    pub dev: Option<String>,
    pub code: Option<String>,
    pub more: Option<Value>,
}

impl ErrorList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn dev(mut self, dev: impl Into<String>) -> Self {
        self.dev = Some(dev.into());
        self
    }

    pub fn code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }

    pub fn more(mut self, more: impl Into<Value>) -> Self {
        self.more = Some(more.into());
        self
    }
}

/// 하나의 실패를 설명하는 불변 구조체
///
/// 개발자용 진단 메시지, 기계 판독용 코드, 부가 컨텍스트, 필드 단위 검증 실패 목록과
/// HTTP 상태 코드를 담습니다. 생성 이후에는 `with_*` 빌더로만 값을 채웁니다.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ErrorReport {
    pub title: String,
    pub dev_message: String,
    pub code: Option<String>,
    pub more: Option<Value>,
    pub validation_list: ValidationList,
    pub http_status: u16,
}

impl ErrorReport {
    /// 에러 목록과 메시지 소스로 리포트를 생성합니다
    ///
    /// `dev`가 명시되지 않은 경우 `messages`에 수집된 검증 메시지를 개발자 메시지로
    /// 사용합니다. 메시지 소스는 항상 호출자가 직접 넘겨야 하며, 비어 있다면
    /// 개발자 메시지도 빈 문자열로 남습니다.
    ///
    /// # Arguments
    ///
    /// * `error_list` - `dev`/`code`/`more` 부가 정보
    /// * `messages` - 직전 검증 단계가 수집한 메시지
    ///
    /// # Examples
    ///
    /// ```rust,ignore
    /// let mut bag = MessageBag::new();
    /// bag.push("email은(는) 필수입니다");
    ///
    /// let report = ErrorReport::new(ErrorList::new().code("E100"), &bag);
    /// assert_eq!(report.dev_message, "email은(는) 필수입니다");
    /// ```
    pub fn new(error_list: ErrorList, messages: &MessageBag) -> Self {
        let ErrorList { dev, code, more } = error_list;

        Self {
            title: String::new(),
            dev_message: dev.unwrap_or_else(|| messages.get_string()),
            code,
            more,
            validation_list: ValidationList::new(),
            http_status: StatusCode::INTERNAL_SERVER_ERROR.as_u16(),
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_status(mut self, status: StatusCode) -> Self {
        self.http_status = status.as_u16();
        self
    }

    pub fn with_validation_list(mut self, validation_list: ValidationList) -> Self {
        self.validation_list = validation_list;
        self
    }

    pub fn status(&self) -> StatusCode {
        StatusCode::from_u16(self.http_status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }
}

/// 애플리케이션 전역 에러 타입
///
/// 리소스 컨트롤러, 엔티티, 트랜잭션 경계에서 발생하는 모든 실패를 표현합니다.
/// 컨트롤러는 "결과 없음" 조건만 `NotFound`/`IntegrityFailure`로 변환하고,
/// 나머지 에러는 변형 없이 상위 계층으로 전파됩니다.
#[derive(Error, Debug)]
pub enum ApiError {
    /// 기본 키 조회 결과가 없음 (404 Not Found)
    #[error("{}", .0.title)]
    NotFound(Box<ErrorReport>),

    /// 쓰기 요청 본문 누락 또는 파싱 불가 (400 Bad Request)
    #[error("{}", .0.title)]
    BadRequest(Box<ErrorReport>),

    /// 쓰기는 성공했지만 직후 재조회에서 레코드를 찾지 못함 (500 Internal Server Error)
    ///
    /// 사용자 오류가 아니라 쓰기 경로와 읽기 경로 사이의 정합성 결함을 의미합니다.
    #[error("{}", .0.title)]
    IntegrityFailure(Box<ErrorReport>),

    /// 비즈니스 규칙 검증 실패 (400 Bad Request)
    #[error(transparent)]
    Validation(#[from] ValidationException),

    /// 모델/엔티티 타입 해석 실패 (500 Internal Server Error)
    ///
    /// 요청 단위의 문제가 아니라 배포 설정 결함이므로 재시도하지 않습니다.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// 데이터베이스 관련 에러 (500 Internal Server Error)
    #[error("Database error: {0}")]
    DatabaseError(String),

    /// 내부 서버 에러 (500 Internal Server Error)
    #[error("Internal server error: {0}")]
    InternalError(String),
}

impl ApiError {
    pub fn not_found(title: impl Into<String>, error_list: ErrorList) -> Self {
        ApiError::NotFound(Box::new(Self::http_report(StatusCode::NOT_FOUND, title, error_list)))
    }

    pub fn bad_request(title: impl Into<String>, error_list: ErrorList) -> Self {
        ApiError::BadRequest(Box::new(Self::http_report(StatusCode::BAD_REQUEST, title, error_list)))
    }

    pub fn integrity_failure(title: impl Into<String>, error_list: ErrorList) -> Self {
        ApiError::IntegrityFailure(Box::new(Self::http_report(
            StatusCode::INTERNAL_SERVER_ERROR,
            title,
            error_list,
        )))
    }

    // 컨트롤러가 직접 던지는 에러는 항상 dev 메시지를 명시하므로 빈 메시지 소스를 넘깁니다.
    fn http_report(status: StatusCode, title: impl Into<String>, error_list: ErrorList) -> ErrorReport {
        ErrorReport::new(error_list, &MessageBag::new())
            .with_title(title)
            .with_status(status)
    }

    /// 출력 경계로 넘길 리포트를 반환합니다
    ///
    /// 리포트를 가지지 않는 변형은 에러 메시지를 개발자 메시지로 하는 500 리포트로
    /// 변환됩니다.
    pub fn report(&self) -> ErrorReport {
        match self {
            ApiError::NotFound(report)
            | ApiError::BadRequest(report)
            | ApiError::IntegrityFailure(report) => (**report).clone(),
            ApiError::Validation(exception) => exception.report().clone(),
            other => ErrorReport::new(ErrorList::new().dev(other.to_string()), &MessageBag::new())
                .with_title("Internal Server Error")
                .with_status(StatusCode::INTERNAL_SERVER_ERROR),
        }
    }
}

/// 구조화된 에러를 와이어 형식으로 기록합니다
///
/// `ApiError`와 `ValidationException::send()`가 공유하는 출력 경계입니다.
pub fn error_response(status: StatusCode, report: &ErrorReport) -> HttpResponse {
    HttpResponse::build(status).json(json!({
        "error": {
            "httpStatusCode": status.as_u16(),
            "statusText": status.canonical_reason().unwrap_or("Unknown"),
            "title": report.title,
            "devMessage": report.dev_message,
            "code": report.code,
            "more": report.more,
            "validationList": report.validation_list,
        }
    }))
}

impl actix_web::ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::NotFound(report)
            | ApiError::BadRequest(report)
            | ApiError::IntegrityFailure(report) => report.status(),
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        if let ApiError::Validation(exception) = self {
            return exception.send();
        }

        let status = self.status_code();
        if status.is_server_error() {
            log::error!("❌ {}", self);
        }

        error_response(status, &self.report())
    }
}

/// 편의성을 위한 Result 타입 별칭
pub type ApiResult<T> = Result<T, ApiError>;

/// 외부 라이브러리 에러를 ApiError로 변환하는 확장 trait
pub trait ErrorContext<T> {
    /// 컨텍스트 정보와 함께 에러를 변환합니다.
    fn context(self, msg: &str) -> ApiResult<T>;

    /// 클로저를 사용하여 지연 평가된 컨텍스트를 제공합니다.
    fn with_context<F>(self, f: F) -> ApiResult<T>
    where
        F: FnOnce() -> String;
}

impl<T, E> ErrorContext<T> for Result<T, E>
where
    E: std::fmt::Display,
{
    fn context(self, msg: &str) -> ApiResult<T> {
        self.map_err(|e| ApiError::InternalError(format!("{}: {}", msg, e)))
    }

    fn with_context<F>(self, f: F) -> ApiResult<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| ApiError::InternalError(format!("{}: {}", f(), e)))
    }
}
