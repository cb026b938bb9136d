//! HTTP 경계의 데이터 전송 객체
//!
//! - [`request`] - 요청 본문에서 `Payload` 추출
//! - [`response`] - `Reply`를 JSON 봉투 응답으로 렌더링

pub mod request;
pub mod response;

pub use request::extract_payload;
pub use response::render;
