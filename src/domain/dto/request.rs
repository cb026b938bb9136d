//! 요청 본문 추출
//!
//! 쓰기 요청의 본문은 JSON 객체이며, 단수형 봉투 키(`{"user": {...}}`)로 감싸져 있을 수도 있습니다.

use serde_json::Value;

use crate::domain::model::Payload;

/// 요청 본문에서 레코드 필드를 추출합니다
///
/// 봉투 키가 있으면 그 안의 객체를, 없으면 최상위 객체를 사용합니다.
/// 파싱할 수 없거나 객체가 아니거나 비어 있으면 `None`을 반환하며,
/// 컨트롤러는 이를 "본문 없음"으로 처리합니다.
///
/// # Arguments
///
/// * `body` - 원본 요청 본문
/// * `envelope_key` - 소문자로 시작하는 단수형 리소스 이름 (예: `user`)
///
/// # Examples
///
/// ```rust,ignore
/// let payload = extract_payload(br#"{"user": {"email": "a@b.c"}}"#, "user");
/// assert_eq!(payload.unwrap()["email"], "a@b.c");
/// ```
pub fn extract_payload(body: &[u8], envelope_key: &str) -> Option<Payload> {
    if body.is_empty() {
        return None;
    }

    let value: Value = serde_json::from_slice(body).ok()?;
    let mut object = match value {
        Value::Object(object) => object,
        _ => return None,
    };

    let payload = match object.remove(envelope_key) {
        Some(Value::Object(inner)) if object.is_empty() => inner,
        Some(other) => {
            // 봉투 키와 같은 이름의 일반 필드
            object.insert(envelope_key.to_string(), other);
            object
        }
        None => object,
    };

    if payload.is_empty() {
        None
    } else {
        Some(payload)
    }
}
