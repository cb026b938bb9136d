//! 응답 봉투 렌더링
//!
//! | Reply | 상태 코드 | 본문 |
//! |-------|-----------|------|
//! | `Collection` | 200 OK | `{"users": [...]}` |
//! | `Single` | 200 OK | `{"user": {...}}` |
//! | `Created` | 201 Created | `{"user": {...}}` |
//! | `NoContent` | 204 No Content | 없음 |

use actix_web::HttpResponse;
use serde_json::{Map, Value};

use crate::handlers::controller::{NameForm, Reply, ResourceNames};

/// 컨트롤러 응답을 HTTP 응답으로 변환합니다
pub fn render(reply: Reply, names: &ResourceNames) -> HttpResponse {
    match reply {
        Reply::Collection(results) => HttpResponse::Ok().json(envelope(
            names.envelope_key(NameForm::Plural),
            Value::Array(results.into_records()),
        )),
        Reply::Single(record) => HttpResponse::Ok().json(envelope(names.envelope_key(NameForm::Singular), record)),
        Reply::Created(record) => {
            HttpResponse::Created().json(envelope(names.envelope_key(NameForm::Singular), record))
        }
        Reply::NoContent => HttpResponse::NoContent().finish(),
    }
}

fn envelope(key: String, value: Value) -> Value {
    let mut body = Map::new();
    body.insert(key, value);
    Value::Object(body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entity::ResultSet;
    use actix_web::body::to_bytes;
    use actix_web::http::StatusCode;
    use serde_json::json;

    fn names() -> ResourceNames {
        ResourceNames::new("Note")
    }

    #[actix_web::test]
    async fn test_collection_uses_plural_key() {
        let reply = Reply::Collection(ResultSet::new(vec![json!({ "id": "1" })]));

        let response = render(reply, &names());
        assert_eq!(response.status(), StatusCode::OK);

        let body = to_bytes(response.into_body()).await.unwrap();
        let value: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(value, json!({ "notes": [{ "id": "1" }] }));
    }

    #[actix_web::test]
    async fn test_created_uses_singular_key_and_201() {
        let response = render(Reply::Created(json!({ "id": "1" })), &names());
        assert_eq!(response.status(), StatusCode::CREATED);

        let body = to_bytes(response.into_body()).await.unwrap();
        let value: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(value["note"]["id"], "1");
    }

    #[test]
    fn test_no_content() {
        assert_eq!(render(Reply::NoContent, &names()).status(), StatusCode::NO_CONTENT);
    }
}
