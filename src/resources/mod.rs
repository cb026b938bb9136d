//! # 리소스 정의
//!
//! 서버가 제공하는 리소스들입니다. 각 모듈은 모델, (선택) 커스텀 엔티티, 컨트롤러 훅을
//! 정의하고 `inventory::submit!`으로 레지스트리에 등록합니다.
//!
//! | 경로 | 모델 | 엔티티 | 트랜잭션 |
//! |------|------|--------|----------|
//! | `/api/v1/users` | `UserModel` | `UserEntity` | ✅ |
//! | `/api/v1/notes` | `NoteModel` | `DocumentEntity` (기본) | ❌ |

pub mod notes;
pub mod users;
