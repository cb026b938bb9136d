//! 공통 유틸리티 함수 모듈
//!
//! 애플리케이션 전체에서 사용되는 공통 유틸리티 함수들을 제공합니다.
//!
//! # Modules
//!
//! - [`string_utils`] - 필수 값 검증, 타입 이름/리소스 이름 변환
//! - [`display_terminal`] - 레지스트리 초기화 터미널 출력
//!
//! # Examples
//!
//! ```rust,ignore
//! use crate::utils::string_utils::validate_required_string;
//! use crate::utils::display_terminal::print_boxed_title;
//!
//! let id = validate_required_string("  42  ", "id")?;
//! print_boxed_title("Registry Initialized");
//! ```

pub mod display_terminal;
pub mod string_utils;
