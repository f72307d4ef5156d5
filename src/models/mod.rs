//! # 데이터 모델 모듈
//!
//! 애플리케이션에서 사용하는 데이터 구조체(struct)들을 정의합니다.
//! - `post`: 게시물/해시태그 엔티티와 요청·응답 DTO
//! - `page`: 페이지 요청과 페이지 정보
//! - `student`: 학생 엔티티 (쿼리 메서드 예제용)
//! - `department`: 부서/사원 엔티티 (연관관계 예제용)
//!
//! `pub use X::*;`로 재공개하여 `crate::models::PostDetail`처럼 짧게 접근합니다.

pub mod department;
pub mod page;
pub mod post;
pub mod student;

pub use department::*;
pub use page::*;
pub use post::*;
pub use student::*;
