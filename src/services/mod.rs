//! # 서비스 계층
//!
//! - `posts`: 게시물 목록/상세/등록/수정/삭제. 트랜잭션 경계가 여기 있습니다.

pub mod posts;
