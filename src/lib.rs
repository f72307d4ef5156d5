//! # post-board
//!
//! 해시태그가 달린 게시물 CRUD API와, 쿼리 메서드/연관관계 예제용 학생·부서·사원 스키마.
//!
//! 계층 구조 (요청은 위에서 아래로, 응답 DTO는 아래에서 위로):
//! - `routes`: HTTP 요청 → 서비스 호출, 에러 → 상태 코드
//! - `services`: DTO 변환, 페이지 계산, 트랜잭션
//! - `db`: SQL 쿼리 (리포지토리)
//! - `models`: 엔티티와 요청/응답 구조체

pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod routes;
pub mod services;
