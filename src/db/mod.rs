//! # 데이터베이스 접근 계층 (Repository Layer)
//!
//! 데이터베이스와 직접 상호작용하는 함수들을 모아둔 모듈입니다.
//! 서비스 계층(services/)과 라우트 핸들러(routes/)가 이 모듈의 함수를 호출합니다.
//!
//! 각 하위 모듈:
//! - `posts`: 게시물 조회/저장/수정/삭제, 목록 페이지 조회, 샘플 데이터 생성
//! - `hash_tags`: 게시물에 딸린 해시태그 쿼리
//! - `students`: 학생 테이블의 쿼리 메서드 모음
//! - `departments`: 부서/사원 연관관계 쿼리 (지연 vs 즉시 로딩)
//!
//! 게시물/해시태그 함수는 `&mut SqliteConnection`을 받습니다.
//! 서비스가 트랜잭션(`&mut tx`)이나 풀에서 빌린 연결(`&mut conn`)을 넘겨
//! 여러 쿼리를 한 트랜잭션으로 묶을 수 있게 하기 위함입니다.

pub mod departments;
pub mod hash_tags;
pub mod posts;
pub mod students;

pub use departments::*;
pub use hash_tags::*;
pub use posts::*;
pub use students::*;

use chrono::{SecondsFormat, Utc};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::str::FromStr;

/// SQLite 연결 풀을 만듭니다.
///
/// 외래 키 제약(`PRAGMA foreign_keys`)을 켜서 `hash_tags.post_id`의
/// `ON DELETE RESTRICT`가 실제로 동작하도록 합니다.
pub async fn connect(database_url: &str, max_connections: u32) -> Result<SqlitePool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .foreign_keys(true);

    SqlitePoolOptions::new()
        .max_connections(max_connections)
        .connect_with(options)
        .await
}

/// `./migrations` 폴더의 SQL 파일 중 아직 실행되지 않은 것을 순서대로 실행합니다.
pub async fn migrate(pool: &SqlitePool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await
}

/// DB에 저장하는 시각 문자열. 스키마의 기본값과 같은 형식입니다.
/// 예: `2024-05-01T09:30:00.123Z`
pub fn timestamp_now() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// 테스트용 인메모리 DB. 연결이 하나뿐이라 연결이 닫히지 않게 수명 제한을 끕니다.
#[cfg(test)]
pub async fn test_pool() -> SqlitePool {
    let options = SqliteConnectOptions::from_str("sqlite::memory:")
        .expect("valid sqlite url")
        .foreign_keys(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect_with(options)
        .await
        .expect("in-memory sqlite pool");

    migrate(&pool).await.expect("migrations apply");
    pool
}
