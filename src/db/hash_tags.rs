//! # 해시태그 데이터베이스 쿼리 모듈
//!
//! 게시물에 딸린 해시태그를 관리하는 SQL 쿼리 함수들입니다.
//!
//! ## 테이블 구조
//! - `hash_tags`: (id, tag_name, post_id) — `post_id`는 `posts.id`를 참조 (N:1)

use crate::error::AppError;
use crate::models::*;
use sqlx::SqliteConnection;

/// 게시물 하나에 해시태그들을 순서대로 저장합니다.
///
/// 게시물 등록과 같은 트랜잭션 안에서 호출되어야 합니다.
/// 중간에 실패하면 트랜잭션 전체가 롤백되어 게시물도 남지 않습니다.
pub async fn insert_hash_tags(
    conn: &mut SqliteConnection,
    post_id: i64,
    tag_names: &[String],
) -> Result<(), AppError> {
    for tag_name in tag_names {
        sqlx::query("INSERT INTO hash_tags (tag_name, post_id) VALUES (?, ?)")
            .bind(tag_name.trim())
            .bind(post_id)
            .execute(&mut *conn)
            .await?;
    }

    Ok(())
}

/// 게시물의 해시태그를 id 오름차순으로 조회합니다 (별도 쿼리).
pub async fn find_hash_tags_by_post(
    conn: &mut SqliteConnection,
    post_id: i64,
) -> Result<Vec<HashTag>, AppError> {
    let tags = sqlx::query_as::<_, HashTag>(
        "SELECT id, tag_name, post_id FROM hash_tags WHERE post_id = ? ORDER BY id",
    )
    .bind(post_id)
    .fetch_all(&mut *conn)
    .await?;

    Ok(tags)
}

/// 게시물에 달린 해시태그 수. 삭제 전에 자식 행이 있는지 확인할 때 씁니다.
pub async fn count_hash_tags_by_post(
    conn: &mut SqliteConnection,
    post_id: i64,
) -> Result<i64, AppError> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM hash_tags WHERE post_id = ?")
        .bind(post_id)
        .fetch_one(&mut *conn)
        .await?;

    Ok(count)
}
