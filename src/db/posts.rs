//! # 게시물 데이터베이스 쿼리 모듈
//!
//! `posts` 테이블에 대한 CRUD 쿼리 함수들입니다.
//!
//! 게시물 하나를 읽는 함수가 두 개 있습니다:
//! - `find_post`: 게시물 행만 읽습니다 (해시태그가 필요 없을 때, 지연 로딩에 해당)
//! - `find_post_with_tags`: `LEFT JOIN` 한 번으로 게시물과 해시태그를 함께 읽습니다
//!   (즉시 로딩). 태그마다 쿼리를 한 번씩 더 날리는 N+1 문제가 생기지 않습니다.
//!
//! 호출하는 쪽이 필요에 따라 둘 중 하나를 직접 고릅니다.

use crate::error::AppError;
use crate::models::*;
use sqlx::{SqliteConnection, SqlitePool};

/// 전체 게시물 수
pub async fn count_posts(conn: &mut SqliteConnection) -> Result<i64, AppError> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM posts")
        .fetch_one(&mut *conn)
        .await?;

    Ok(count)
}

/// 한 페이지 분량의 게시물 요약을 id 오름차순으로 조회합니다.
///
/// 해시태그 개수는 상관 서브쿼리로 같은 쿼리 안에서 계산합니다.
/// `page`는 서비스에서 이미 보정된(normalize) 값이어야 합니다.
pub async fn find_post_page(
    conn: &mut SqliteConnection,
    page: &PageRequest,
) -> Result<Vec<PostSummary>, AppError> {
    let posts = sqlx::query_as::<_, PostSummary>(
        r#"
        SELECT p.id, p.title, p.writer, p.created_at,
               (SELECT COUNT(*) FROM hash_tags h WHERE h.post_id = p.id) AS hash_tag_count
        FROM posts p
        ORDER BY p.id
        LIMIT ? OFFSET ?
        "#,
    )
    .bind(page.size)
    .bind(page.offset())
    .fetch_all(&mut *conn)
    .await?;

    Ok(posts)
}

/// 게시물 행만 조회합니다. 해시태그는 읽지 않습니다.
pub async fn find_post(conn: &mut SqliteConnection, id: i64) -> Result<Option<Post>, AppError> {
    let post = sqlx::query_as::<_, Post>(
        "SELECT id, title, content, writer, created_at, updated_at FROM posts WHERE id = ?",
    )
    .bind(id)
    .fetch_optional(&mut *conn)
    .await?;

    Ok(post)
}

// find_post_with_tags의 JOIN 결과 한 행.
// 태그가 없는 게시물은 LEFT JOIN 때문에 tag_id/tag_name이 NULL인 행 하나가 나옵니다.
#[derive(sqlx::FromRow)]
struct PostTagRow {
    id: i64,
    title: String,
    content: Option<String>,
    writer: String,
    created_at: String,
    updated_at: String,
    tag_id: Option<i64>,
    tag_name: Option<String>,
}

/// 게시물과 모든 해시태그를 쿼리 한 번으로 조회합니다.
///
/// ```sql
/// posts (1) ──< hash_tags (N)      -- LEFT JOIN, 태그 id 오름차순
/// ```
pub async fn find_post_with_tags(
    conn: &mut SqliteConnection,
    id: i64,
) -> Result<Option<PostWithTags>, AppError> {
    let rows = sqlx::query_as::<_, PostTagRow>(
        r#"
        SELECT p.id, p.title, p.content, p.writer, p.created_at, p.updated_at,
               h.id AS tag_id, h.tag_name
        FROM posts p
        LEFT JOIN hash_tags h ON h.post_id = p.id
        WHERE p.id = ?
        ORDER BY h.id
        "#,
    )
    .bind(id)
    .fetch_all(&mut *conn)
    .await?;

    let mut rows = rows.into_iter();
    let Some(first) = rows.next() else {
        return Ok(None);
    };

    let post = Post {
        id: first.id,
        title: first.title,
        content: first.content,
        writer: first.writer,
        created_at: first.created_at,
        updated_at: first.updated_at,
    };

    let hash_tags: Vec<HashTag> = std::iter::once((first.tag_id, first.tag_name))
        .chain(rows.map(|row| (row.tag_id, row.tag_name)))
        .filter_map(|(tag_id, tag_name)| match (tag_id, tag_name) {
            (Some(tag_id), Some(tag_name)) => Some(HashTag {
                id: tag_id,
                tag_name,
                post_id: post.id,
            }),
            _ => None,
        })
        .collect();

    Ok(Some(PostWithTags { post, hash_tags }))
}

/// 새 게시물을 저장하고 발급된 id를 반환합니다.
///
/// id는 `AUTOINCREMENT`라서 삭제된 게시물의 id도 다시 쓰이지 않습니다.
pub async fn insert_post(
    conn: &mut SqliteConnection,
    writer: &str,
    title: &str,
    content: Option<&str>,
    now: &str,
) -> Result<i64, AppError> {
    let result = sqlx::query(
        r#"
        INSERT INTO posts (title, content, writer, created_at, updated_at)
        VALUES (?, ?, ?, ?, ?)
        "#,
    )
    .bind(title)
    .bind(content)
    .bind(writer)
    .bind(now)
    .bind(now)
    .execute(&mut *conn)
    .await?;

    Ok(result.last_insert_rowid())
}

/// 제목/본문 중 값이 있는 필드만 바꾸고 `updated_at`을 갱신합니다.
///
/// `COALESCE(?, title)`: 바인딩 값이 NULL이면 기존 값을 유지합니다.
/// id, writer, created_at은 건드리지 않습니다.
///
/// ## 반환값
/// - `true`: 수정됨
/// - `false`: 해당 id의 게시물이 없음
pub async fn update_post(
    conn: &mut SqliteConnection,
    id: i64,
    title: Option<&str>,
    content: Option<&str>,
    now: &str,
) -> Result<bool, AppError> {
    let result = sqlx::query(
        r#"
        UPDATE posts
        SET title = COALESCE(?, title),
            content = COALESCE(?, content),
            updated_at = ?
        WHERE id = ?
        "#,
    )
    .bind(title)
    .bind(content)
    .bind(now)
    .bind(id)
    .execute(&mut *conn)
    .await?;

    Ok(result.rows_affected() > 0)
}

/// 게시물 행을 삭제합니다. 해시태그가 남아 있으면 외래 키 제약으로 실패합니다.
pub async fn delete_post(conn: &mut SqliteConnection, id: i64) -> Result<bool, AppError> {
    let result = sqlx::query("DELETE FROM posts WHERE id = ?")
        .bind(id)
        .execute(&mut *conn)
        .await?;

    Ok(result.rows_affected() > 0)
}

/// 샘플 게시물 `count`개를 한 트랜잭션으로 저장합니다. 저장한 개수를 반환합니다.
pub async fn seed_posts(pool: &SqlitePool, count: u32) -> Result<u32, AppError> {
    let mut tx = pool.begin().await?;
    let now = super::timestamp_now();

    for i in 0..count {
        let writer = format!("writer{}", i);
        let title = format!("sample title {}", i);
        let content = format!("sample content {}", i);
        insert_post(&mut tx, &writer, &title, Some(content.as_str()), &now).await?;
    }

    tx.commit().await?;
    tracing::info!("Seeded {} sample posts", count);
    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{insert_hash_tags, test_pool};

    #[tokio::test]
    async fn eager_read_returns_post_and_tags_in_order() {
        let pool = test_pool().await;
        let mut conn = pool.acquire().await.unwrap();
        let now = crate::db::timestamp_now();

        let id = insert_post(&mut conn, "kim", "hello", Some("body"), &now).await.unwrap();
        insert_hash_tags(&mut conn, id, &["rust".to_string(), "sqlx".to_string()])
            .await
            .unwrap();

        let loaded = find_post_with_tags(&mut conn, id).await.unwrap().unwrap();
        assert_eq!(loaded.post.title, "hello");
        let names: Vec<_> = loaded.hash_tags.iter().map(|t| t.tag_name.as_str()).collect();
        assert_eq!(names, vec!["rust", "sqlx"]);
        assert!(loaded.hash_tags.iter().all(|t| t.post_id == id));
    }

    #[tokio::test]
    async fn eager_read_of_untagged_post_has_no_tags() {
        let pool = test_pool().await;
        let mut conn = pool.acquire().await.unwrap();
        let now = crate::db::timestamp_now();

        let id = insert_post(&mut conn, "kim", "plain", None, &now).await.unwrap();

        let loaded = find_post_with_tags(&mut conn, id).await.unwrap().unwrap();
        assert!(loaded.hash_tags.is_empty());
        assert!(find_post_with_tags(&mut conn, id + 1).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn update_keeps_absent_fields() {
        let pool = test_pool().await;
        let mut conn = pool.acquire().await.unwrap();
        let now = crate::db::timestamp_now();

        let id = insert_post(&mut conn, "kim", "before", Some("body"), &now).await.unwrap();
        assert!(update_post(&mut conn, id, Some("after"), None, &now).await.unwrap());

        let post = find_post(&mut conn, id).await.unwrap().unwrap();
        assert_eq!(post.title, "after");
        assert_eq!(post.content.as_deref(), Some("body"));
        assert!(!update_post(&mut conn, 999, Some("x"), None, &now).await.unwrap());
    }

    #[tokio::test]
    async fn foreign_key_blocks_deleting_tagged_post() {
        let pool = test_pool().await;
        let mut conn = pool.acquire().await.unwrap();
        let now = crate::db::timestamp_now();

        let id = insert_post(&mut conn, "kim", "tagged", None, &now).await.unwrap();
        insert_hash_tags(&mut conn, id, &["a".to_string()]).await.unwrap();

        assert!(delete_post(&mut conn, id).await.is_err());
        assert!(find_post(&mut conn, id).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn seeding_fills_pages() {
        let pool = test_pool().await;
        assert_eq!(seed_posts(&pool, 25).await.unwrap(), 25);

        let mut conn = pool.acquire().await.unwrap();
        assert_eq!(count_posts(&mut conn).await.unwrap(), 25);

        let last_page = find_post_page(&mut conn, &PageRequest::new(3, 10)).await.unwrap();
        assert_eq!(last_page.len(), 5);
        assert!(last_page.windows(2).all(|w| w[0].id < w[1].id));
    }
}
