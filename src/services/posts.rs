//! # 게시물 서비스
//!
//! 라우트 핸들러와 DB 쿼리 사이에서 다음을 담당합니다:
//! - 엔티티 → 응답 DTO 변환 (엔티티는 이 모듈 밖으로 나가지 않습니다)
//! - 페이지 요청 보정과 페이지 정보 계산
//! - 등록/수정/삭제를 트랜잭션 하나로 묶기
//!
//! ## 트랜잭션
//! `pool.begin()`으로 얻은 `Transaction`은 `commit()` 없이 drop되면 롤백됩니다.
//! 함수 중간에 `?`로 빠져나가면 그 시점까지의 쓰기는 모두 취소됩니다.

use crate::{db, error::AppError, models::*};
use sqlx::SqlitePool;
use validator::Validate;

/// 게시물 목록을 페이지 단위로 조회합니다 (id 오름차순).
pub async fn list_posts(
    pool: &SqlitePool,
    page: PageRequest,
    max_page_size: i64,
) -> Result<PostListResponse, AppError> {
    let page = page.normalize(max_page_size);
    let mut conn = pool.acquire().await?;

    let total_count = db::count_posts(&mut conn).await?;
    let posts: Vec<PostListItem> = db::find_post_page(&mut conn, &page)
        .await?
        .into_iter()
        .map(PostListItem::from)
        .collect();

    Ok(PostListResponse {
        count: posts.len(),
        pagination: PageInfo::new(&page, total_count),
        posts,
    })
}

/// 게시물 상세 조회. 해시태그까지 JOIN 한 번으로 읽습니다.
pub async fn get_detail(pool: &SqlitePool, id: i64) -> Result<PostDetail, AppError> {
    let mut conn = pool.acquire().await?;

    db::find_post_with_tags(&mut conn, id)
        .await?
        .map(PostDetail::from)
        .ok_or(AppError::NotFound)
}

/// 게시물과 해시태그를 한 트랜잭션으로 등록합니다.
///
/// 검증은 DB 작업 전에 끝납니다. 검증에 실패하면 쿼리는 하나도 실행되지 않습니다.
pub async fn create_post(pool: &SqlitePool, req: PostCreateRequest) -> Result<PostDetail, AppError> {
    req.validate()?;

    let mut tx = pool.begin().await?;
    let now = db::timestamp_now();

    let id = db::insert_post(&mut tx, &req.writer, &req.title, req.content.as_deref(), &now).await?;
    db::insert_hash_tags(&mut tx, id, &req.hash_tags).await?;

    let created = db::find_post_with_tags(&mut tx, id)
        .await?
        .ok_or(AppError::Internal("Failed to retrieve created post".to_string()))?;

    tx.commit().await?;
    tracing::debug!("Created post {} with {} hash tags", id, created.hash_tags.len());

    Ok(PostDetail::from(created))
}

/// 제목/본문을 수정합니다. id, 작성자, 작성 시각은 바뀌지 않습니다.
pub async fn modify_post(
    pool: &SqlitePool,
    id: i64,
    req: PostModifyRequest,
) -> Result<PostDetail, AppError> {
    req.validate()?;

    let mut tx = pool.begin().await?;
    let now = db::timestamp_now();

    let updated = db::update_post(&mut tx, id, req.title.as_deref(), req.content.as_deref(), &now).await?;
    if !updated {
        return Err(AppError::NotFound);
    }

    let modified = db::find_post_with_tags(&mut tx, id)
        .await?
        .ok_or(AppError::NotFound)?;

    tx.commit().await?;
    Ok(PostDetail::from(modified))
}

/// 게시물을 삭제합니다.
///
/// 해시태그가 하나라도 달려 있으면 DB 에러에 기대지 않고
/// 삭제 전에 직접 세어서 `Conflict`를 반환합니다.
pub async fn delete_post(pool: &SqlitePool, id: i64) -> Result<(), AppError> {
    let mut tx = pool.begin().await?;

    if db::find_post(&mut tx, id).await?.is_none() {
        return Err(AppError::NotFound);
    }

    let tag_count = db::count_hash_tags_by_post(&mut tx, id).await?;
    if tag_count > 0 {
        return Err(AppError::Conflict(
            "해시태그가 달린 게시물은 삭제가 불가능합니다".to_string(),
        ));
    }

    db::delete_post(&mut tx, id).await?;
    tx.commit().await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::test_pool;

    fn create_request(title: &str, tags: &[&str]) -> PostCreateRequest {
        PostCreateRequest {
            writer: "꾸까꾸까".to_string(),
            title: title.to_string(),
            content: Some("깔깔깔깔내용".to_string()),
            hash_tags: tags.iter().map(|t| t.to_string()).collect(),
        }
    }

    #[tokio::test]
    async fn created_posts_get_fresh_ids() {
        let pool = test_pool().await;

        let first = create_post(&pool, create_request("one", &[])).await.unwrap();
        delete_post(&pool, first.id).await.unwrap();
        let second = create_post(&pool, create_request("two", &[])).await.unwrap();
        let third = create_post(&pool, create_request("three", &[])).await.unwrap();

        assert_ne!(first.id, second.id);
        assert_ne!(second.id, third.id);
        assert!(second.id > first.id);
    }

    #[tokio::test]
    async fn create_with_tags_links_every_tag() {
        let pool = test_pool().await;

        let detail = create_post(&pool, create_request("tagged", &["하하", "호호", "히히"]))
            .await
            .unwrap();
        assert_eq!(detail.hash_tags, vec!["하하", "호호", "히히"]);

        let mut conn = pool.acquire().await.unwrap();
        let stored = db::find_hash_tags_by_post(&mut conn, detail.id).await.unwrap();
        assert_eq!(stored.len(), 3);
        assert!(stored.iter().all(|t| t.post_id == detail.id));
    }

    #[tokio::test]
    async fn invalid_create_touches_nothing() {
        let pool = test_pool().await;

        let err = create_post(&pool, create_request("", &["ok"])).await.unwrap_err();
        match err {
            AppError::Validation(fields) => {
                assert_eq!(fields.len(), 1);
                assert_eq!(fields[0].field, "title");
            }
            other => panic!("expected validation error, got {:?}", other),
        }

        let listed = list_posts(&pool, PageRequest::default(), 100).await.unwrap();
        assert_eq!(listed.pagination.total_count, 0);
    }

    #[tokio::test]
    async fn listing_twenty_five_posts() {
        let pool = test_pool().await;
        db::seed_posts(&pool, 25).await.unwrap();

        let first = list_posts(&pool, PageRequest::new(1, 10), 100).await.unwrap();
        assert_eq!(first.count, 10);
        assert_eq!(first.posts.len(), 10);
        assert_eq!(first.pagination.total_count, 25);
        assert_eq!(first.pagination.total_pages, 3);
        assert!(first.posts.windows(2).all(|w| w[0].id < w[1].id));

        let last = list_posts(&pool, PageRequest::new(3, 10), 100).await.unwrap();
        assert_eq!(last.count, 5);

        let clamped = list_posts(&pool, PageRequest::new(-1, 0), 100).await.unwrap();
        assert_eq!(clamped.pagination.current_page, 1);
        assert_eq!(clamped.pagination.size, 10);
    }

    #[tokio::test]
    async fn listing_far_past_the_last_page_is_empty() {
        let pool = test_pool().await;
        db::seed_posts(&pool, 25).await.unwrap();

        let list = list_posts(&pool, PageRequest::new(i64::MAX, 10), 100).await.unwrap();
        assert_eq!(list.count, 0);
        assert_eq!(list.pagination.current_page, i64::MAX);
        assert_eq!(list.pagination.total_pages, 3);
        assert_eq!(list.pagination.end_page, 3);
        assert!(!list.pagination.next);
    }

    #[tokio::test]
    async fn deleting_untagged_post_then_detail_is_not_found() {
        let pool = test_pool().await;
        let created = create_post(&pool, create_request("bye", &[])).await.unwrap();

        delete_post(&pool, created.id).await.unwrap();

        assert!(matches!(get_detail(&pool, created.id).await, Err(AppError::NotFound)));
        assert!(matches!(delete_post(&pool, created.id).await, Err(AppError::NotFound)));
    }

    #[tokio::test]
    async fn deleting_tagged_post_conflicts_and_keeps_post() {
        let pool = test_pool().await;
        let created = create_post(&pool, create_request("stay", &["rust"])).await.unwrap();

        assert!(matches!(delete_post(&pool, created.id).await, Err(AppError::Conflict(_))));

        let still_there = get_detail(&pool, created.id).await.unwrap();
        assert_eq!(still_there.title, "stay");
        assert_eq!(still_there.hash_tags, vec!["rust"]);
    }

    #[tokio::test]
    async fn modify_changes_only_targeted_fields() {
        let pool = test_pool().await;
        let created = create_post(&pool, create_request("before", &["a"])).await.unwrap();

        let modified = modify_post(
            &pool,
            created.id,
            PostModifyRequest {
                title: Some("after".to_string()),
                content: None,
            },
        )
        .await
        .unwrap();

        assert_eq!(modified.id, created.id);
        assert_eq!(modified.created_at, created.created_at);
        assert_eq!(modified.title, "after");
        assert_eq!(modified.content, created.content);
        assert_eq!(modified.writer, created.writer);
        assert_eq!(modified.hash_tags, created.hash_tags);
    }

    #[tokio::test]
    async fn modify_missing_or_invalid() {
        let pool = test_pool().await;

        let missing = modify_post(&pool, 42, PostModifyRequest::default()).await;
        assert!(matches!(missing, Err(AppError::NotFound)));

        let created = create_post(&pool, create_request("keep", &[])).await.unwrap();
        let invalid = modify_post(
            &pool,
            created.id,
            PostModifyRequest {
                title: Some(String::new()),
                content: Some("new body".to_string()),
            },
        )
        .await;
        assert!(matches!(invalid, Err(AppError::Validation(_))));
        assert_eq!(get_detail(&pool, created.id).await.unwrap().content, created.content);
    }

    #[tokio::test]
    async fn failed_tag_insert_rolls_back_post() {
        let pool = test_pool().await;
        sqlx::query(
            "CREATE TRIGGER reject_tag BEFORE INSERT ON hash_tags WHEN NEW.tag_name = 'boom' \
             BEGIN SELECT RAISE(ABORT, 'rejected'); END",
        )
        .execute(&pool)
        .await
        .unwrap();

        let result = create_post(&pool, create_request("atomic", &["ok", "boom"])).await;
        assert!(matches!(result, Err(AppError::Database(_))));

        let listed = list_posts(&pool, PageRequest::default(), 100).await.unwrap();
        assert_eq!(listed.pagination.total_count, 0);
    }
}
