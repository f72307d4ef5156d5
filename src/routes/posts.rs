//! # 게시물(Post) 라우트 핸들러
//!
//! ## 엔드포인트
//! | 메서드 | 경로 | 핸들러 | 실패 시 |
//! |--------|------|--------|---------|
//! | GET | /api/v1/posts?page&size | `list_posts` | 실패하지 않음 (잘못된 값은 보정) |
//! | GET | /api/v1/posts/{id} | `get_post` | 400 + 메시지 |
//! | POST | /api/v1/posts | `create_post` | 400 필드 에러 목록 / 500 쓰기 실패 |
//! | PUT, PATCH | /api/v1/posts/{id} | `modify_post` | 400 필드 에러 목록 / 500 |
//! | DELETE | /api/v1/posts/{id} | `delete_post` | 500 (해시태그가 달린 경우 충돌 메시지) |
//!
//! 서비스가 돌려준 `AppError`를 라우트마다 `into_bad_request` / `into_write_failure`로
//! 다시 분류해서 위 표의 상태 코드를 맞춥니다.

use crate::{error::AppError, models::*, services::posts as post_service};
use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    http::Method,
    Json,
};
use sqlx::SqlitePool;

/// 애플리케이션 공유 상태
///
/// 모든 요청 핸들러가 `State(state): State<AppState>`로 접근합니다.
#[derive(Clone)]
pub struct AppState {
    /// SQLite 연결 풀 (내부적으로 Arc로 공유)
    pub pool: SqlitePool,
    /// 목록 조회 시 한 페이지 최대 크기
    pub max_page_size: i64,
}

/// `GET /posts?page=&size=` — 게시물 목록 조회
///
/// 숫자가 아닌 값은 거절하지 않고 그 값만 기본값(1페이지, 10개)으로 바꿉니다.
pub async fn list_posts(
    State(state): State<AppState>,
    query: Result<Query<PageQuery>, QueryRejection>,
) -> Result<Json<PostListResponse>, AppError> {
    let page = match query {
        Ok(Query(query)) => query.into_page_request(),
        Err(rejection) => {
            tracing::warn!("invalid page query, using defaults - {}", rejection);
            PageRequest::default()
        }
    };
    tracing::info!("/api/v1/posts?page={}&size={}", page.page, page.size);

    let list = post_service::list_posts(&state.pool, page, state.max_page_size).await?;
    Ok(Json(list))
}

/// `GET /posts/{id}` — 게시물 상세 조회. 어떤 에러든 400으로 응답합니다.
pub async fn get_post(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<PostDetail>, AppError> {
    tracing::info!("/api/v1/posts/{} GET", id);

    let detail = post_service::get_detail(&state.pool, id)
        .await
        .map_err(AppError::into_bad_request)?;
    Ok(Json(detail))
}

/// `POST /posts` — 게시물 등록
///
/// 본문이 없거나 JSON이 아니면 400, 필드 검증 실패는 400 + 필드 목록,
/// 저장 중 실패는 500 + 원인 메시지입니다.
pub async fn create_post(
    State(state): State<AppState>,
    payload: Result<Json<PostCreateRequest>, JsonRejection>,
) -> Result<Json<PostDetail>, AppError> {
    let Json(req) = payload.map_err(|rejection| {
        AppError::BadRequest(format!("등록 게시물 정보를 전달해주세요! ({})", rejection.body_text()))
    })?;
    tracing::info!("/api/v1/posts POST - payload: {:?}", req);

    let detail = post_service::create_post(&state.pool, req)
        .await
        .map_err(AppError::into_write_failure)?;
    Ok(Json(detail))
}

/// `PUT|PATCH /posts/{id}` — 게시물 수정
pub async fn modify_post(
    State(state): State<AppState>,
    method: Method,
    Path(id): Path<i64>,
    payload: Result<Json<PostModifyRequest>, JsonRejection>,
) -> Result<Json<PostDetail>, AppError> {
    let Json(req) = payload.map_err(|rejection| {
        AppError::BadRequest(format!("수정 게시물 정보를 전달해주세요! ({})", rejection.body_text()))
    })?;
    tracing::info!("/api/v1/posts/{} {} - payload: {:?}", id, method, req);

    let detail = post_service::modify_post(&state.pool, id, req)
        .await
        .map_err(AppError::into_write_failure)?;
    Ok(Json(detail))
}

/// `DELETE /posts/{id}` — 게시물 삭제. 성공하면 확인 문구를 text로 돌려줍니다.
pub async fn delete_post(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<&'static str, AppError> {
    tracing::info!("/api/v1/posts/{} DELETE", id);

    post_service::delete_post(&state.pool, id)
        .await
        .map_err(AppError::into_write_failure)?;
    Ok("DEL SUCCESS!!")
}
