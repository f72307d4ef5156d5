//! # 게시물(Post) 모델 정의
//!
//! ## 구조체 역할
//! - `Post`, `HashTag`: DB의 `posts`, `hash_tags` 테이블 한 행(row)에 대응하는 엔티티
//! - `PostSummary`: 목록 조회용 프로젝션 (본문 제외, 태그 개수 포함)
//! - `PostWithTags`: 게시물 + 해시태그를 한 번에 읽어온 결과 (즉시 로딩)
//! - `PostCreateRequest`, `PostModifyRequest`: 클라이언트가 보내는 JSON 본문
//! - `PostListItem`, `PostDetail`, `PostListResponse`: 클라이언트에게 돌려주는 JSON
//!
//! 엔티티는 `Serialize`를 derive하지 않습니다.
//! API 경계 밖으로는 항상 응답 DTO로 변환해서 내보냅니다.

use crate::models::PageInfo;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct Post {
    pub id: i64,
    pub title: String,
    pub content: Option<String>,
    pub writer: String,
    pub created_at: String,
    pub updated_at: String,
}

/// 해시태그 엔티티. 반드시 하나의 게시물(`post_id`)에 속합니다 (N:1).
#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct HashTag {
    pub id: i64,
    pub tag_name: String,
    pub post_id: i64,
}

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct PostSummary {
    pub id: i64,
    pub title: String,
    pub writer: String,
    pub created_at: String,
    pub hash_tag_count: i64,
}

/// 게시물과 그 해시태그 목록. 태그는 id 오름차순입니다.
#[derive(Debug, Clone)]
pub struct PostWithTags {
    pub post: Post,
    pub hash_tags: Vec<HashTag>,
}

/// 게시물 등록 요청 — `POST /api/v1/posts`
///
/// id 필드가 없으므로 클라이언트가 식별자를 정할 수 없습니다.
/// `writer`, `title`이 JSON에서 빠지면 빈 문자열이 되어 필드 검증에서 걸립니다.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct PostCreateRequest {
    #[serde(default)]
    #[validate(
        length(min = 1, max = 20, message = "작성자는 1~20자로 입력해야 합니다"),
        custom(function = "validate_not_blank")
    )]
    pub writer: String,

    #[serde(default)]
    #[validate(
        length(min = 1, max = 100, message = "제목은 1~100자로 입력해야 합니다"),
        custom(function = "validate_not_blank")
    )]
    pub title: String,

    pub content: Option<String>,

    #[serde(default)]
    #[validate(custom(function = "validate_hash_tags"))]
    pub hash_tags: Vec<String>,
}

/// 게시물 수정 요청 — `PUT|PATCH /api/v1/posts/{id}`
///
/// 수정 대상 id는 URL 경로에서 받습니다.
/// 값이 있는 필드만 바뀌고, 검증 규칙은 등록과 같습니다.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct PostModifyRequest {
    #[validate(
        length(min = 1, max = 100, message = "제목은 1~100자로 입력해야 합니다"),
        custom(function = "validate_not_blank")
    )]
    pub title: Option<String>,

    pub content: Option<String>,
}

/// 공백만 있는 값을 거절합니다. 빈 문자열은 `length` 검증이 이미 잡으므로 여기서는 넘깁니다.
fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if !value.is_empty() && value.trim().is_empty() {
        let mut err = ValidationError::new("blank");
        err.message = Some("공백만으로 입력할 수 없습니다".into());
        return Err(err);
    }
    Ok(())
}

fn validate_hash_tags(tags: &[String]) -> Result<(), ValidationError> {
    if tags.iter().any(|tag| tag.trim().is_empty()) {
        let mut err = ValidationError::new("blank_hash_tag");
        err.message = Some("해시태그는 비어 있을 수 없습니다".into());
        return Err(err);
    }
    Ok(())
}

/// 목록 응답의 게시물 한 건. 본문(content)은 포함하지 않습니다.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostListItem {
    pub id: i64,
    pub title: String,
    pub writer: String,
    pub created_at: String,
    pub hash_tag_count: i64,
}

impl From<PostSummary> for PostListItem {
    fn from(summary: PostSummary) -> Self {
        Self {
            id: summary.id,
            title: summary.title,
            writer: summary.writer,
            created_at: summary.created_at,
            hash_tag_count: summary.hash_tag_count,
        }
    }
}

/// 상세 응답. 본문과 해시태그 이름 목록을 모두 담습니다.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostDetail {
    pub id: i64,
    pub title: String,
    pub content: Option<String>,
    pub writer: String,
    pub created_at: String,
    pub updated_at: String,
    pub hash_tags: Vec<String>,
}

impl From<PostWithTags> for PostDetail {
    fn from(PostWithTags { post, hash_tags }: PostWithTags) -> Self {
        Self {
            id: post.id,
            title: post.title,
            content: post.content,
            writer: post.writer,
            created_at: post.created_at,
            updated_at: post.updated_at,
            hash_tags: hash_tags.into_iter().map(|tag| tag.tag_name).collect(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostListResponse {
    /// 이번 페이지에 담긴 게시물 수
    pub count: usize,
    pub pagination: PageInfo,
    pub posts: Vec<PostListItem>,
}
