//! # 에러 처리 모듈
//!
//! 애플리케이션에서 발생할 수 있는 모든 에러 타입을 정의합니다.
//! Spring에서는 컨트롤러가 try-catch로 예외를 잡아 `ResponseEntity`를 만들지만,
//! Rust에서는 `Result<T, AppError>`를 반환하고 `IntoResponse`가 응답으로 바꿉니다.
//!
//! 이 모듈의 핵심:
//! - `AppError` 열거형(enum): 검증 실패, 조회 실패, 삭제 충돌, 쓰기 실패를 구분
//! - `FieldError`: 필드 단위 검증 에러 (BindingResult의 FieldError에 해당)
//! - `IntoResponse` 구현: 에러를 HTTP 응답으로 자동 변환

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::json;
use thiserror::Error;
use validator::ValidationErrors;

/// 필드 하나에 대한 검증 실패 정보
///
/// `{ "field": "title", "code": "length", "message": "제목은 필수입니다" }` 형태로 직렬화됩니다.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldError {
    pub field: String,
    pub code: String,
    pub message: String,
}

/// 애플리케이션에서 발생할 수 있는 모든 에러 종류
///
/// 서비스 계층은 에러의 *종류*만 결정하고, 어떤 HTTP 상태로 보낼지는
/// 라우트 핸들러가 `into_bad_request` / `into_write_failure`로 조정합니다.
#[derive(Debug, Error)]
pub enum AppError {
    /// 요청한 리소스를 찾을 수 없음 (HTTP 404)
    #[error("Resource not found")]
    NotFound,

    /// 잘못된 요청 (HTTP 400)
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// 필드 단위 검증 실패 (HTTP 400)
    /// DB 작업 전에 검사되며, 실패하면 어떤 쿼리도 실행되지 않습니다.
    #[error("Validation failed: {} invalid field(s)", .0.len())]
    Validation(Vec<FieldError>),

    /// 해시태그가 달린 게시물 삭제 시도
    /// 클라이언트가 구분할 수 있도록 별도 variant로 두고, 상태 코드는 500입니다.
    #[error("Conflict: {0}")]
    Conflict(String),

    /// 쓰기 작업 실패 (HTTP 500). 메시지를 그대로 클라이언트에 전달합니다.
    #[error("Write failed: {0}")]
    WriteFailure(String),

    /// 서버 내부 오류 (HTTP 500)
    #[error("Internal error: {0}")]
    Internal(String),

    /// 데이터베이스 오류 (HTTP 500)
    /// #[from]: sqlx 함수 호출에 `?`를 쓰면 자동으로 AppError::Database로 변환됩니다.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

// validator의 검증 결과를 필드 에러 목록으로 펼칩니다.
// 필드 이름 순으로 정렬해서 응답 순서가 매번 같도록 합니다.
impl From<ValidationErrors> for AppError {
    fn from(errors: ValidationErrors) -> Self {
        let mut fields: Vec<FieldError> = errors
            .field_errors()
            .into_iter()
            .flat_map(|(field, errs)| {
                errs.iter().map(move |err| FieldError {
                    field: field.to_string(),
                    code: err.code.to_string(),
                    message: err
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| err.code.to_string()),
                })
            })
            .collect();
        fields.sort_by(|a, b| a.field.cmp(&b.field));

        AppError::Validation(fields)
    }
}

impl AppError {
    /// 상세 조회 라우트용: 어떤 에러든 400 + 메시지로 바꿉니다.
    pub fn into_bad_request(self) -> Self {
        match self {
            AppError::BadRequest(_) => self,
            AppError::NotFound => AppError::BadRequest("Post not found".to_string()),
            other => AppError::BadRequest(other.to_string()),
        }
    }

    /// 등록/수정/삭제 라우트용: 검증 에러와 충돌은 그대로 두고,
    /// 나머지는 모두 메시지가 담긴 쓰기 실패(500)로 바꿉니다.
    pub fn into_write_failure(self) -> Self {
        match self {
            AppError::Validation(_)
            | AppError::BadRequest(_)
            | AppError::Conflict(_)
            | AppError::WriteFailure(_) => self,
            AppError::NotFound => AppError::WriteFailure("Post not found".to_string()),
            other => AppError::WriteFailure(other.to_string()),
        }
    }
}

impl IntoResponse for AppError {
    /// AppError를 HTTP 응답으로 변환합니다.
    ///
    /// 응답 본문: `{ "error": { "code": "...", "message": "..." } }`
    /// 검증 실패는 `"fields": [...]`가 추가됩니다.
    /// Internal/Database는 실제 원인을 로그에만 남기고 일반 메시지를 돌려줍니다.
    fn into_response(self) -> Response {
        let (status, code, message) = match self {
            AppError::NotFound => (StatusCode::NOT_FOUND, "not_found", self.to_string()),
            AppError::BadRequest(ref msg) => {
                (StatusCode::BAD_REQUEST, "bad_request", msg.clone())
            }
            AppError::Validation(ref fields) => {
                for field in fields {
                    tracing::warn!("invalid client data - {}: {}", field.field, field.message);
                }
                let body = Json(json!({
                    "error": {
                        "code": "validation_failed",
                        "message": self.to_string(),
                        "fields": fields,
                    }
                }));
                return (StatusCode::BAD_REQUEST, body).into_response();
            }
            AppError::Conflict(ref msg) => {
                tracing::warn!("Conflict: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, "conflict", msg.clone())
            }
            AppError::WriteFailure(ref msg) => {
                tracing::error!("Write failed: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, "write_failure", msg.clone())
            }
            AppError::Internal(ref msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal_error",
                    "An internal error occurred".to_string(),
                )
            }
            AppError::Database(ref e) => {
                tracing::error!("Database error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "database_error",
                    "A database error occurred".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_becomes_bad_request_for_detail() {
        let err = AppError::NotFound.into_bad_request();
        assert!(matches!(err, AppError::BadRequest(ref m) if m == "Post not found"));
    }

    #[test]
    fn write_failure_keeps_validation_and_conflict() {
        let validation = AppError::Validation(vec![]).into_write_failure();
        assert!(matches!(validation, AppError::Validation(_)));

        let conflict = AppError::Conflict("tags".into()).into_write_failure();
        assert!(matches!(conflict, AppError::Conflict(_)));

        let missing = AppError::NotFound.into_write_failure();
        assert!(matches!(missing, AppError::WriteFailure(_)));
    }

    #[test]
    fn status_codes_follow_route_contract() {
        assert_eq!(
            AppError::Validation(vec![]).into_response().status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::Conflict("x".into()).into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(AppError::NotFound.into_response().status(), StatusCode::NOT_FOUND);
    }
}
