//! # 학생(Student) 라우트 핸들러
//!
//! - `GET /api/v1/students` → 전체 학생
//! - `GET /api/v1/students?name=..` 처럼 조건을 주면 조건에 맞는 쿼리 하나를 골라 실행합니다.

use crate::{db, error::AppError, models::StudentQuery, routes::posts::AppState};
use axum::{
    extract::{Query, State},
    Json,
};
use serde_json::{json, Value};

/// `GET /students?name=&city=&major=&q=` — 조건에 맞는 쿼리를 골라 학생을 조회합니다.
///
/// 우선순위: name → city+major → major(부분 일치) → q(이름 부분 일치) → 전체
pub async fn list_students(
    State(state): State<AppState>,
    Query(query): Query<StudentQuery>,
) -> Result<Json<Value>, AppError> {
    tracing::info!("/api/v1/students GET - {:?}", query);
    let pool = &state.pool;

    let students = match (&query.name, &query.city, &query.major, &query.q) {
        (Some(name), _, _, _) => db::find_students_by_name(pool, name).await?,
        (None, Some(city), Some(major), _) => {
            db::find_students_by_city_and_major(pool, city, major).await?
        }
        (None, _, Some(major), _) => db::find_students_by_major_containing(pool, major).await?,
        (None, _, None, Some(keyword)) => db::search_students_by_name_containing(pool, keyword).await?,
        _ => db::find_all_students(pool).await?,
    };

    Ok(Json(json!({ "students": students })))
}
