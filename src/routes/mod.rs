//! # 라우트 핸들러 모듈
//!
//! HTTP 요청을 처리하는 핸들러 함수들과 전체 라우터 구성을 모아둔 모듈입니다.
//!
//! 각 하위 모듈:
//! - `posts`: 게시물 CRUD 핸들러 (+ 공유 상태 `AppState`)
//! - `students`: 학생 조회 핸들러
//! - `departments`: 부서/사원 조회 및 부서 변경 핸들러
//! - `health`: 서버 상태 확인 (헬스체크)

pub mod departments;
pub mod health;
pub mod posts;
pub mod students;

pub use departments::*;
pub use health::*;
pub use posts::*;
pub use students::*;

use axum::{routing::get, Router};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

/// 모든 API 라우트를 `/api/v1` 아래에 묶은 라우터를 만듭니다.
///
/// main에서 서버를 띄울 때와 테스트에서 `oneshot`으로 호출할 때 같은 라우터를 씁니다.
pub fn router(state: AppState) -> Router {
    let api_routes = Router::new()
        // 게시물(Post) CRUD API
        .route("/posts", get(list_posts).post(create_post))
        .route(
            "/posts/{id}",
            get(get_post)
                .put(modify_post)
                .patch(modify_post)
                .delete(delete_post),
        )
        // 예제 스키마: 학생, 부서/사원
        .route("/students", get(list_students))
        .route("/departments", get(list_departments))
        .route("/departments/{id}", get(get_department))
        .route("/employees/{id}", get(get_employee).patch(change_employee_department))
        .route("/health", get(health_check))
        .with_state(state);

    // 개발 환경 기준으로 모든 출처를 허용합니다.
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .nest("/api/v1", api_routes)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}
