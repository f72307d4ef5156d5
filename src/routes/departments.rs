//! # 부서/사원 라우트 핸들러
//!
//! - `GET /api/v1/departments` → 부서 목록 + 소속 사원 (JOIN 한 번)
//! - `GET /api/v1/departments/{id}` → 부서 하나 + 소속 사원
//! - `GET /api/v1/employees/{id}` → 사원 + 소속 부서
//! - `PATCH /api/v1/employees/{id}` → 사원의 소속 부서 변경

use crate::{db, error::AppError, models::*, routes::posts::AppState};
use axum::{
    extract::{Path, State},
    Json,
};
use serde_json::{json, Value};

pub async fn list_departments(State(state): State<AppState>) -> Result<Json<Value>, AppError> {
    let departments = db::find_all_departments_with_employees(&state.pool).await?;
    Ok(Json(json!({ "departments": departments })))
}

pub async fn get_department(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<DepartmentWithEmployees>, AppError> {
    let department = db::find_department_with_employees(&state.pool, id)
        .await?
        .ok_or(AppError::NotFound)?;
    Ok(Json(department))
}

pub async fn get_employee(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<EmployeeWithDepartment>, AppError> {
    let employee = db::find_employee_with_department(&state.pool, id)
        .await?
        .ok_or(AppError::NotFound)?;
    Ok(Json(employee))
}

/// 사원이나 부서 중 하나라도 없으면 404
pub async fn change_employee_department(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(req): Json<ChangeDepartmentRequest>,
) -> Result<Json<EmployeeWithDepartment>, AppError> {
    tracing::info!("/api/v1/employees/{} PATCH - department {}", id, req.department_id);

    let employee = db::change_department(&state.pool, id, req.department_id)
        .await?
        .ok_or(AppError::NotFound)?;
    Ok(Json(employee))
}
