//! # 부서/사원 모델
//!
//! 부서(Department) 1 : N 사원(Employee) 관계입니다.
//! `Employee`는 `department_id`만 들고 있고(지연 로딩에 해당),
//! 부서 정보까지 필요하면 `EmployeeWithDepartment`로 한 번에 읽어옵니다(즉시 로딩).

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Department {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Employee {
    pub id: i64,
    pub name: String,
    pub department_id: Option<i64>,
}

#[derive(Debug, Clone, Serialize)]
pub struct DepartmentWithEmployees {
    #[serde(flatten)]
    pub department: Department,
    pub employees: Vec<Employee>,
}

#[derive(Debug, Clone, Serialize)]
pub struct EmployeeWithDepartment {
    #[serde(flatten)]
    pub employee: Employee,
    pub department: Option<Department>,
}

/// `PATCH /api/v1/employees/{id}` — 사원의 소속 부서 변경
#[derive(Debug, Deserialize)]
pub struct ChangeDepartmentRequest {
    pub department_id: i64,
}
