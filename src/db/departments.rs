//! # 부서/사원 데이터베이스 쿼리 모듈
//!
//! 1:N 연관관계를 읽는 두 가지 방법을 함수로 나눠 둡니다.
//!
//! | 지연 로딩에 해당 | 즉시 로딩에 해당 (JOIN 한 번) |
//! |---|---|
//! | `find_department` | `find_department_with_employees` |
//! | `find_all_departments` | `find_all_departments_with_employees` |
//! | `find_employee` | `find_employee_with_department` |
//!
//! 부서 목록을 읽은 뒤 부서마다 사원을 따로 조회하면 부서 수만큼 쿼리가 더 나갑니다(N+1).
//! `find_all_departments_with_employees`는 `LEFT JOIN` 한 번으로 끝냅니다.

use crate::error::AppError;
use crate::models::*;
use sqlx::SqlitePool;

pub async fn save_department(pool: &SqlitePool, name: &str) -> Result<Department, AppError> {
    let result = sqlx::query("INSERT INTO departments (name) VALUES (?)")
        .bind(name)
        .execute(pool)
        .await?;

    Ok(Department {
        id: result.last_insert_rowid(),
        name: name.to_string(),
    })
}

pub async fn save_employee(
    pool: &SqlitePool,
    name: &str,
    department_id: Option<i64>,
) -> Result<Employee, AppError> {
    let result = sqlx::query("INSERT INTO employees (name, department_id) VALUES (?, ?)")
        .bind(name)
        .bind(department_id)
        .execute(pool)
        .await?;

    Ok(Employee {
        id: result.last_insert_rowid(),
        name: name.to_string(),
        department_id,
    })
}

pub async fn find_department(pool: &SqlitePool, id: i64) -> Result<Option<Department>, AppError> {
    let department = sqlx::query_as::<_, Department>("SELECT id, name FROM departments WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await?;

    Ok(department)
}

pub async fn find_all_departments(pool: &SqlitePool) -> Result<Vec<Department>, AppError> {
    let departments = sqlx::query_as::<_, Department>("SELECT id, name FROM departments ORDER BY id")
        .fetch_all(pool)
        .await?;

    Ok(departments)
}

// 부서 LEFT JOIN 사원 결과 한 행. 사원이 없는 부서는 employee_* 가 NULL입니다.
#[derive(sqlx::FromRow)]
struct DepartmentEmployeeRow {
    department_id: i64,
    department_name: String,
    employee_id: Option<i64>,
    employee_name: Option<String>,
}

const DEPARTMENT_JOIN: &str = r#"
    SELECT d.id AS department_id, d.name AS department_name,
           e.id AS employee_id, e.name AS employee_name
    FROM departments d
    LEFT JOIN employees e ON e.department_id = d.id
"#;

/// JOIN 결과 행들을 부서별로 묶습니다. 행은 부서 id 순으로 정렬되어 있어야 합니다.
fn group_departments(rows: Vec<DepartmentEmployeeRow>) -> Vec<DepartmentWithEmployees> {
    let mut grouped: Vec<DepartmentWithEmployees> = Vec::new();

    for row in rows {
        let is_new = grouped
            .last()
            .map_or(true, |last| last.department.id != row.department_id);
        if is_new {
            grouped.push(DepartmentWithEmployees {
                department: Department {
                    id: row.department_id,
                    name: row.department_name,
                },
                employees: Vec::new(),
            });
        }

        if let (Some(id), Some(name), Some(current)) =
            (row.employee_id, row.employee_name, grouped.last_mut())
        {
            current.employees.push(Employee {
                id,
                name,
                department_id: Some(row.department_id),
            });
        }
    }

    grouped
}

pub async fn find_department_with_employees(
    pool: &SqlitePool,
    id: i64,
) -> Result<Option<DepartmentWithEmployees>, AppError> {
    let rows = sqlx::query_as::<_, DepartmentEmployeeRow>(&format!(
        "{} WHERE d.id = ? ORDER BY e.id",
        DEPARTMENT_JOIN
    ))
    .bind(id)
    .fetch_all(pool)
    .await?;

    Ok(group_departments(rows).into_iter().next())
}

pub async fn find_all_departments_with_employees(
    pool: &SqlitePool,
) -> Result<Vec<DepartmentWithEmployees>, AppError> {
    let rows = sqlx::query_as::<_, DepartmentEmployeeRow>(&format!(
        "{} ORDER BY d.id, e.id",
        DEPARTMENT_JOIN
    ))
    .fetch_all(pool)
    .await?;

    Ok(group_departments(rows))
}

/// 사원 행만 읽습니다. 부서는 `department_id`로만 알 수 있습니다.
pub async fn find_employee(pool: &SqlitePool, id: i64) -> Result<Option<Employee>, AppError> {
    let employee = sqlx::query_as::<_, Employee>(
        "SELECT id, name, department_id FROM employees WHERE id = ?",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(employee)
}

#[derive(sqlx::FromRow)]
struct EmployeeDepartmentRow {
    id: i64,
    name: String,
    department_id: Option<i64>,
    department_name: Option<String>,
}

pub async fn find_employee_with_department(
    pool: &SqlitePool,
    id: i64,
) -> Result<Option<EmployeeWithDepartment>, AppError> {
    let row = sqlx::query_as::<_, EmployeeDepartmentRow>(
        r#"
        SELECT e.id, e.name, e.department_id, d.name AS department_name
        FROM employees e
        LEFT JOIN departments d ON d.id = e.department_id
        WHERE e.id = ?
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(row.map(|row| {
        let department = match (row.department_id, row.department_name) {
            (Some(id), Some(name)) => Some(Department { id, name }),
            _ => None,
        };
        EmployeeWithDepartment {
            employee: Employee {
                id: row.id,
                name: row.name,
                department_id: row.department_id,
            },
            department,
        }
    }))
}

/// 사원의 소속 부서를 바꿉니다.
///
/// 부서 존재 확인과 변경을 한 트랜잭션으로 묶습니다.
///
/// ## 반환값
/// - `Ok(Some(..))`: 변경 후 사원 + 부서 정보
/// - `Ok(None)`: 사원이나 부서가 존재하지 않음
pub async fn change_department(
    pool: &SqlitePool,
    employee_id: i64,
    department_id: i64,
) -> Result<Option<EmployeeWithDepartment>, AppError> {
    let mut tx = pool.begin().await?;

    let department_exists: Option<i64> = sqlx::query_scalar("SELECT id FROM departments WHERE id = ?")
        .bind(department_id)
        .fetch_optional(&mut *tx)
        .await?;
    if department_exists.is_none() {
        return Ok(None);
    }

    let result = sqlx::query("UPDATE employees SET department_id = ? WHERE id = ?")
        .bind(department_id)
        .bind(employee_id)
        .execute(&mut *tx)
        .await?;
    if result.rows_affected() == 0 {
        return Ok(None);
    }

    tx.commit().await?;
    find_employee_with_department(pool, employee_id).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::test_pool;

    #[tokio::test]
    async fn eager_list_groups_employees_per_department() {
        let pool = test_pool().await;
        let dev = save_department(&pool, "영업부").await.unwrap();
        let ops = save_department(&pool, "개발부").await.unwrap();
        let empty = save_department(&pool, "인사부").await.unwrap();
        save_employee(&pool, "라이옹", Some(dev.id)).await.unwrap();
        save_employee(&pool, "어피치", Some(dev.id)).await.unwrap();
        save_employee(&pool, "프로도", Some(ops.id)).await.unwrap();

        let all = find_all_departments_with_employees(&pool).await.unwrap();
        assert_eq!(all.len(), 3);
        assert_eq!(all[0].employees.len(), 2);
        assert_eq!(all[1].employees.len(), 1);
        assert_eq!(all[2].department.id, empty.id);
        assert!(all[2].employees.is_empty());

        assert_eq!(find_all_departments(&pool).await.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn lazy_employee_read_has_only_department_id() {
        let pool = test_pool().await;
        let dept = save_department(&pool, "영업부").await.unwrap();
        let emp = save_employee(&pool, "네오", Some(dept.id)).await.unwrap();

        let lazy = find_employee(&pool, emp.id).await.unwrap().unwrap();
        assert_eq!(lazy.department_id, Some(dept.id));

        let eager = find_employee_with_department(&pool, emp.id).await.unwrap().unwrap();
        assert_eq!(eager.department, Some(dept));
    }

    #[tokio::test]
    async fn lazy_department_read_has_no_employees() {
        let pool = test_pool().await;
        let dept = save_department(&pool, "인사부").await.unwrap();
        save_employee(&pool, "무지", Some(dept.id)).await.unwrap();

        let lazy = find_department(&pool, dept.id).await.unwrap();
        assert_eq!(lazy, Some(dept.clone()));
        assert!(find_department(&pool, dept.id + 100).await.unwrap().is_none());

        let eager = find_department_with_employees(&pool, dept.id).await.unwrap().unwrap();
        assert_eq!(eager.department, dept);
        assert_eq!(eager.employees.len(), 1);
    }

    #[tokio::test]
    async fn changing_department_moves_employee() {
        let pool = test_pool().await;
        let first = save_department(&pool, "영업부").await.unwrap();
        let second = save_department(&pool, "개발부").await.unwrap();
        let emp = save_employee(&pool, "튜브", Some(second.id)).await.unwrap();

        let moved = change_department(&pool, emp.id, first.id).await.unwrap().unwrap();
        assert_eq!(moved.employee.department_id, Some(first.id));

        let first_with = find_department_with_employees(&pool, first.id).await.unwrap().unwrap();
        assert_eq!(first_with.employees.len(), 1);
        let second_with = find_department_with_employees(&pool, second.id).await.unwrap().unwrap();
        assert!(second_with.employees.is_empty());

        assert!(change_department(&pool, emp.id, 999).await.unwrap().is_none());
        assert!(change_department(&pool, 999, first.id).await.unwrap().is_none());
    }
}
