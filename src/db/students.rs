//! # 학생 데이터베이스 쿼리 모듈
//!
//! 이름/도시/전공 조건 조회, 부분 일치 검색, 이름으로 삭제 같은
//! 손으로 작성한 쿼리들을 모아둔 모듈입니다.
//! 단일 쿼리만 실행하므로 모두 `&SqlitePool`을 받습니다.

use crate::error::AppError;
use crate::models::*;
use sqlx::SqlitePool;

const STUDENT_COLUMNS: &str = "SELECT id, name, city, major FROM students";

/// 학생을 저장합니다. 같은 id가 있으면 덮어씁니다 (insert-or-update).
///
/// id가 없으면 UUIDv7을 새로 발급합니다.
pub async fn save_student(pool: &SqlitePool, student: &NewStudent) -> Result<Student, AppError> {
    let id = student
        .id
        .clone()
        .unwrap_or_else(|| uuid::Uuid::now_v7().to_string());

    sqlx::query(
        r#"
        INSERT INTO students (id, name, city, major)
        VALUES (?, ?, ?, ?)
        ON CONFLICT(id) DO UPDATE SET
            name = excluded.name,
            city = excluded.city,
            major = excluded.major
        "#,
    )
    .bind(&id)
    .bind(&student.name)
    .bind(&student.city)
    .bind(&student.major)
    .execute(pool)
    .await?;

    find_student(pool, &id)
        .await?
        .ok_or(AppError::Internal("Failed to retrieve saved student".to_string()))
}

pub async fn find_student(pool: &SqlitePool, id: &str) -> Result<Option<Student>, AppError> {
    let student = sqlx::query_as::<_, Student>(&format!("{} WHERE id = ?", STUDENT_COLUMNS))
        .bind(id)
        .fetch_optional(pool)
        .await?;

    Ok(student)
}

pub async fn find_all_students(pool: &SqlitePool) -> Result<Vec<Student>, AppError> {
    let students = sqlx::query_as::<_, Student>(&format!("{} ORDER BY name, id", STUDENT_COLUMNS))
        .fetch_all(pool)
        .await?;

    Ok(students)
}

pub async fn find_students_by_name(pool: &SqlitePool, name: &str) -> Result<Vec<Student>, AppError> {
    let students = sqlx::query_as::<_, Student>(&format!("{} WHERE name = ? ORDER BY id", STUDENT_COLUMNS))
        .bind(name)
        .fetch_all(pool)
        .await?;

    Ok(students)
}

pub async fn find_students_by_city_and_major(
    pool: &SqlitePool,
    city: &str,
    major: &str,
) -> Result<Vec<Student>, AppError> {
    let students = sqlx::query_as::<_, Student>(&format!(
        "{} WHERE city = ? AND major = ? ORDER BY id",
        STUDENT_COLUMNS
    ))
    .bind(city)
    .bind(major)
    .fetch_all(pool)
    .await?;

    Ok(students)
}

/// 전공에 `major`가 포함된 학생들.
///
/// `LIKE '%..%'` 대신 `instr()`을 써서 입력값의 `%`, `_`가 와일드카드로 해석되지 않게 합니다.
pub async fn find_students_by_major_containing(
    pool: &SqlitePool,
    major: &str,
) -> Result<Vec<Student>, AppError> {
    let students = sqlx::query_as::<_, Student>(&format!(
        "{} WHERE instr(major, ?) > 0 ORDER BY id",
        STUDENT_COLUMNS
    ))
    .bind(major)
    .fetch_all(pool)
    .await?;

    Ok(students)
}

/// 이름이 일치하는 첫 번째 학생 (여러 명이면 id가 가장 작은 학생)
pub async fn find_one_student_by_name(
    pool: &SqlitePool,
    name: &str,
) -> Result<Option<Student>, AppError> {
    let student = sqlx::query_as::<_, Student>(&format!(
        "{} WHERE name = ? ORDER BY id LIMIT 1",
        STUDENT_COLUMNS
    ))
    .bind(name)
    .fetch_optional(pool)
    .await?;

    Ok(student)
}

pub async fn find_one_student_by_city(
    pool: &SqlitePool,
    city: &str,
) -> Result<Option<Student>, AppError> {
    let student = sqlx::query_as::<_, Student>(&format!(
        "{} WHERE city = ? ORDER BY id LIMIT 1",
        STUDENT_COLUMNS
    ))
    .bind(city)
    .fetch_optional(pool)
    .await?;

    Ok(student)
}

pub async fn search_students_by_name_containing(
    pool: &SqlitePool,
    keyword: &str,
) -> Result<Vec<Student>, AppError> {
    let students = sqlx::query_as::<_, Student>(&format!(
        "{} WHERE instr(name, ?) > 0 ORDER BY id",
        STUDENT_COLUMNS
    ))
    .bind(keyword)
    .fetch_all(pool)
    .await?;

    Ok(students)
}

/// 이름이 일치하는 학생을 모두 삭제하고 삭제된 행 수를 반환합니다.
pub async fn delete_students_by_name(pool: &SqlitePool, name: &str) -> Result<u64, AppError> {
    let result = sqlx::query("DELETE FROM students WHERE name = ?")
        .bind(name)
        .execute(pool)
        .await?;

    Ok(result.rows_affected())
}

pub async fn delete_student(pool: &SqlitePool, id: &str) -> Result<bool, AppError> {
    let result = sqlx::query("DELETE FROM students WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}
