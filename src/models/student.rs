use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Student {
    pub id: String,
    pub name: String,
    pub city: Option<String>,
    pub major: Option<String>,
}

/// 신규 학생 저장 요청. id가 없으면 저장 시 UUIDv7을 발급합니다.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewStudent {
    pub id: Option<String>,
    pub name: String,
    pub city: Option<String>,
    pub major: Option<String>,
}

/// `GET /api/v1/students`의 검색 조건
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StudentQuery {
    pub name: Option<String>,
    pub city: Option<String>,
    pub major: Option<String>,
    /// 이름 부분 일치 검색어
    pub q: Option<String>,
}
