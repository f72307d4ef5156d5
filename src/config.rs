//! # 애플리케이션 설정(Configuration) 모듈
//!
//! 환경변수에서 서버 설정값을 읽어오는 모듈입니다.
//! `.env` 파일이나 시스템 환경변수에서 값을 가져옵니다.
//!
//! 설정 항목:
//! - `DATABASE_URL`: SQLite 데이터베이스 경로 (필수)
//! - `HOST`: 서버 바인딩 주소
//! - `PORT`: 서버 포트 번호
//! - `DB_MAX_CONNECTIONS`: 연결 풀 최대 연결 수
//! - `MAX_PAGE_SIZE`: 목록 조회 시 한 페이지 최대 게시물 수
//! - `SEED_POSTS`: 비어 있는 DB에 미리 넣을 샘플 게시물 수 (선택)

use std::env;

/// 애플리케이션 전체 설정을 담는 구조체
///
/// 서버 시작 시 환경변수에서 한 번 읽어온 후,
/// 애플리케이션 전체에서 공유됩니다.
#[derive(Debug, Clone)]
pub struct Config {
    /// SQLite 데이터베이스 URL (예: "sqlite:data/board.db?mode=rwc")
    pub database_url: String,
    /// 서버가 바인딩할 호스트 주소 (기본값: "0.0.0.0")
    pub host: String,
    /// 서버 포트 번호 (기본값: 3000)
    pub port: u16,
    /// 연결 풀 최대 연결 수 (기본값: 5)
    pub max_connections: u32,
    /// 페이지 크기 상한 (기본값: 100). 이보다 큰 size 요청은 이 값으로 잘립니다.
    pub max_page_size: i64,
    /// 시작 시 게시물 테이블이 비어 있으면 이 개수만큼 샘플 게시물을 생성합니다.
    pub seed_posts: Option<u32>,
}

impl Config {
    /// 환경변수에서 설정값을 읽어 Config 인스턴스를 생성합니다.
    ///
    /// # 에러
    /// `DATABASE_URL`은 필수이며, 없으면 에러가 발생합니다.
    /// 나머지 설정은 기본값이 있어 환경변수가 없거나 숫자가 아니어도 동작합니다.
    pub fn from_env() -> Result<Self, env::VarError> {
        Ok(Self {
            database_url: env::var("DATABASE_URL")?,
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: parse_or("PORT", 3000),
            max_connections: parse_or("DB_MAX_CONNECTIONS", 5),
            max_page_size: parse_or("MAX_PAGE_SIZE", 100).max(1),
            // 값이 없거나 숫자가 아니면 시딩하지 않습니다.
            seed_posts: env::var("SEED_POSTS").ok().and_then(|v| v.parse().ok()),
        })
    }
}

/// 환경변수를 숫자로 파싱하고, 없거나 파싱에 실패하면 기본값을 사용합니다.
fn parse_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}
