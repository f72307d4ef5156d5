//! # 페이지네이션 모델
//!
//! - `PageQuery`: `?page=&size=` 쿼리 파라미터 원문
//! - `PageRequest`: 파싱된 페이지 요청 (1부터 시작하는 페이지 번호)
//! - `PageInfo`: 목록 응답에 붙는 페이지 정보 (전체 개수, 전체 페이지 수, 페이지 버튼 구간)

use serde::{Deserialize, Serialize};

pub const DEFAULT_PAGE: i64 = 1;
pub const DEFAULT_PAGE_SIZE: i64 = 10;
/// 화면 하단에 한 번에 보여줄 페이지 버튼 개수
pub const PAGE_WINDOW: i64 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: i64,
    pub size: i64,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            size: DEFAULT_PAGE_SIZE,
        }
    }
}

/// 쿼리 문자열 그대로의 `?page=&size=`
///
/// 두 값을 따로 파싱해서, 하나가 숫자가 아니어도 다른 하나는 살립니다.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PageQuery {
    pub page: Option<String>,
    pub size: Option<String>,
}

impl PageQuery {
    pub fn into_page_request(self) -> PageRequest {
        fn parse(value: Option<String>, default: i64) -> i64 {
            value
                .and_then(|v| v.trim().parse().ok())
                .unwrap_or(default)
        }

        PageRequest {
            page: parse(self.page, DEFAULT_PAGE),
            size: parse(self.size, DEFAULT_PAGE_SIZE),
        }
    }
}

impl PageRequest {
    pub fn new(page: i64, size: i64) -> Self {
        Self { page, size }
    }

    /// 범위를 벗어난 값을 거절하지 않고 보정합니다.
    ///
    /// - `page < 1` → 1
    /// - `size < 1` → 기본값 10
    /// - `size > max_size` → `max_size`
    pub fn normalize(self, max_size: i64) -> Self {
        let page = self.page.max(1);
        let size = if self.size < 1 {
            DEFAULT_PAGE_SIZE
        } else {
            self.size
        };
        Self {
            page,
            size: size.min(max_size.max(1)),
        }
    }

    /// SQL `OFFSET` 값. 보정된 요청에서만 의미가 있습니다.
    pub fn offset(&self) -> i64 {
        (self.page - 1).saturating_mul(self.size)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageInfo {
    pub current_page: i64,
    pub size: i64,
    pub total_count: i64,
    pub total_pages: i64,
    pub start_page: i64,
    pub end_page: i64,
    pub prev: bool,
    pub next: bool,
}

impl PageInfo {
    /// 페이지 번호는 클라이언트가 준 값 그대로라 `i64::MAX`까지 올 수 있습니다.
    /// 구간 계산은 넘치지 않게 포화 연산을 씁니다.
    pub fn new(page: &PageRequest, total_count: i64) -> Self {
        let size = page.size.max(1);
        let total_pages = total_count.saturating_add(size - 1) / size;

        // 현재 페이지가 속한 버튼 구간: 1~10, 11~20, ...
        let start_page = (page.page.max(1) - 1) / PAGE_WINDOW * PAGE_WINDOW + 1;
        let end_of_window = start_page.saturating_add(PAGE_WINDOW - 1);
        let end_page = end_of_window.min(total_pages);

        Self {
            current_page: page.page,
            size: page.size,
            total_count,
            total_pages,
            start_page,
            end_page,
            prev: start_page > 1,
            next: end_page < total_pages,
        }
    }
}
