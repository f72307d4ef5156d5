//! # post-board 웹 서버 진입점
//!
//! 이 파일이 수행하는 작업:
//! 1. 환경변수(.env) 로딩
//! 2. 로깅(tracing) 초기화
//! 3. SQLite 데이터베이스 연결 풀 생성
//! 4. 데이터베이스 마이그레이션 실행
//! 5. (선택) 샘플 게시물 생성
//! 6. API 라우터 설정 후 HTTP 서버 시작

use anyhow::Result;
use post_board::{config::Config, db, routes};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // .env 파일이 없어도 에러 없이 넘어갑니다.
    dotenvy::dotenv().ok();

    // RUST_LOG가 없으면 이 크레이트와 tower_http, axum을 debug 레벨로 출력합니다.
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "post_board=debug,tower_http=debug,axum=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;
    tracing::info!("Starting post-board server on {}:{}", config.host, config.port);

    let pool = db::connect(&config.database_url, config.max_connections).await?;

    tracing::info!("Running database migrations...");
    db::migrate(&pool).await?;

    // 비어 있는 DB에서만 샘플 게시물을 넣습니다. 재시작할 때마다 쌓이지 않게 합니다.
    if let Some(count) = config.seed_posts {
        let mut conn = pool.acquire().await?;
        let existing = db::count_posts(&mut conn).await?;
        drop(conn);

        if existing == 0 {
            db::seed_posts(&pool, count).await?;
        } else {
            tracing::info!("Skipping seed: {} posts already stored", existing);
        }
    }

    let state = routes::AppState {
        pool,
        max_page_size: config.max_page_size,
    };
    let app = routes::router(state);

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
