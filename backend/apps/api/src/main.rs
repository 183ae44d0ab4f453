//! API Server Entry Point
//!
//! Application entry point and server initialization.
//! Uses `anyhow` for startup errors, but application-level
//! errors should use `kernel::error::AppError`.

use std::env;
use std::net::SocketAddr;
use std::sync::Arc;

use audit::{ActivityRecorder, PgActivityLogRepository};
use auth::{
    AdminAppState, AuthAppState, AuthConfig, AuthGateState, MemorySessionStore, PgAuthRepository,
    ResetTokenRepository, SessionStore, admin_router, auth_router,
};
use axum::{
    Router, http,
    http::{Method, header},
};
use base64::Engine;
use base64::engine::general_purpose;
use platform::rate_limit::{LockoutConfig, LoginAttemptTracker};
use portfolio::{PgPortfolioRepository, PortfolioAppState, portfolio_router};
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use tokio::net::TcpListener;
use tower_http::cors::{AllowHeaders, AllowMethods, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "api=info,auth=info,portfolio=info,audit=info,tower_http=info".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Database connection
    let database_url = env::var("DATABASE_URL").expect("DATABASE_URL must be set in environment");

    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&database_url)
        .await?;

    tracing::info!("Connected to database");

    // Run migrations
    sqlx::migrate!("../../../database/migrations")
        .run(&pool)
        .await?;

    tracing::info!("Migrations completed");

    // Startup cleanup: drop expired sessions and reset tokens.
    // Errors here should not prevent server startup.
    let repo_for_cleanup = PgAuthRepository::new(pool.clone());
    match SessionStore::cleanup_expired(&repo_for_cleanup).await {
        Ok(sessions) => {
            tracing::info!(sessions_deleted = sessions, "Session cleanup completed");
        }
        Err(e) => {
            tracing::warn!(error = %e, "Session cleanup failed, continuing anyway");
        }
    }
    match ResetTokenRepository::cleanup_expired(&repo_for_cleanup).await {
        Ok(tokens) => {
            tracing::info!(tokens_deleted = tokens, "Reset token cleanup completed");
        }
        Err(e) => {
            tracing::warn!(error = %e, "Reset token cleanup failed, continuing anyway");
        }
    }

    // Auth configuration
    let config = if cfg!(debug_assertions) {
        AuthConfig {
            password_pepper: pepper_from_env(),
            ..AuthConfig::development()
        }
    } else {
        // In production, load the cookie signing secret from environment
        let secret_b64 =
            env::var("SESSION_SECRET").expect("SESSION_SECRET must be set in production");
        let secret_bytes = Engine::decode(&general_purpose::STANDARD, &secret_b64)?;
        anyhow::ensure!(
            secret_bytes.len() == 32,
            "SESSION_SECRET must decode to exactly 32 bytes"
        );
        let mut secret = [0u8; 32];
        secret.copy_from_slice(&secret_bytes);
        AuthConfig {
            session_secret: secret,
            password_pepper: pepper_from_env(),
            ..AuthConfig::default()
        }
    };
    let config = Arc::new(config);

    // Session store selection: Postgres by default, in-memory for
    // development setups without durable sessions
    let session_store = env::var("SESSION_STORE").unwrap_or_else(|_| "postgres".to_string());
    let app = match session_store.as_str() {
        "memory" => {
            tracing::info!("Using in-memory session store");
            build_router(&pool, Arc::new(MemorySessionStore::new()), config)
        }
        _ => build_router(&pool, Arc::new(PgAuthRepository::new(pool.clone())), config),
    };

    // CORS configuration
    let frontend_origins = env::var("FRONTEND_ORIGINS")
        .unwrap_or_else(|_| "http://localhost:5173,http://127.0.0.1:5173".to_string());

    let allowed_origins: Vec<http::HeaderValue> = frontend_origins
        .split(',')
        .filter_map(|origin| origin.trim().parse().ok())
        .collect();

    let cors = CorsLayer::new()
        .allow_origin(allowed_origins)
        .allow_methods(AllowMethods::list([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::OPTIONS,
        ]))
        .allow_headers(AllowHeaders::list([
            header::CONTENT_TYPE,
            header::ACCEPT,
        ]))
        .allow_credentials(true);

    let app = app.layer(TraceLayer::new_for_http()).layer(cors);

    // Start server
    let port: u16 = env::var("PORT")
        .unwrap_or_else(|_| "3000".to_string())
        .parse()?;
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("Listening on {}", addr);

    let listener = TcpListener::bind(addr).await?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}

fn pepper_from_env() -> Option<Vec<u8>> {
    env::var("PASSWORD_PEPPER").ok().map(String::into_bytes)
}

/// Assemble the full route tree over the chosen session store.
fn build_router<S>(pool: &PgPool, sessions: Arc<S>, config: Arc<AuthConfig>) -> Router
where
    S: SessionStore + Send + Sync + 'static,
{
    let repo = Arc::new(PgAuthRepository::new(pool.clone()));
    let portfolio_repo = Arc::new(PgPortfolioRepository::new(pool.clone()));
    let logs = PgActivityLogRepository::new(pool.clone());
    let recorder = ActivityRecorder::new(logs.clone());
    let tracker = Arc::new(LoginAttemptTracker::new(LockoutConfig::default()));

    let auth_state = AuthAppState {
        repo: Arc::clone(&repo),
        sessions: Arc::clone(&sessions),
        portfolios: Arc::clone(&portfolio_repo),
        tracker,
        recorder: Some(recorder.clone()),
        config: Arc::clone(&config),
    };

    let admin_state = AdminAppState {
        users: Arc::clone(&repo),
        sessions: Arc::clone(&sessions),
        logs,
        recorder: Some(recorder),
        config: Arc::clone(&config),
    };

    let gate = AuthGateState {
        users: repo,
        sessions,
        config,
    };

    let portfolio_state = PortfolioAppState {
        repo: portfolio_repo,
    };

    let api = auth_router(auth_state).merge(portfolio_router(portfolio_state, gate));

    Router::new()
        .nest("/api", api)
        .nest("/api/admin", admin_router(admin_state))
}
