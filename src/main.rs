use anyhow::Result;
use folio_cms::application::{
    ports::{
        mail::Mailer,
        security::{PasswordHasher, TokenManager},
        session_revocation::SessionRevocationStore,
        time::Clock,
        util::SlugGenerator,
    },
    services::ApplicationServices,
};
use folio_cms::config::AppConfig;
use folio_cms::domain::content::{ContentReadRepository, ContentWriteRepository};
use folio_cms::infrastructure::{
    auth::PostgresAuthProvider,
    database,
    mail::TracingMailer,
    repositories::{PostgresContentReadRepository, PostgresContentWriteRepository},
    security::{
        password::Argon2PasswordHasher, redis_session_store::RedisSessionRevocationStore,
        session_store::InMemorySessionRevocationStore, token::BiscuitTokenManager,
    },
    time::SystemClock,
    util::DefaultSlugGenerator,
};
use folio_cms::presentation::http::{routes::build_router_with_rate_limiter, state::HttpState};
use std::{net::SocketAddr, sync::Arc};
use tokio::signal;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    if let Err(err) = bootstrap().await {
        tracing::error!(error = %err, "fatal error");
        eprintln!("fatal error: {err}");
        std::process::exit(1);
    }
}

async fn bootstrap() -> Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    let config = AppConfig::from_env()?;

    let pool = database::init_pool(config.database_url()).await?;
    database::run_migrations(&pool).await?;

    let content_write_repo: Arc<dyn ContentWriteRepository> =
        Arc::new(PostgresContentWriteRepository::new(pool.clone()));
    let content_read_repo: Arc<dyn ContentReadRepository> =
        Arc::new(PostgresContentReadRepository::new(pool.clone()));

    let clock: Arc<dyn Clock> = Arc::new(SystemClock);
    let slugger: Arc<dyn SlugGenerator> = Arc::new(DefaultSlugGenerator);
    let password_hasher: Arc<dyn PasswordHasher> = Arc::new(Argon2PasswordHasher);
    let auth_provider = Arc::new(PostgresAuthProvider::new(
        pool.clone(),
        Arc::clone(&password_hasher),
        Arc::clone(&clock),
        config.throttle(),
    ));

    let token_manager: Arc<dyn TokenManager> = Arc::new(BiscuitTokenManager::new(
        config.biscuit_private_key(),
        config.token_ttl(),
        config.remember_token_ttl(),
    )?);

    let session_revocation_store: Arc<dyn SessionRevocationStore> = match config.redis_url() {
        Some(url) => {
            tracing::info!("session revocations stored in redis");
            Arc::new(RedisSessionRevocationStore::from_url(
                url,
                config.remember_token_ttl(),
            )?)
        }
        None => Arc::new(InMemorySessionRevocationStore::new()),
    };

    let mailer: Arc<dyn Mailer> = Arc::new(TracingMailer::new(config.mail_from()));

    let services = Arc::new(ApplicationServices::new(
        content_write_repo,
        content_read_repo,
        auth_provider,
        token_manager,
        session_revocation_store,
        mailer,
        clock,
        slugger,
        config.service_settings(),
    ));

    let state = HttpState { services };
    let app = build_router_with_rate_limiter(
        state,
        config.allowed_origins(),
        config.rate_limit_enabled(),
    );

    let listener = tokio::net::TcpListener::bind(config.listen_addr()).await?;
    let address: SocketAddr = listener.local_addr()?;
    tracing::info!("listening on {address}");

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    Ok(())
}

fn init_tracing() {
    let env_filter = std::env::var("RUST_LOG")
        .ok()
        .unwrap_or_else(|| "info,tower_http=info,sqlx=warn".to_string());

    let subscriber = tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(env_filter))
        .with(tracing_subscriber::fmt::layer());

    if subscriber.try_init().is_err() {
        tracing::warn!("tracing subscriber already initialised");
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = signal::ctrl_c().await {
            tracing::error!(error = %err, "failed to install CTRL+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(err) => {
                tracing::error!(error = %err, "failed to install terminate handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {}
        _ = terminate => {}
    }
    tracing::info!("shutdown signal received");
}
