use std::sync::Arc;
use std::time::Duration as StdDuration;

use auth::Authenticator;
use chrono::Duration;
use interact_service::config::Config;
use interact_service::domain::conversation::service::ConversationService;
use interact_service::domain::session::pruner::RevocationPruner;
use interact_service::domain::session::service::SessionService;
use interact_service::domain::user::service::UserService;
use interact_service::inbound::http::router::create_router;
use interact_service::outbound::llm::OpenRouterClient;
use interact_service::outbound::repositories::PostgresConversationRepository;
use interact_service::outbound::repositories::PostgresRevocationStore;
use interact_service::outbound::repositories::PostgresUserRepository;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "interact_service=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        service = "interact-service",
        version = env!("CARGO_PKG_VERSION"),
        "Service starting"
    );

    let config = Config::load()?;

    tracing::info!(
        http_port = config.server.http_port,
        jwt_algorithm = %config.jwt.algorithm,
        jwt_expiration_seconds = config.jwt.expiration_seconds,
        prune_interval_seconds = config.revocation.prune_interval_seconds,
        llm_api_url = %config.llm.api_url,
        llm_model = %config.llm.model,
        "Configuration loaded"
    );

    let pg_pool = PgPoolOptions::new()
        .max_connections(config.database.max_connections)
        .connect(&config.database.url)
        .await?;
    tracing::info!(
        max_connections = config.database.max_connections,
        database = "postgresql",
        "Database connection pool created"
    );

    sqlx::migrate!("./migrations").run(&pg_pool).await?;
    tracing::info!(database = "postgresql", "Database migrations completed");

    let authenticator = Arc::new(Authenticator::new(
        config.jwt.secret.as_bytes(),
        &config.jwt.algorithm,
        Duration::seconds(config.jwt.expiration_seconds),
    )?);

    let user_repository = Arc::new(PostgresUserRepository::new(pg_pool.clone()));
    let revocation_store = Arc::new(PostgresRevocationStore::new(pg_pool.clone()));
    let conversation_repository = Arc::new(PostgresConversationRepository::new(pg_pool));
    let llm_client = Arc::new(OpenRouterClient::new(&config.llm)?);

    let user_service = Arc::new(UserService::new(
        Arc::clone(&user_repository),
        Arc::clone(&authenticator),
    ));
    let session_service = Arc::new(SessionService::new(
        revocation_store,
        user_repository,
        authenticator,
    ));
    let conversation_service = Arc::new(ConversationService::new(
        conversation_repository,
        llm_client,
    ));

    let pruner = RevocationPruner::new(
        session_service.clone(),
        StdDuration::from_secs(config.revocation.prune_interval_seconds),
    );
    tracing::info!(
        interval_seconds = config.revocation.prune_interval_seconds,
        "Starting revocation pruner"
    );
    tokio::spawn(pruner.start_pruning());

    let http_address = format!("0.0.0.0:{}", config.server.http_port);
    let listener = tokio::net::TcpListener::bind(&http_address).await?;
    tracing::info!(
        address = %http_address,
        port = config.server.http_port,
        protocol = "http",
        "Http server listening"
    );

    let application = create_router(user_service, session_service, conversation_service);

    axum::serve(listener, application).await?;

    Ok(())
}
