use std::sync::Arc;

use account_service::config::Config;
use account_service::domain::account::ports::AccountServicePort;
use account_service::domain::account::service::AccountService;
use account_service::inbound::http::router::create_router;
use account_service::outbound::repositories::InMemoryAccountRepository;
use auth::AuthorizationGuard;
use auth::RequestAuthenticator;
use auth::TokenService;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "account_service=debug,auth=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        service = "account-service",
        version = env!("CARGO_PKG_VERSION"),
        "Service starting"
    );

    let config = Config::load().map_err(|e| {
        tracing::error!(error = %e, "Invalid configuration; refusing to start");
        e
    })?;

    tracing::info!(
        http_port = config.server.http_port,
        access_token_ttl_hours = config.jwt.access_token_ttl_hours,
        "Configuration loaded"
    );

    let tokens = Arc::new(TokenService::new(&config.token_config()?));
    let guard = AuthorizationGuard::new(RequestAuthenticator::new(Arc::clone(&tokens)));

    let account_repository = Arc::new(InMemoryAccountRepository::new());
    let account_service: Arc<dyn AccountServicePort> =
        Arc::new(AccountService::new(account_repository, tokens));

    let http_address = format!("0.0.0.0:{}", config.server.http_port);
    let http_listener = tokio::net::TcpListener::bind(&http_address).await?;
    tracing::info!(
        address = %http_address,
        port = config.server.http_port,
        protocol = "http",
        "Http server listening"
    );

    let http_application = create_router(account_service, guard);
    axum::serve(http_listener, http_application).await?;

    tracing::info!("Server exited successfully");
    Ok(())
}
