mod api;
mod middleware;
mod span;

use std::net::SocketAddr;

use axum::{
    Router,
    middleware::from_fn,
    routing::{get, post},
};
use contextual::Context;
use sqlx::SqlitePool;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::{
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};

use account::AccountService;
use data_access::SqliteAccountRepository;

#[derive(Debug)]
pub struct ServerOpts {
    pub database_url: String,
    pub port: u16,
}

#[derive(Clone)]
pub struct AppState {
    pub service: AccountService<SqliteAccountRepository>,
}

pub fn server(repository: SqliteAccountRepository) -> Router {
    let middleware = ServiceBuilder::new()
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(from_fn(middleware::mw_client_ip))
        .layer(TraceLayer::new_for_http().make_span_with(span::span))
        .layer(from_fn(middleware::mw_handle_leaked_5xx));

    Router::new()
        .route(
            api::username::check_availability::PATH,
            get(api::username::check_availability::handler),
        )
        .route(api::account::upsert::PATH, post(api::account::upsert::handler))
        .route(api::health::PATH, get(api::health::handler))
        .with_state(AppState {
            service: AccountService::new(repository),
        })
        .layer(middleware)
}

pub async fn serve(opts: ServerOpts) -> Result<(), ServerError> {
    tracing::info!("{:?}", opts);

    let pool = SqlitePool::connect(&opts.database_url)
        .await
        .context(format!("connect database :: {}", opts.database_url))?;

    data_access::MIGRATOR
        .run(&pool)
        .await
        .context("run migrations")?;

    let app = server(SqliteAccountRepository::new(pool))
        .into_make_service_with_connect_info::<SocketAddr>();

    let addr = SocketAddr::from(([127, 0, 0, 1], opts.port));
    let listener = TcpListener::bind(addr)
        .await
        .context(format!("bind :: {addr}"))?;
    tracing::info!(
        "listening on {}",
        listener.local_addr().context("local_addr")?
    );
    axum::serve(listener, app)
        .await
        .context("axum::serve")
        .map_err(|e| e.into())
}

#[derive(thiserror::Error, Debug)]
pub enum ServerError {
    #[error("{0}")]
    Sqlx(#[from] contextual::Error<sqlx::Error>),

    #[error("{0}")]
    Migrate(#[from] contextual::Error<sqlx::migrate::MigrateError>),

    #[error("{0}")]
    Io(#[from] contextual::Error<std::io::Error>),
}
