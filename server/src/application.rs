use anyhow::Context as _;
use sqlx::PgPool;
use time::Duration;
use tower_sessions::{Expiry, SessionManagerLayer};
use tower_sessions_sqlx_store::PostgresStore;

use api::db::PgItems;

use crate::routes;
use crate::settings::Settings;

/// Shared state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub items: PgItems,
}

/// Launch the server with a session store for authentication.
pub async fn serve(settings: Settings, pool: PgPool) -> anyhow::Result<()> {
    // Create the session store
    let session_store = PostgresStore::new(pool.clone());
    session_store
        .migrate()
        .await
        .context("failed to migrate session store")?;

    // Create a tower layer
    let session_layer = SessionManagerLayer::new(session_store)
        .with_secure(false)
        .with_expiry(Expiry::OnInactivity(Duration::seconds(
            settings.session.lifetime,
        )));

    let state = AppState {
        pool: pool.clone(),
        items: PgItems::new(pool),
    };
    let app = routes::router(state).layer(session_layer);

    let addr = format!("{}:{}", settings.http.host, settings.http.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    tracing::info!(%addr, "listening");

    axum::serve(listener, app).await.context("server error")
}
