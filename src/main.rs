use mimalloc::MiMalloc;
use tokio::net::TcpListener;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    let cfg = &voltlead::config::CONFIG;

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(cfg.loglevel.clone()));
    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_level(true)
                .with_target(false),
        )
        .init();

    if cfg.jwt_secret.is_empty() {
        return Err("JWT_SECRET must be set".into());
    }

    info!(
        database_url = %cfg.database_url,
        listen_addr = %cfg.listen_addr,
        loglevel = %cfg.loglevel,
        insecure_cookie = cfg.insecure_cookie
    );

    let storage = voltlead::db::LeadStorage::connect(&cfg.database_url).await?;

    match (cfg.admin_email.as_deref(), cfg.admin_password.as_deref()) {
        (Some(email), Some(password)) => {
            voltlead::service::session::seed_admin(&storage, email, password).await?;
        }
        (None, None) => {
            info!("no admin credentials configured; panel login requires an existing user");
        }
        _ => {
            warn!("ADMIN_EMAIL and ADMIN_PASSWORD must both be set; skipping admin seeding");
        }
    }

    let state = voltlead::router::AppState::new(storage, cfg);
    let app = voltlead::router::voltlead_router(state);

    let listener = TcpListener::bind(&cfg.listen_addr).await?;
    info!("HTTP server listening on {}", cfg.listen_addr);
    axum::serve(listener, app).await?;
    Ok(())
}
