//! # Promo-Engine RS
//!
//! Best-coupon selection service.
//!
//! ## Usage
//!
//! ```bash
//! # Optional: where to listen (defaults shown)
//! export HOST=127.0.0.1
//! export PORT=8080
//!
//! # Run the server (seeds from config/coupons.toml when present)
//! promo-engine
//! ```

use promo_api::{routes, state::AppState};
use tracing::{info, Level};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(
            EnvFilter::builder()
                .with_default_directive(Level::INFO.into())
                .from_env_lossy(),
        )
        .init();

    // Print banner
    print_banner();

    // Initialize application state
    let state = AppState::new().await?;

    let addr = state.config.socket_addr();
    let is_prod = state.config.is_production();

    info!("Environment: {}", state.config.environment);
    info!("Coupons registered: {}", state.catalog.list().await?.len());

    // Create router
    let app = routes::create_router(state);

    // Start server
    info!("🎟️ Promo-Engine starting on http://{}", addr);

    if !is_prod {
        info!("📝 Health: http://{}/health", addr);
        info!("🎫 Create coupon: POST http://{}/api/v1/coupons", addr);
        info!("🛒 Best coupon: POST http://{}/api/v1/best-coupon", addr);
    }

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

fn print_banner() {
    println!(
        r#"
  🎟️ Promo-Engine RS 🎟️
  ━━━━━━━━━━━━━━━━━━━━━━━
  Best-coupon selection engine
  Version: {}

"#,
        env!("CARGO_PKG_VERSION")
    );
}
