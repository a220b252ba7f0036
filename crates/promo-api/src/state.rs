//! # Application State
//!
//! Shared state for the Axum application: configuration plus the
//! catalog and ledger handles every handler evaluates against.

use promo_core::{BoxedCouponCatalog, BoxedUsageLedger};
use promo_store::{seed_catalog, CouponFile, MemoryCatalog, MemoryLedger};
use std::sync::Arc;

/// Application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Host to bind to
    pub host: String,
    /// Port to listen on
    pub port: u16,
    /// Environment (development, staging, production)
    pub environment: String,
}

impl AppConfig {
    /// Load from environment variables
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        Self {
            host: std::env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: std::env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string()),
        }
    }

    /// Get the socket address to bind to
    pub fn socket_addr(&self) -> std::net::SocketAddr {
        format!("{}:{}", self.host, self.port)
            .parse()
            .expect("Invalid socket address")
    }

    /// Check if running in production
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::from_env()
    }
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Coupon catalog
    pub catalog: BoxedCouponCatalog,
    /// Per-user redemption counts
    pub ledger: BoxedUsageLedger,
    /// Application config
    pub config: AppConfig,
}

impl AppState {
    /// Create a new AppState with in-memory storage, seeded from the
    /// coupon config file when one is present.
    pub async fn new() -> anyhow::Result<Self> {
        let config = AppConfig::from_env();
        let catalog: BoxedCouponCatalog = Arc::new(MemoryCatalog::new());
        let ledger: BoxedUsageLedger = Arc::new(MemoryLedger::new());

        if let Some(file) = load_coupon_file() {
            let registered = seed_catalog(catalog.as_ref(), ledger.as_ref(), file)
                .await
                .map_err(|e| anyhow::anyhow!("Failed to seed coupon catalog: {}", e))?;
            tracing::info!("Seeded {} coupons", registered);
        }

        Ok(Self {
            catalog,
            ledger,
            config,
        })
    }

    /// Create state around explicit stores (used by tests)
    pub fn with_stores(catalog: BoxedCouponCatalog, ledger: BoxedUsageLedger) -> Self {
        Self {
            catalog,
            ledger,
            config: AppConfig {
                host: "127.0.0.1".to_string(),
                port: 0,
                environment: "test".to_string(),
            },
        }
    }
}

/// Load the coupon seed file from config
fn load_coupon_file() -> Option<CouponFile> {
    let config_paths = [
        "config/coupons.toml",
        "../config/coupons.toml",
        "../../config/coupons.toml",
    ];

    for path in config_paths {
        if let Ok(content) = std::fs::read_to_string(path) {
            match CouponFile::from_toml(&content) {
                Ok(file) => {
                    tracing::info!("Loaded {} coupons from {}", file.coupons.len(), path);
                    return Some(file);
                }
                Err(e) => {
                    tracing::error!("Failed to parse {}: {}", path, e);
                    return None;
                }
            }
        }
    }

    tracing::warn!("No coupon seed file found, starting with an empty catalog");
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_config_defaults() {
        // Clear env vars for test
        std::env::remove_var("HOST");
        std::env::remove_var("PORT");

        let config = AppConfig::from_env();
        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.port, 8080);
    }

    #[test]
    fn test_socket_addr() {
        let config = AppConfig {
            host: "0.0.0.0".to_string(),
            port: 3000,
            environment: "test".to_string(),
        };

        let addr = config.socket_addr();
        assert_eq!(addr.to_string(), "0.0.0.0:3000");
    }
}
