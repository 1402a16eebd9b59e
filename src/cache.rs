//! In-memory caching using moka
//!
//! The silver rate and company settings are read on every quote, so both
//! are held briefly in memory. The TTL bounds how stale a quote's silver
//! rate can be after an admin publishes a new one.

use moka::future::Cache;
use serde::Serialize;
use sqlx::PgPool;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::interval;
use tracing::{info, warn};

use crate::pricing::models::{CompanySettings, SilverRate};
use crate::pricing::queries;

/// Application cache for pricing inputs.
#[derive(Clone)]
pub struct AppCache {
    /// Current silver rate (singleton)
    pub silver_rate: Cache<String, Arc<SilverRate>>,
    /// Company settings (singleton)
    pub company_settings: Cache<String, Arc<CompanySettings>>,
}

impl AppCache {
    pub const SILVER_RATE_KEY: &'static str = "silver_rate:current";
    pub const COMPANY_SETTINGS_KEY: &'static str = "company_settings";

    /// Create a new cache instance; `rate_ttl` applies to the silver rate.
    pub fn new(rate_ttl: Duration) -> Self {
        Self {
            silver_rate: Cache::builder()
                .max_capacity(1)
                .time_to_live(rate_ttl)
                .build(),

            // Company settings change rarely: 1 entry, 10 min TTL
            company_settings: Cache::builder()
                .max_capacity(1)
                .time_to_live(Duration::from_secs(10 * 60))
                .build(),
        }
    }

    /// Get cache statistics for monitoring
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            silver_rate_cached: self.silver_rate.entry_count() > 0,
            company_settings_cached: self.company_settings.entry_count() > 0,
        }
    }

    /// Invalidate all caches
    pub fn invalidate_all(&self) {
        self.silver_rate.invalidate_all();
        self.company_settings.invalidate_all();
        info!("All caches invalidated");
    }
}

impl Default for AppCache {
    fn default() -> Self {
        Self::new(Duration::from_secs(60))
    }
}

/// Cache statistics for the health endpoint
#[derive(Debug, Clone, Serialize)]
pub struct CacheStats {
    pub silver_rate_cached: bool,
    pub company_settings_cached: bool,
}

/// Start background cache warmer
///
/// Warms the cache on startup and refreshes it every `every`.
pub async fn start_cache_warmer(cache: AppCache, db: PgPool, every: Duration) {
    let mut interval = interval(every);
    loop {
        // First tick completes immediately
        interval.tick().await;
        warm_cache(&cache, &db).await;
    }
}

/// Warm the cache with the current pricing inputs
async fn warm_cache(cache: &AppCache, db: &PgPool) {
    match queries::get_current_silver_rate(db, chrono::Utc::now()).await {
        Ok(Some(rate)) => {
            cache
                .silver_rate
                .insert(AppCache::SILVER_RATE_KEY.to_string(), Arc::new(rate))
                .await;
        }
        Ok(None) => warn!("No silver rate published yet"),
        Err(e) => warn!("Failed to warm silver rate cache: {}", e),
    }

    match queries::get_company_settings(db).await {
        Ok(Some(settings)) => {
            cache
                .company_settings
                .insert(AppCache::COMPANY_SETTINGS_KEY.to_string(), Arc::new(settings))
                .await;
        }
        Ok(None) => warn!("Company settings missing"),
        Err(e) => warn!("Failed to warm company settings cache: {}", e),
    }

    tracing::debug!("Cache warm-up complete. Stats: {:?}", cache.stats());
}
