use actix_web::{get, web, HttpResponse, Responder};
use chrono::Utc;
use humantime::format_duration;
use once_cell::sync::Lazy;
use parking_lot::RwLock;
use std::{
    sync::atomic::{AtomicI64, Ordering},
    time::Duration,
};

use crate::{constants::START_TIME, entities::system::FrontendHealth, AppState};

const CACHE_SECS: i64 = 5;

static LAST_CHECK: AtomicI64 = AtomicI64::new(0);
static CACHED_STATUS: Lazy<RwLock<FrontendHealth>> = Lazy::new(|| RwLock::new(FrontendHealth::default()));

async fn build_health_response(state: &AppState) -> FrontendHealth {
    let now_utc = Utc::now();
    let uptime = now_utc.signed_duration_since(*START_TIME);
    let human_uptime = format_duration(Duration::from_secs(uptime.num_seconds().max(0) as u64));

    let (health, status) = futures::join!(state.system_handler.health(), state.system_handler.status());

    let backend = match health {
        Ok(report) if report.is_healthy() => "OK",
        Ok(report) => {
            tracing::warn!(status = %report.status, "Backend reports degraded health");
            "Degraded"
        }
        Err(e) => {
            tracing::warn!("Backend health probe failed: {}", e);
            "Unavailable"
        }
    };

    FrontendHealth {
        status: "healthy".to_string(),
        uptime: human_uptime.to_string(),
        timestamp: now_utc.to_rfc3339(),
        start_at: START_TIME.to_rfc3339(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        backend: backend.to_string(),
        backend_maintenance: status.ok().map(|s| s.maintenance_mode),
    }
}

/// Front server health plus a backend probe, recomputed at most every few
/// seconds.
#[get("/health")]
pub async fn health_check(state: web::Data<AppState>) -> impl Responder {
    let now = Utc::now().timestamp();
    let last = LAST_CHECK.load(Ordering::Relaxed);

    if now - last > CACHE_SECS {
        let response = build_health_response(&state).await;
        *CACHED_STATUS.write() = response.clone();
        LAST_CHECK.store(now, Ordering::Relaxed);

        HttpResponse::Ok().json(response)
    } else {
        HttpResponse::Ok().json(CACHED_STATUS.read().clone())
    }
}
