use actix_web::{middleware::NormalizePath, web};

use crate::handlers::{home::home, system::health_check};

mod proxy;
mod skills;

/// Front server pages. Trailing slashes are trimmed here only, so proxied
/// `/api/*` paths reach the backend exactly as the browser sent them.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("")
            .wrap(NormalizePath::trim())
            .service(home)
            .service(health_check)
            .configure(skills::config_routes),
    );
}

/// `/api/*` pass-through to the backend, mounted outside production. Must be
/// registered before [`configure_routes`], whose catch-all scope would
/// otherwise shadow it.
pub fn configure_dev_proxy(cfg: &mut web::ServiceConfig, upload_max_bytes: usize) {
    proxy::config_routes(cfg, upload_max_bytes);
}
