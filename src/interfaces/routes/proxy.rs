use actix_web::web;

use crate::{constants::API_PREFIX, handlers::proxy};

/// Headroom over the upload limit for multipart boundaries and part headers.
const MULTIPART_OVERHEAD: usize = 64 * 1024;

pub fn config_routes(cfg: &mut web::ServiceConfig, upload_max_bytes: usize) {
    cfg.service(
        web::resource(format!("{}/{{tail:.*}}", API_PREFIX))
            .app_data(web::PayloadConfig::new(upload_max_bytes + MULTIPART_OVERHEAD))
            .route(web::route().to(proxy::proxy))
    );
}
