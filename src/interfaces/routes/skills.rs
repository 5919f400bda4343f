use actix_web::web;

use crate::handlers::skills;

pub fn config_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(skills::skill_wheel)
        .service(skills::skill_wheel_svg);
}
