use actix_web::{get, web, HttpResponse, Responder};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::{
    errors::AppError,
    skill_wheel::{Segment, SkillWheel, WheelState},
    AppState,
};

#[derive(Debug, Serialize)]
struct WheelResponse {
    segments: Vec<Segment>,
    average: Option<u8>,
    label: String,
}

impl From<SkillWheel> for WheelResponse {
    fn from(wheel: SkillWheel) -> Self {
        WheelResponse {
            label: wheel.average_label(),
            average: wheel.average,
            segments: wheel.segments,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct WheelQuery {
    /// Skill name to highlight, as if hovered.
    pub active: Option<String>,
}

#[get("/skills/wheel")]
#[instrument(skip(state))]
pub async fn skill_wheel(state: web::Data<AppState>) -> Result<impl Responder, AppError> {
    let wheel = state.about_handler.get_skill_wheel().await?;
    Ok(HttpResponse::Ok().json(WheelResponse::from(wheel)))
}

#[get("/skills/wheel.svg")]
#[instrument(skip(state))]
pub async fn skill_wheel_svg(
    state: web::Data<AppState>,
    query: web::Query<WheelQuery>,
) -> Result<impl Responder, AppError> {
    let wheel = state.about_handler.get_skill_wheel().await?;

    let mut view = WheelState::default();
    if let Some(key) = query.active.as_deref().and_then(|name| wheel.find(name)) {
        view.pointer_over(key);
    }

    Ok(HttpResponse::Ok()
        .content_type("image/svg+xml")
        .body(wheel.to_svg(&view)))
}
