use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;

pub static START_TIME: Lazy<DateTime<Utc>> = Lazy::new(Utc::now);

/// Prefix every backend route lives under.
pub const API_PREFIX: &str = "/api";

/// Header carrying a per-request correlation id to the backend.
pub const REQUEST_ID_HEADER: &str = "x-request-id";
