use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SystemStatus {
    #[serde(default)]
    pub maintenance_mode: bool,
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default)]
    pub uptime: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthReport {
    pub status: String,
    #[serde(default)]
    pub database: Option<String>,
    #[serde(default)]
    pub redis_status: Option<String>,
    #[serde(default)]
    pub version: Option<String>,
}

impl HealthReport {
    pub fn is_healthy(&self) -> bool {
        matches!(self.status.to_lowercase().as_str(), "ok" | "healthy")
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MaintenanceToggle {
    pub enabled: bool,
}

/// Front server health as served by `GET /health`.
#[derive(Debug, Clone, Serialize, Default)]
pub struct FrontendHealth {
    pub status: String,
    pub uptime: String,
    pub timestamp: String,
    pub start_at: String,
    pub version: String,
    pub backend: String,
    pub backend_maintenance: Option<bool>,
}
