use axum::Json;
use serde::Serialize;

use crate::config::{self, ApiConfig};

/// Feature flags the frontend reads before rendering its navigation
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SystemInfo {
    /// No embedded database console is ever served
    #[serde(rename = "springH2ConsoleEnabled")]
    pub h2_console_enabled: bool,
    #[serde(rename = "showSwaggerUILink")]
    pub show_swagger_ui_link: bool,
    pub source_repo: Option<String>,
    pub version: &'static str,
}

impl SystemInfo {
    pub fn from_config(api: &ApiConfig) -> Self {
        Self {
            h2_console_enabled: false,
            show_swagger_ui_link: false,
            source_repo: api.source_repo.clone(),
            version: env!("CARGO_PKG_VERSION"),
        }
    }
}

/// GET /api/systemInfo - public
pub async fn get() -> Json<SystemInfo> {
    Json(SystemInfo::from_config(&config::config().api))
}
