use serde::{Deserialize, Serialize};

/// `GET /health` liveness answer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
}

/// Aggregate metrics from `GET /dashboard/stats`. Fields are defaulted so
/// a sparse server answer still decodes.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DashboardStats {
    #[serde(default)]
    pub total_clients: u64,
    #[serde(default)]
    pub total_projects: u64,
    #[serde(default)]
    pub active_projects: u64,
    #[serde(default)]
    pub active_services: u64,
}
