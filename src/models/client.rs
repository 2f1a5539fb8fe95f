use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::project::{Project, ProjectStatus};

/// A tenant/customer entity owning projects.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Client {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub legal_representative: Option<String>,
    pub contact_person: Option<String>,
    pub phone: Option<String>,
    pub logo_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ClientCreate {
    pub name: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub legal_representative: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact_person: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

/// Partial update; `None` fields are omitted from the request body.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ClientUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub legal_representative: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact_person: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logo_url: Option<String>,
}

/// Detail view: the client joined with its projects.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientWithProjects {
    #[serde(flatten)]
    pub client: Client,
    #[serde(default)]
    pub projects: Vec<Project>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientListResponse {
    pub clients: Vec<Client>,
    pub total: u64,
    pub page: u32,
    pub per_page: u32,
    pub total_pages: u32,
}

/// Summary metrics served by `GET /clients/:id/dashboard`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientMetrics {
    pub total_projects: u64,
    pub active_projects: u64,
    pub completed_projects: u64,
    /// Active service count per service-type wire name.
    #[serde(default)]
    pub active_services: BTreeMap<String, u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientDashboard {
    pub client: Client,
    pub metrics: ClientMetrics,
    #[serde(default)]
    pub recent_projects: Vec<Project>,
}

/// Derived client status. Not stored anywhere — always computed from the
/// client's current project list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ClientStatus {
    Active,
    Inactive,
    NoProjects,
}

impl std::fmt::Display for ClientStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            ClientStatus::Active => "active",
            ClientStatus::Inactive => "inactive",
            ClientStatus::NoProjects => "no_projects",
        })
    }
}

/// Tie-break: any active project ⇒ active; else any project ⇒ inactive;
/// else ⇒ no projects.
pub fn client_status(projects: &[Project]) -> ClientStatus {
    if projects.iter().any(|p| p.status == ProjectStatus::Active) {
        ClientStatus::Active
    } else if !projects.is_empty() {
        ClientStatus::Inactive
    } else {
        ClientStatus::NoProjects
    }
}

// ── Tests ──────────────────────────────────────────────────────
