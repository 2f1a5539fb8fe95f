use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use clap::ValueEnum;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// The fixed catalog of platform capabilities that can be enabled per
/// project. Wire names match the API's enum values.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, ValueEnum,
)]
#[serde(rename_all = "snake_case")]
#[value(rename_all = "snake_case")]
pub enum ServiceType {
    Mdm,
    DynamicForms,
    Reporting,
    Elearning,
    Omnichannel,
    CommunicationCampaigns,
}

impl ServiceType {
    pub const ALL: [ServiceType; 6] = [
        ServiceType::Mdm,
        ServiceType::DynamicForms,
        ServiceType::Reporting,
        ServiceType::Elearning,
        ServiceType::Omnichannel,
        ServiceType::CommunicationCampaigns,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ServiceType::Mdm => "mdm",
            ServiceType::DynamicForms => "dynamic_forms",
            ServiceType::Reporting => "reporting",
            ServiceType::Elearning => "elearning",
            ServiceType::Omnichannel => "omnichannel",
            ServiceType::CommunicationCampaigns => "communication_campaigns",
        }
    }
}

impl std::fmt::Display for ServiceType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-project state of one service: the active flag plus the usage and
/// billing figures the API returns alongside it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceState {
    pub id: i64,
    pub is_active: bool,
    pub cost_per_unit: Option<Decimal>,
    pub monthly_cost: Option<Decimal>,
    pub activated_at: Option<DateTime<Utc>>,
    pub deactivated_at: Option<DateTime<Utc>>,
}

/// Service-state mapping for a single project, keyed by service type.
///
/// Mutated only through the toggle endpoint; the console never bulk-
/// replaces this mapping.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectServices {
    pub project_id: i64,
    pub project_name: String,
    #[serde(default)]
    pub services: BTreeMap<ServiceType, ServiceState>,
}

impl ProjectServices {
    /// Apply a confirmed toggle to the local copy: flips `is_active` for
    /// the given key only, leaving every other entry untouched. A key the
    /// server never reported is ignored.
    pub fn apply_toggle(&mut self, service: ServiceType, is_active: bool) {
        if let Some(state) = self.services.get_mut(&service) {
            state.is_active = is_active;
        }
    }
}

/// Body of the toggle confirmation.
#[derive(Debug, Clone, Deserialize)]
pub struct ToggleResponse {
    pub message: String,
    pub service: ToggledService,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ToggledService {
    #[serde(rename = "type")]
    pub service_type: ServiceType,
    pub is_active: bool,
    pub activated_at: Option<DateTime<Utc>>,
    pub deactivated_at: Option<DateTime<Utc>>,
}

/// One catalog entry from `GET /services/types`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceTypeInfo {
    pub value: ServiceType,
    pub label: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceTypesResponse {
    pub services: Vec<ServiceTypeInfo>,
}

// ── Tests ──────────────────────────────────────────────────────
