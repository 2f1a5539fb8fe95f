//! Multi-call user actions with a sequential, partial-failure contract.
//!
//! Calls within one action are issued one at a time, each awaited before
//! the next. Individual failures inside a batch are logged and skipped —
//! never rolled back, never hidden: the outcome reports exactly what
//! completed.

use std::collections::BTreeMap;

use crate::api::ApiClient;
use crate::errors::ApiError;
use crate::models::project::{Project, ProjectCreate};
use crate::models::service::{ProjectServices, ServiceType};

/// Result of [`provision_project`]: the created project plus which of the
/// requested service activations went through.
#[derive(Debug)]
pub struct ProvisionOutcome {
    pub project: Project,
    pub activated: Vec<ServiceType>,
    pub skipped: Vec<ServiceType>,
}

impl ProvisionOutcome {
    pub fn is_complete(&self) -> bool {
        self.skipped.is_empty()
    }
}

/// Create a project, then toggle each requested service in order.
///
/// A failed creation aborts the whole action. A failed toggle does not:
/// the project stays created, the failure is logged, and the remaining
/// services are still attempted.
pub async fn provision_project(
    api: &ApiClient,
    new_project: ProjectCreate,
    services: &[ServiceType],
) -> Result<ProvisionOutcome, ApiError> {
    let project = api.create_project(&new_project).await?;
    tracing::info!(project_id = project.id, name = %project.name, "project created");

    let mut activated = Vec::new();
    let mut skipped = Vec::new();
    for &service in services {
        match api.toggle_service(project.id, service).await {
            Ok(_) => activated.push(service),
            Err(e) => {
                tracing::warn!(
                    project_id = project.id,
                    service = %service,
                    error = %e,
                    "service activation failed, continuing"
                );
                skipped.push(service);
            }
        }
    }

    Ok(ProvisionOutcome {
        project,
        activated,
        skipped,
    })
}

/// Load the service mapping for each project, skipping projects whose
/// fetch fails (as the client detail view does).
pub async fn load_project_services(
    api: &ApiClient,
    projects: &[Project],
) -> BTreeMap<i64, ProjectServices> {
    let mut loaded = BTreeMap::new();
    for project in projects {
        match api.get_project_services(project.id).await {
            Ok(services) => {
                loaded.insert(project.id, services);
            }
            Err(e) => {
                tracing::warn!(project_id = project.id, error = %e, "skipping project services");
            }
        }
    }
    loaded
}
