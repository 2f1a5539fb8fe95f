//! Api client — single chokepoint for all network I/O.
//!
//! Every resource method is a thin parameter-to-URL/verb mapping over one
//! private request core that:
//! - always sends `Content-Type: application/json`,
//! - attaches `Authorization: Bearer <token>` iff the session store holds
//!   a token,
//! - serializes query parameters only when present (absent parameters are
//!   never sent, not even as empty strings),
//! - fails with [`ApiError::Request`] on any non-2xx status.
//!
//! No caching, no deduplication of in-flight requests, no cancellation,
//! no retries. Failures are logged here and re-thrown; callers decide
//! what to do with them.

use std::sync::Arc;
use std::time::Duration;

use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Method, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::errors::{error_detail, ApiError};
use crate::models::client::{
    Client, ClientCreate, ClientDashboard, ClientListResponse, ClientUpdate, ClientWithProjects,
};
use crate::models::dashboard::{DashboardStats, HealthStatus};
use crate::models::project::{
    Project, ProjectCreate, ProjectListResponse, ProjectStatus, ProjectUpdate,
};
use crate::models::service::{ProjectServices, ServiceType, ServiceTypesResponse, ToggleResponse};
use crate::models::MessageResponse;
use crate::session::SessionStore;

/// Pagination and free-text search for `GET /clients`.
#[derive(Debug, Clone, Default)]
pub struct ClientListParams {
    pub page: Option<u32>,
    pub per_page: Option<u32>,
    pub search: Option<String>,
}

impl ClientListParams {
    fn to_query(&self) -> Vec<(&'static str, String)> {
        let mut query = Vec::new();
        if let Some(page) = self.page {
            query.push(("page", page.to_string()));
        }
        if let Some(per_page) = self.per_page {
            query.push(("per_page", per_page.to_string()));
        }
        if let Some(search) = &self.search {
            query.push(("search", search.clone()));
        }
        query
    }
}

/// Pagination and filters for `GET /projects`.
#[derive(Debug, Clone, Default)]
pub struct ProjectListParams {
    pub page: Option<u32>,
    pub per_page: Option<u32>,
    pub client_id: Option<i64>,
    pub status: Option<ProjectStatus>,
    pub search: Option<String>,
}

impl ProjectListParams {
    fn to_query(&self) -> Vec<(&'static str, String)> {
        let mut query = Vec::new();
        if let Some(page) = self.page {
            query.push(("page", page.to_string()));
        }
        if let Some(per_page) = self.per_page {
            query.push(("per_page", per_page.to_string()));
        }
        if let Some(client_id) = self.client_id {
            query.push(("client_id", client_id.to_string()));
        }
        if let Some(status) = self.status {
            query.push(("status", status.as_str().to_string()));
        }
        if let Some(search) = &self.search {
            query.push(("search", search.clone()));
        }
        query
    }
}

pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    session: Arc<SessionStore>,
}

impl ApiClient {
    /// Build a client against `base_url`, reading bearer tokens from the
    /// injected session store.
    pub fn new(base_url: impl Into<String>, session: Arc<SessionStore>) -> Self {
        let http = reqwest::Client::builder()
            .use_rustls_tls()
            .timeout(Duration::from_secs(30))
            .connect_timeout(Duration::from_secs(5))
            .build()
            .expect("failed to build HTTP client");

        Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            session,
        }
    }

    fn url(&self, endpoint: &str) -> String {
        format!("{}{}", self.base_url, endpoint)
    }

    /// Attach the default headers, send, and decode the typed body.
    async fn execute<T: DeserializeOwned>(
        &self,
        mut req: RequestBuilder,
        endpoint: &str,
    ) -> Result<T, ApiError> {
        req = req.header(CONTENT_TYPE, "application/json");
        if let Some(token) = self.session.token() {
            req = req.header(AUTHORIZATION, format!("Bearer {}", token));
        }

        let resp = req.send().await.map_err(|e| {
            tracing::warn!(endpoint, error = %e, "transport failure");
            ApiError::Transport(e)
        })?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            let detail = error_detail(&body);
            tracing::warn!(endpoint, %status, detail = detail.as_deref(), "request failed");
            return Err(ApiError::Request { status, detail });
        }

        let body = resp.text().await.map_err(ApiError::Transport)?;
        serde_json::from_str(&body).map_err(|e| {
            tracing::error!(endpoint, error = %e, "malformed response payload");
            ApiError::Payload(e)
        })
    }

    async fn get<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        query: &[(&str, String)],
    ) -> Result<T, ApiError> {
        let mut req = self.http.get(self.url(endpoint));
        if !query.is_empty() {
            req = req.query(query);
        }
        self.execute(req, endpoint).await
    }

    async fn send_json<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        method: Method,
        endpoint: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let req = self.http.request(method, self.url(endpoint)).json(body);
        self.execute(req, endpoint).await
    }

    async fn send_empty<T: DeserializeOwned>(
        &self,
        method: Method,
        endpoint: &str,
    ) -> Result<T, ApiError> {
        let req = self.http.request(method, self.url(endpoint));
        self.execute(req, endpoint).await
    }

    // ── Clients ───────────────────────────────────────────────

    pub async fn get_clients(
        &self,
        params: &ClientListParams,
    ) -> Result<ClientListResponse, ApiError> {
        self.get("/clients", &params.to_query()).await
    }

    pub async fn get_client(&self, id: i64) -> Result<ClientWithProjects, ApiError> {
        self.get(&format!("/clients/{}", id), &[]).await
    }

    pub async fn create_client(&self, client: &ClientCreate) -> Result<Client, ApiError> {
        self.send_json(Method::POST, "/clients", client).await
    }

    pub async fn update_client(&self, id: i64, client: &ClientUpdate) -> Result<Client, ApiError> {
        self.send_json(Method::PUT, &format!("/clients/{}", id), client)
            .await
    }

    pub async fn delete_client(&self, id: i64) -> Result<MessageResponse, ApiError> {
        self.send_empty(Method::DELETE, &format!("/clients/{}", id))
            .await
    }

    pub async fn get_client_dashboard(&self, id: i64) -> Result<ClientDashboard, ApiError> {
        self.get(&format!("/clients/{}/dashboard", id), &[]).await
    }

    // ── Projects ──────────────────────────────────────────────

    pub async fn get_projects(
        &self,
        params: &ProjectListParams,
    ) -> Result<ProjectListResponse, ApiError> {
        self.get("/projects", &params.to_query()).await
    }

    pub async fn get_project(&self, id: i64) -> Result<Project, ApiError> {
        self.get(&format!("/projects/{}", id), &[]).await
    }

    pub async fn create_project(&self, project: &ProjectCreate) -> Result<Project, ApiError> {
        self.send_json(Method::POST, "/projects", project).await
    }

    pub async fn update_project(
        &self,
        id: i64,
        project: &ProjectUpdate,
    ) -> Result<Project, ApiError> {
        self.send_json(Method::PUT, &format!("/projects/{}", id), project)
            .await
    }

    pub async fn delete_project(&self, id: i64) -> Result<MessageResponse, ApiError> {
        self.send_empty(Method::DELETE, &format!("/projects/{}", id))
            .await
    }

    // ── Services ──────────────────────────────────────────────

    pub async fn get_project_services(&self, id: i64) -> Result<ProjectServices, ApiError> {
        self.get(&format!("/projects/{}/services", id), &[]).await
    }

    /// Flip one service's active flag. POST with no body; the server is
    /// the authority on the resulting state.
    pub async fn toggle_service(
        &self,
        project_id: i64,
        service: ServiceType,
    ) -> Result<ToggleResponse, ApiError> {
        self.send_empty(
            Method::POST,
            &format!("/projects/{}/services/{}/toggle", project_id, service.as_str()),
        )
        .await
    }

    pub async fn get_service_types(&self) -> Result<ServiceTypesResponse, ApiError> {
        self.get("/services/types", &[]).await
    }

    // ── Dashboard / liveness ──────────────────────────────────

    pub async fn get_dashboard_stats(&self) -> Result<DashboardStats, ApiError> {
        self.get("/dashboard/stats", &[]).await
    }

    pub async fn health_check(&self) -> Result<HealthStatus, ApiError> {
        self.get("/health", &[]).await
    }
}

// ── Tests ──────────────────────────────────────────────────────
