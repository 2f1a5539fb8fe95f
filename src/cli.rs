use clap::{Parser, Subcommand};

use crate::models::project::{BillingType, ProjectStatus};
use crate::models::service::ServiceType;

/// Tucan Console — admin CLI for the Tucan Manager API
#[derive(Parser)]
#[command(name = "tucan", version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Log in and persist the session
    Login {
        #[arg(long)]
        username: String,
        #[arg(long, env = "TUCAN_PASSWORD", hide_env_values = true)]
        password: String,
    },

    /// Clear the persisted session
    Logout,

    /// Show the currently logged-in user
    Whoami,

    /// Manage clients
    Client {
        #[command(subcommand)]
        command: ClientCommands,
    },

    /// Manage projects and their service toggles
    Project {
        #[command(subcommand)]
        command: ProjectCommands,
    },

    /// List the service catalog
    Services,

    /// Aggregate dashboard metrics
    Stats,

    /// API liveness check
    Health,
}

impl Commands {
    /// The console route a command corresponds to, for the route guard.
    pub fn route(&self) -> &'static str {
        match self {
            Commands::Login { .. } | Commands::Logout => "/login",
            Commands::Whoami => "/clients",
            Commands::Client { .. } => "/clients",
            Commands::Project { .. } => "/projects",
            Commands::Services => "/services",
            Commands::Stats => "/",
            Commands::Health => "/health",
        }
    }
}

#[derive(Subcommand)]
pub enum ClientCommands {
    /// List clients, paginated, with optional free-text search
    List {
        #[arg(long)]
        page: Option<u32>,
        #[arg(long)]
        per_page: Option<u32>,
        #[arg(long)]
        search: Option<String>,
    },
    /// Fetch one client with its projects and derived status
    Get {
        id: i64,
    },
    /// Create a client
    Create {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        legal_representative: Option<String>,
        #[arg(long)]
        contact_person: Option<String>,
        #[arg(long)]
        phone: Option<String>,
    },
    /// Update client fields; omitted flags are left untouched
    Update {
        id: i64,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        legal_representative: Option<String>,
        #[arg(long)]
        contact_person: Option<String>,
        #[arg(long)]
        phone: Option<String>,
        #[arg(long)]
        logo_url: Option<String>,
    },
    /// Delete a client
    Delete {
        id: i64,
    },
    /// Client summary metrics
    Dashboard {
        id: i64,
    },
}

#[derive(Subcommand)]
pub enum ProjectCommands {
    /// List projects, filterable by client, status, and search
    List {
        #[arg(long)]
        page: Option<u32>,
        #[arg(long)]
        per_page: Option<u32>,
        #[arg(long)]
        client_id: Option<i64>,
        #[arg(long, value_enum)]
        status: Option<ProjectStatus>,
        #[arg(long)]
        search: Option<String>,
    },
    /// Fetch one project
    Get {
        id: i64,
    },
    /// Create a project, optionally activating services right away
    Create {
        #[arg(long)]
        client_id: i64,
        #[arg(long)]
        name: String,
        #[arg(long)]
        description: Option<String>,
        /// Start date, RFC 3339 or YYYY-MM-DD
        #[arg(long)]
        start_date: String,
        /// End date, RFC 3339 or YYYY-MM-DD
        #[arg(long)]
        end_date: Option<String>,
        #[arg(long, value_enum, default_value_t = ProjectStatus::Active)]
        status: ProjectStatus,
        #[arg(long, value_enum, default_value_t = BillingType::Monthly)]
        billing_type: BillingType,
        /// Services to activate after creation, comma-separated
        #[arg(long, value_enum, value_delimiter = ',')]
        services: Vec<ServiceType>,
    },
    /// Update project fields; omitted flags are left untouched
    Update {
        id: i64,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long, value_enum)]
        status: Option<ProjectStatus>,
        #[arg(long)]
        logo_url: Option<String>,
        #[arg(long)]
        primary_color: Option<String>,
        #[arg(long)]
        secondary_color: Option<String>,
    },
    /// Delete a project
    Delete {
        id: i64,
    },
    /// Show the project's service-state mapping
    Services {
        id: i64,
    },
    /// Flip one service's active flag
    Toggle {
        id: i64,
        #[arg(value_enum)]
        service: ServiceType,
    },
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn login_and_logout_map_to_the_public_route() {
        let cli = Cli::parse_from(["tucan", "logout"]);
        assert_eq!(cli.command.route(), "/login");
    }

    #[test]
    fn protected_commands_map_to_protected_routes() {
        let cli = Cli::parse_from(["tucan", "client", "list"]);
        assert_eq!(cli.command.route(), "/clients");
        let cli = Cli::parse_from(["tucan", "project", "get", "7"]);
        assert_eq!(cli.command.route(), "/projects");
    }

    #[test]
    fn toggle_parses_service_wire_names() {
        let cli = Cli::parse_from(["tucan", "project", "toggle", "7", "mdm"]);
        let Commands::Project {
            command: ProjectCommands::Toggle { id, service },
        } = cli.command
        else {
            panic!("wrong command parsed");
        };
        assert_eq!(id, 7);
        assert_eq!(service, ServiceType::Mdm);
    }

    #[test]
    fn create_accepts_comma_separated_services() {
        let cli = Cli::parse_from([
            "tucan",
            "project",
            "create",
            "--client-id",
            "3",
            "--name",
            "Rollout",
            "--start-date",
            "2025-01-01",
            "--services",
            "mdm,dynamic_forms,reporting",
        ]);
        let Commands::Project {
            command: ProjectCommands::Create { services, .. },
        } = cli.command
        else {
            panic!("wrong command parsed");
        };
        assert_eq!(
            services,
            vec![
                ServiceType::Mdm,
                ServiceType::DynamicForms,
                ServiceType::Reporting
            ]
        );
    }
}
