use std::sync::Arc;

use anyhow::{bail, Context};
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use console::api::{ApiClient, ClientListParams, ProjectListParams};
use console::auth::context::AuthContext;
use console::auth::guard::{self, GuardDecision};
use console::auth::AuthService;
use console::cli::{Cli, ClientCommands, Commands, ProjectCommands};
use console::models::client::{client_status, ClientCreate, ClientUpdate};
use console::models::project::{ProjectCreate, ProjectUpdate};
use console::models::user::LoginCredentials;
use console::session::SessionStore;
use console::{config, workflows};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "console=info".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cfg = config::load()?;
    let args = Cli::parse();

    let session = Arc::new(SessionStore::open(&cfg.session_file)?);
    let api = ApiClient::new(&cfg.api_base_url, Arc::clone(&session));
    let auth = AuthService::new(&cfg.api_base_url, Arc::clone(&session));
    let ctx = AuthContext::new(auth);
    ctx.initialize().await;

    // The CLI rendition of the route guard: commands map to console
    // routes, and a redirect decision terminates before dispatch.
    match guard::decide(&ctx.current(), args.command.route()) {
        GuardDecision::Render => {}
        GuardDecision::Loading => bail!("session is still initializing"),
        GuardDecision::Redirect(target) if target == guard::LOGIN_ROUTE => {
            bail!("not authenticated — run `tucan login` first");
        }
        GuardDecision::Redirect(_) => {
            match ctx.user() {
                Some(user) => println!(
                    "already logged in as {} <{}>; run `tucan logout` first",
                    user.username, user.email
                ),
                None => println!("already logged in; run `tucan logout` first"),
            }
            return Ok(());
        }
    }

    match args.command {
        Commands::Login { username, password } => {
            let credentials = LoginCredentials { username, password };
            let user = ctx.login(&credentials).await?;
            println!("logged in as {} <{}>", user.username, user.email);
        }

        Commands::Logout => {
            ctx.logout();
            println!("session cleared");
        }

        Commands::Whoami => match ctx.user() {
            Some(user) => print_json(&user)?,
            None => bail!("no active session"),
        },

        Commands::Client { command } => run_client_command(&api, command).await?,
        Commands::Project { command } => run_project_command(&api, command).await?,

        Commands::Services => {
            let catalog = api.get_service_types().await?;
            print_json(&catalog)?;
        }

        Commands::Stats => {
            let stats = api.get_dashboard_stats().await?;
            print_json(&stats)?;
        }

        Commands::Health => {
            let health = api.health_check().await?;
            println!("API is {}", health.status);
        }
    }

    Ok(())
}

async fn run_client_command(api: &ApiClient, command: ClientCommands) -> anyhow::Result<()> {
    match command {
        ClientCommands::List {
            page,
            per_page,
            search,
        } => {
            let list = api
                .get_clients(&ClientListParams {
                    page,
                    per_page,
                    search,
                })
                .await?;
            print_json(&list)?;
        }

        ClientCommands::Get { id } => {
            let client = api.get_client(id).await?;
            print_json(&client)?;
            println!("derived status: {}", client_status(&client.projects));
        }

        ClientCommands::Create {
            name,
            email,
            legal_representative,
            contact_person,
            phone,
        } => {
            let created = api
                .create_client(&ClientCreate {
                    name,
                    email,
                    legal_representative,
                    contact_person,
                    phone,
                })
                .await?;
            println!("created client {} ({})", created.name, created.id);
        }

        ClientCommands::Update {
            id,
            name,
            email,
            legal_representative,
            contact_person,
            phone,
            logo_url,
        } => {
            let updated = api
                .update_client(
                    id,
                    &ClientUpdate {
                        name,
                        email,
                        legal_representative,
                        contact_person,
                        phone,
                        logo_url,
                    },
                )
                .await?;
            println!("updated client {} ({})", updated.name, updated.id);
        }

        ClientCommands::Delete { id } => {
            let confirmation = api.delete_client(id).await?;
            println!("{}", confirmation.message);
        }

        ClientCommands::Dashboard { id } => {
            let dashboard = api.get_client_dashboard(id).await?;
            print_json(&dashboard)?;
        }
    }
    Ok(())
}

async fn run_project_command(api: &ApiClient, command: ProjectCommands) -> anyhow::Result<()> {
    match command {
        ProjectCommands::List {
            page,
            per_page,
            client_id,
            status,
            search,
        } => {
            let list = api
                .get_projects(&ProjectListParams {
                    page,
                    per_page,
                    client_id,
                    status,
                    search,
                })
                .await?;
            print_json(&list)?;
        }

        ProjectCommands::Get { id } => {
            let project = api.get_project(id).await?;
            print_json(&project)?;
        }

        ProjectCommands::Create {
            client_id,
            name,
            description,
            start_date,
            end_date,
            status,
            billing_type,
            services,
        } => {
            let new_project = ProjectCreate {
                client_id,
                name,
                description,
                status,
                start_date: parse_date(&start_date)?,
                end_date: end_date.as_deref().map(parse_date).transpose()?,
                primary_color: None,
                secondary_color: None,
                billing_type,
                billing_rate: None,
            };
            let outcome = workflows::provision_project(api, new_project, &services).await?;
            println!(
                "created project {} ({})",
                outcome.project.name, outcome.project.id
            );
            for service in &outcome.activated {
                println!("activated {}", service);
            }
            for service in &outcome.skipped {
                println!("failed to activate {} (skipped)", service);
            }
        }

        ProjectCommands::Update {
            id,
            name,
            description,
            status,
            logo_url,
            primary_color,
            secondary_color,
        } => {
            let updated = api
                .update_project(
                    id,
                    &ProjectUpdate {
                        name,
                        description,
                        status,
                        logo_url,
                        primary_color,
                        secondary_color,
                        ..Default::default()
                    },
                )
                .await?;
            println!("updated project {} ({})", updated.name, updated.id);
        }

        ProjectCommands::Delete { id } => {
            let confirmation = api.delete_project(id).await?;
            println!("{}", confirmation.message);
        }

        ProjectCommands::Services { id } => {
            let services = api.get_project_services(id).await?;
            print_json(&services)?;
        }

        ProjectCommands::Toggle { id, service } => {
            let resp = api.toggle_service(id, service).await?;
            println!("{}", resp.message);
        }
    }
    Ok(())
}

/// Accepts RFC 3339 or a bare `YYYY-MM-DD` (interpreted as UTC midnight).
fn parse_date(raw: &str) -> anyhow::Result<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Ok(dt.with_timezone(&Utc));
    }
    let date = NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .with_context(|| format!("invalid date {:?}, expected RFC 3339 or YYYY-MM-DD", raw))?;
    Ok(DateTime::from_naive_utc_and_offset(
        date.and_time(NaiveTime::MIN),
        Utc,
    ))
}

fn print_json<T: serde::Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
