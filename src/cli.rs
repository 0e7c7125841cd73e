use anyhow::{Context, Result, anyhow};
use chrono::{NaiveDate, Utc};
use clap::{Args as ClapArgs, Parser, Subcommand};
use std::sync::Arc;
use tracing::{debug, warn};

use crate::api::ApiClient;
use crate::auth::{FileSessionStore, Session, SessionEvent};
use crate::config::ClientConfig;
use crate::dashboard::{DEFAULT_DISTANCE, Dashboard, SearchForm, SearchOutcome};
use crate::models::applications::{CreateApplication, UpdateApplication, filter_by_status};
use crate::models::saved_queries::{CreateSavedQuery, UpdateSavedQuery};
use crate::models::users::{LoginRequest, SignupRequest};
use crate::models::ApplicationStatus;
use crate::render;
use crate::view::{FilterCriteria, PageSize, PageWindow, ViewState};

#[derive(Parser, Debug)]
#[command(name = "job-dashboard")]
#[command(about = "Search jobs, manage saved searches and track applications")]
pub struct Args {
    #[command(subcommand)]
    pub cmd: Command,

    /// Backend base URL; overrides JOB_DASHBOARD_API_URL.
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Log level (trace/debug/info/warn/error); RUST_LOG wins when set.
    #[arg(long, global = true)]
    pub log_level: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    Login {
        #[arg(long)]
        username: String,
        #[arg(long)]
        password: String,
    },
    Signup {
        #[arg(long)]
        username: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
        #[arg(long)]
        first_name: Option<String>,
        #[arg(long)]
        last_name: Option<String>,
    },
    Logout,
    Whoami,
    /// Search jobs and print one page of results.
    Search {
        #[arg(long)]
        query: String,
        #[arg(long)]
        location: String,
        #[arg(long, default_value_t = DEFAULT_DISTANCE)]
        distance: u32,
        /// Comma-separated terms to exclude.
        #[arg(long)]
        exclude: Option<String>,
        #[arg(long)]
        date_from: Option<NaiveDate>,
        #[arg(long)]
        date_to: Option<NaiveDate>,
        #[command(flatten)]
        view: ViewArgs,
    },
    /// Saved searches.
    #[command(subcommand)]
    Saved(SavedCommand),
    /// Tracked applications.
    #[command(subcommand)]
    Apps(AppsCommand),
}

/// Client-side filter and pagination options.
#[derive(ClapArgs, Debug, Clone)]
pub struct ViewArgs {
    /// Keep rows whose title, company, location or category contains this text.
    #[arg(long)]
    pub filter: Option<String>,
    /// Earliest discovery date to keep (inclusive).
    #[arg(long)]
    pub found_from: Option<NaiveDate>,
    /// Latest discovery date to keep (inclusive).
    #[arg(long)]
    pub found_to: Option<NaiveDate>,
    #[arg(long, default_value_t = 1)]
    pub page: usize,
    /// One of 5, 10, 25, 50, 100.
    #[arg(long)]
    pub page_size: Option<PageSize>,
    /// Page control layout: standard or compact.
    #[arg(long)]
    pub window: Option<PageWindow>,
}

#[derive(Subcommand, Debug)]
pub enum SavedCommand {
    List {
        #[arg(long)]
        active: bool,
    },
    Add {
        #[arg(long)]
        query: String,
        #[arg(long)]
        location: String,
        #[arg(long, default_value_t = DEFAULT_DISTANCE)]
        distance: u32,
        /// Save without scheduling re-runs.
        #[arg(long)]
        paused: bool,
    },
    Update {
        id: i64,
        #[arg(long)]
        query: String,
        #[arg(long)]
        location: String,
        #[arg(long, default_value_t = DEFAULT_DISTANCE)]
        distance: u32,
        #[arg(long)]
        paused: bool,
    },
    Toggle {
        id: i64,
    },
    Delete {
        id: i64,
    },
    /// Execute a saved search now.
    Run {
        id: i64,
        #[command(flatten)]
        view: ViewArgs,
    },
}

#[derive(Subcommand, Debug)]
pub enum AppsCommand {
    List {
        #[arg(long)]
        status: Option<ApplicationStatus>,
    },
    Show {
        id: i64,
    },
    Add {
        #[arg(long)]
        title: String,
        #[arg(long)]
        company: Option<String>,
        #[arg(long)]
        location: Option<String>,
        #[arg(long)]
        url: Option<String>,
        #[arg(long)]
        status: Option<ApplicationStatus>,
        #[arg(long)]
        date_applied: Option<NaiveDate>,
        #[arg(long)]
        resume: Option<String>,
        #[arg(long)]
        cover_letter: Option<String>,
        #[arg(long)]
        notes: Option<String>,
    },
    Update {
        id: i64,
        #[arg(long)]
        status: ApplicationStatus,
        /// Defaults to today.
        #[arg(long)]
        date_applied: Option<NaiveDate>,
        #[arg(long)]
        resume: Option<String>,
        #[arg(long)]
        cover_letter: Option<String>,
        #[arg(long)]
        notes: Option<String>,
    },
    Status {
        id: i64,
        status: ApplicationStatus,
    },
    Delete {
        id: i64,
    },
    Stats,
}

pub async fn dispatch(args: Args) -> Result<()> {
    let mut config = ClientConfig::from_env();
    if let Some(url) = args.api_url {
        config.api_base_url = url.trim_end_matches('/').to_string();
    }
    debug!("Using backend at {}", config.api_base_url);

    let store = Arc::new(FileSessionStore::new(&config.session_file));
    let session = Session::new(store);
    session
        .restore()
        .await
        .with_context(|| format!("reading session from {}", config.session_file.display()))?;
    watch_session(&session).await;

    let api = ApiClient::new(&config, session.clone())?;

    match args.cmd {
        Command::Login { username, password } => {
            let login = api.login(&LoginRequest { username, password }).await?;
            println!("Logged in as {}", login.user.display_name());
        }
        Command::Signup {
            username,
            email,
            password,
            first_name,
            last_name,
        } => {
            let request = SignupRequest {
                username,
                email,
                password,
                first_name,
                last_name,
            };
            let login = api.signup(&request).await?;
            println!("Welcome, {}", login.user.display_name());
        }
        Command::Logout => {
            api.logout().await?;
            println!("Logged out");
        }
        Command::Whoami => match api.current_user().await {
            Some(user) => println!("{} <{}>", user.display_name(), user.email),
            None => println!("Not logged in"),
        },
        Command::Search {
            query,
            location,
            distance,
            exclude,
            date_from,
            date_to,
            view,
        } => {
            let form = SearchForm {
                query,
                location,
                distance,
                excluded_terms: exclude,
                date_from,
                date_to,
            };
            let dashboard = Dashboard::new(api, view_state(&config, &view));
            dashboard.search(&form).await?;
            show_results(&dashboard, &view).await;
        }
        Command::Saved(cmd) => saved(&config, api, cmd).await?,
        Command::Apps(cmd) => apps(&api, cmd).await?,
    }

    Ok(())
}

async fn saved(config: &ClientConfig, api: ApiClient, cmd: SavedCommand) -> Result<()> {
    match cmd {
        SavedCommand::List { active } => {
            let queries = if active {
                api.list_active_saved_queries().await?
            } else {
                api.list_saved_queries().await?
            };
            print!("{}", render::saved_queries(&queries));
        }
        SavedCommand::Add {
            query,
            location,
            distance,
            paused,
        } => {
            let user_id = api.session().user_id().await?;
            let input = CreateSavedQuery {
                user_id,
                query,
                location,
                distance,
                is_active: Some(!paused),
            };
            println!("{}", api.create_saved_query(&input).await?);
        }
        SavedCommand::Update {
            id,
            query,
            location,
            distance,
            paused,
        } => {
            let input = UpdateSavedQuery {
                query,
                location,
                distance,
                is_active: !paused,
            };
            let updated = api.update_saved_query(id, &input).await?;
            print!("{}", render::saved_queries(&[updated]));
        }
        SavedCommand::Toggle { id } => {
            let toggled = api.toggle_saved_query(id).await?;
            print!("{}", render::saved_queries(&[toggled]));
        }
        SavedCommand::Delete { id } => {
            api.delete_saved_query(id).await?;
            println!("Deleted saved search {id}");
        }
        SavedCommand::Run { id, view } => {
            let dashboard = Dashboard::new(api, view_state(config, &view));
            if dashboard.run_saved_query(id).await? == SearchOutcome::Stale {
                return Err(anyhow!("search was superseded"));
            }
            show_results(&dashboard, &view).await;
        }
    }
    Ok(())
}

async fn apps(api: &ApiClient, cmd: AppsCommand) -> Result<()> {
    match cmd {
        AppsCommand::List { status } => {
            let all = api.list_applications().await?;
            print!("{}", render::applications(&filter_by_status(&all, status)));
        }
        AppsCommand::Show { id } => {
            let app = api.get_application(id).await?;
            print!("{}", render::application_detail(&app));
        }
        AppsCommand::Add {
            title,
            company,
            location,
            url,
            status,
            date_applied,
            resume,
            cover_letter,
            notes,
        } => {
            let input = CreateApplication {
                user_id: api.session().user_id().await?,
                job_title: title,
                company_name: company,
                job_url: url,
                location,
                status,
                date_applied,
                resume_version: resume,
                cover_letter_version: cover_letter,
                notes,
            };
            let created = api.create_application(&input).await?;
            print!("{}", render::application_detail(&created));
        }
        AppsCommand::Update {
            id,
            status,
            date_applied,
            resume,
            cover_letter,
            notes,
        } => {
            let input = UpdateApplication {
                status,
                date_applied: date_applied.unwrap_or_else(|| Utc::now().date_naive()),
                resume_version: resume,
                cover_letter_version: cover_letter,
                notes,
            };
            let updated = api.update_application(id, &input).await?;
            print!("{}", render::application_detail(&updated));
        }
        AppsCommand::Status { id, status } => {
            let updated = api.update_application_status(id, status).await?;
            println!("#{} is now {}", updated.id, updated.status.label());
        }
        AppsCommand::Delete { id } => {
            api.delete_application(id).await?;
            println!("Deleted application {id}");
        }
        AppsCommand::Stats => {
            let stats = api.application_stats().await?;
            print!("{}", render::stats(&stats));
        }
    }
    Ok(())
}

fn view_state(config: &ClientConfig, args: &ViewArgs) -> ViewState {
    let mut view = ViewState::new(
        args.page_size.unwrap_or(config.page_size),
        args.window.unwrap_or(config.page_window),
    );
    view.set_filter(
        FilterCriteria::text(args.filter.clone().unwrap_or_default())
            .found_between(args.found_from, args.found_to),
    );
    view
}

async fn show_results(dashboard: &Dashboard, args: &ViewArgs) {
    let mut view = dashboard.view().await;
    view.go_to_page(args.page);
    if view.current_page() != args.page && view.total_pages() > 0 {
        warn!(
            "Page {} is out of range (1-{}); showing page {}",
            args.page,
            view.total_pages(),
            view.current_page()
        );
    }
    print!("{}", render::results_page(&view));
}

/// Log session events for the lifetime of the command.
async fn watch_session(session: &Session) {
    let mut events = session.subscribe().await;
    tokio::spawn(async move {
        while let Some(event) = events.recv().await {
            match event {
                SessionEvent::ForcedLogout { reason } => {
                    warn!("Logged out: {reason}");
                }
                other => debug!("Session event: {other:?}"),
            }
        }
    });
}
