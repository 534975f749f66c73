//! kitchen-nerd - command-line client for the kitchen nerd recipe service

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use kitchen_nerd::auth::{LoginForm, RegisterForm, RegisterOutcome};
use kitchen_nerd::client::PageQuery;
use kitchen_nerd::config::Config;
use kitchen_nerd::pages::{App, PageOutput, Route};

#[derive(Parser)]
#[command(name = "kitchen-nerd")]
#[command(about = "Command-line client for the kitchen nerd recipe service")]
#[command(version)]
struct Cli {
    /// Path to the configuration file
    #[arg(long, global = true, default_value = "config.yml")]
    config: PathBuf,

    /// Write rendered pages to this file instead of stdout
    #[arg(long, global = true)]
    out: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Open a page the way a page load would: session check, redirect to
    /// the login view when it fails, then render
    Open {
        #[arg(value_enum, default_value_t = RouteArg::Recipes)]
        route: RouteArg,
    },
    /// Log in and, on success, open the recipe list
    Login {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    /// Create a new account
    Register {
        #[arg(long)]
        username: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    /// Fetch and render one page of recipes
    Recipes {
        #[arg(long, default_value_t = 1)]
        page: u64,
        /// Recipes per page; defaults to the configured page size
        #[arg(long)]
        size: Option<u64>,
    },
    /// Show the logged-in user's profile
    Profile,
    /// Show the cached session state
    Whoami,
}

#[derive(Clone, Copy, ValueEnum)]
enum RouteArg {
    Login,
    Recipes,
}

impl std::fmt::Display for RouteArg {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RouteArg::Login => write!(f, "login"),
            RouteArg::Recipes => write!(f, "recipes"),
        }
    }
}

impl From<RouteArg> for Route {
    fn from(route: RouteArg) -> Self {
        match route {
            RouteArg::Login => Route::Login,
            RouteArg::Recipes => Route::Recipes,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "kitchen_nerd=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let config = Config::load_with_env(&cli.config)?;
    let app = App::from_config(&config)?;

    match cli.command {
        Commands::Open { route } => {
            let output = app.open(route.into()).await?;
            emit_page(&output, cli.out.as_deref())?;
        }
        Commands::Login { email, password } => {
            let output = app.submit_login(&LoginForm { email, password }).await?;
            if output.route == Route::Login {
                tracing::warn!("login did not succeed, rendering the login view");
            }
            emit_page(&output, cli.out.as_deref())?;
        }
        Commands::Register {
            username,
            email,
            password,
        } => match app
            .register(&RegisterForm {
                username,
                email,
                password,
            })
            .await
        {
            RegisterOutcome::Registered => {
                println!("Account created. Use the login command to sign in.");
            }
            RegisterOutcome::Rejected(err) => {
                anyhow::bail!("registration rejected: {}", err.message);
            }
            RegisterOutcome::Failed { message } => {
                anyhow::bail!("registration failed: {message}");
            }
        },
        Commands::Recipes { page, size } => {
            let query = PageQuery {
                size: size.unwrap_or(config.list.page_size),
                page,
            };
            let output = app.open_recipes(query).await?;
            emit_page(&output, cli.out.as_deref())?;
        }
        Commands::Profile => {
            let profile = app.profile().await?;
            println!("{} ({:?}, id {})", profile.name, profile.status, profile.id);
        }
        Commands::Whoami => match app.current_session() {
            Some(session) if session.is_valid() => {
                println!(
                    "Logged in as {} (user {}), session expires {}",
                    session.username, session.user_id, session.expired_at
                );
            }
            Some(session) => {
                println!(
                    "Session for {} expired at {}. Use the login command to sign in again.",
                    session.username, session.expired_at
                );
            }
            None => {
                println!("No session stored. Use the login command to sign in.");
            }
        },
    }

    Ok(())
}

/// Write a rendered page to the requested destination
fn emit_page(output: &PageOutput, out: Option<&std::path::Path>) -> Result<()> {
    if output.redirected {
        tracing::info!(route = %output.route, "redirected");
    }
    match out {
        Some(path) => {
            std::fs::write(path, &output.html)?;
            tracing::info!(path = %path.display(), route = %output.route, "page written");
        }
        None => println!("{}", output.html),
    }
    Ok(())
}
