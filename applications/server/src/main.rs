/// PlanZen Server - planner API and web app host
use clap::{Parser, Subcommand};
use planzen_core::auth::{Registration, RegistrationInput};
use planzen_core::{Role, Schema, Storage};
use planzen_server::{api, config::ServerConfig, create_router, services::AuthService, state::AppState};
use planzen_storage::Database;
use std::{net::SocketAddr, path::PathBuf, sync::Arc};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "planzen-server")]
#[command(about = "PlanZen planner server", long_about = None)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve,
    /// Create a new user
    AddUser {
        #[arg(long)]
        first_name: String,
        #[arg(long)]
        last_name: String,
        #[arg(short, long)]
        email: String,
        #[arg(short, long, env = "PLANZEN_NEW_USER_PASSWORD")]
        password: String,
        /// Date of birth, YYYY-MM-DD
        #[arg(long)]
        date_of_birth: String,
        /// Create the account with the admin role
        #[arg(long)]
        admin: bool,
    },
    /// List all users
    ListUsers,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "planzen_server=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();
    let config = ServerConfig::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Serve => {
            serve(config).await?;
        }
        Commands::AddUser {
            first_name,
            last_name,
            email,
            password,
            date_of_birth,
            admin,
        } => {
            let input = RegistrationInput {
                first_name: Some(first_name),
                last_name: Some(last_name),
                email: Some(email),
                password: Some(password),
                date_of_birth: Some(date_of_birth),
            };
            let role = if admin { Role::Admin } else { Role::User };
            add_user(config, input, role).await?;
        }
        Commands::ListUsers => {
            list_users(config).await?;
        }
    }

    Ok(())
}

async fn serve(config: ServerConfig) -> anyhow::Result<()> {
    config.validate()?;

    tracing::info!("Starting PlanZen server");
    tracing::info!("Host: {}", config.server.host);
    tracing::info!("Port: {}", config.server.port);
    tracing::info!("Web directory: {}", config.web.dir.display());

    // Initialize database
    let db = Arc::new(Database::connect(&config.storage.database_url).await?);
    tracing::info!("Database connected");

    let auth_service = Arc::new(AuthService::new(
        config.auth.jwt_secret.clone(),
        config.auth.bcrypt_cost,
        config.auth.secure_cookies,
    ));

    let app_state = AppState::new(db, auth_service, config.web.dir.clone());
    let app = create_router(app_state);

    let addr = SocketAddr::from((
        config.server.host.parse::<std::net::IpAddr>()?,
        config.server.port,
    ));

    tracing::info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

async fn add_user(config: ServerConfig, input: RegistrationInput, role: Role) -> anyhow::Result<()> {
    let registration = Registration::parse(input)?;

    let db = Database::connect(&config.storage.database_url).await?;
    // No tokens are signed here, so the secret may be unset
    let auth_service = AuthService::new(
        config.auth.jwt_secret.clone(),
        config.auth.bcrypt_cost,
        config.auth.secure_cookies,
    );

    let user = api::auth::create_account(&db, &auth_service, registration, role).await?;
    println!("Created user {} <{}> ({})", user.id, user.email, user.role);

    Ok(())
}

async fn list_users(config: ServerConfig) -> anyhow::Result<()> {
    let db = Database::connect(&config.storage.database_url).await?;
    let users = db.get_all_users().await?;

    println!("Users:");
    for user in users {
        println!(
            "  {} - {} {} <{}> ({})",
            user.id, user.first_name, user.last_name, user.email, user.role
        );
    }

    Ok(())
}
