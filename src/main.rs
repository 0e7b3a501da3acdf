use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use ticketing_client::handlers::{self, Rendered};
use ticketing_client::pages::LoginMode;
use ticketing_client::services::event::DEFAULT_PAGE_SIZE;
use ticketing_client::{App, Config};

/// ticketing - browse events and buy tickets
#[derive(Parser, Debug)]
#[command(name = "ticketing")]
#[command(version, about, long_about = None)]
struct Cli {
    /// API base URL
    #[arg(long, env = "TICKETING_API_URL")]
    api_url: Option<String>,

    /// File holding the saved session token
    #[arg(long, env = "TICKETING_SESSION_FILE")]
    session_file: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List upcoming events
    Events {
        /// Page number
        #[arg(long)]
        page: Option<u32>,

        /// Events per page
        #[arg(long, default_value_t = DEFAULT_PAGE_SIZE)]
        page_size: u32,
    },

    /// Show one event
    Event {
        /// Event ID
        id: String,
    },

    /// Log in and save the session token
    Login {
        #[arg(long)]
        email: String,

        #[arg(long, env = "TICKETING_PASSWORD", hide_env_values = true)]
        password: String,
    },

    /// Create an account and log in
    Register {
        #[arg(long)]
        email: String,

        #[arg(long, env = "TICKETING_PASSWORD", hide_env_values = true)]
        password: String,
    },

    /// Forget the saved session token
    Logout,

    /// Show who is logged in
    Whoami,

    /// Buy tickets for an event
    Purchase {
        /// Event ID
        #[arg(long = "event")]
        event_id: Option<String>,

        /// Number of tickets (1-10)
        #[arg(short, long, default_value_t = 1)]
        quantity: u32,
    },

    /// List my orders
    Orders,
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cli.log_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let config = match load_config(&cli) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}", e.public_message());
            return ExitCode::FAILURE;
        }
    };

    let app = match App::from_config(&config) {
        Ok(app) => app,
        Err(e) => {
            e.log();
            eprintln!("{}", e.public_message());
            return ExitCode::FAILURE;
        }
    };

    tracing::info!(api_url = %config.api_url, "Starting");
    handlers::mount(&app).await;

    let rendered = run(&app, cli.command).await;
    println!("{}", rendered.body.trim_end());

    if rendered.success {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

fn load_config(cli: &Cli) -> Result<Config, ticketing_client::ClientError> {
    let mut config = Config::from_env()?;
    if let Some(api_url) = &cli.api_url {
        config = config.with_api_url(api_url.as_str())?;
    }
    if let Some(path) = &cli.session_file {
        config = config.with_session_file(path);
    }
    Ok(config)
}

async fn run(app: &App, command: Commands) -> Rendered {
    match command {
        Commands::Events { page, page_size } => handlers::events(app, page, page_size).await,
        Commands::Event { id } => handlers::event_detail(app, &id).await,
        Commands::Login { email, password } => {
            handlers::login(app, &email, &password, LoginMode::SignIn).await
        }
        Commands::Register { email, password } => {
            handlers::login(app, &email, &password, LoginMode::Register).await
        }
        Commands::Logout => handlers::logout(app),
        Commands::Whoami => handlers::whoami(app),
        Commands::Purchase { event_id, quantity } => {
            handlers::purchase(app, event_id, quantity).await
        }
        Commands::Orders => handlers::orders(app).await,
    }
}
