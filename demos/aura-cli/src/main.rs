//! Command-line driver for the Arsenal Aura client core.
//!
//! Each invocation is a fresh process with an empty cookie jar, so
//! commands that need a session take credentials and log in first.

mod commands;

use std::process;

use aura::prelude::*;
use clap::{Args, Parser, Subcommand, ValueEnum};

#[derive(Parser)]
#[command(
    name = "aura",
    about = "Arsenal Aura: sessions, route checks, and match predictions from the terminal",
    version,
    propagate_version = true
)]
struct Cli {
    /// API base URL (overrides AURA_API_BASE_URL)
    #[arg(long, global = true)]
    api: Option<String>,

    /// Log filter used when RUST_LOG is unset
    #[arg(long, global = true, default_value = "warn")]
    log: String,

    #[command(subcommand)]
    command: Commands,
}

/// Credentials for commands that need a session.
#[derive(Args)]
pub struct Login {
    #[arg(short, long)]
    email: String,

    #[arg(short, long)]
    password: String,
}

/// Tone of generated text.
#[derive(Clone, Copy, ValueEnum)]
pub enum Tone {
    Low,
    Medium,
    High,
}

impl From<Tone> for Intensity {
    fn from(tone: Tone) -> Self {
        match tone {
            Tone::Low => Intensity::Low,
            Tone::Medium => Intensity::Medium,
            Tone::High => Intensity::High,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Try to restore a session from the refresh cookie and report it
    Status,

    /// Log in and print the profile
    Login {
        #[command(flatten)]
        login: Login,
    },

    /// Create an account (does not log in)
    Register {
        #[command(flatten)]
        login: Login,

        /// Favorite club (see `aura clubs`)
        #[arg(short, long, default_value = "Arsenal")]
        club: String,
    },

    /// List selectable clubs
    Clubs,

    /// Show where a navigation would land
    Route {
        /// Requested path, e.g. /predictor
        path: String,

        /// Log in first with this email
        #[arg(short, long, requires = "password")]
        email: Option<String>,

        #[arg(short, long, requires = "email")]
        password: Option<String>,
    },

    /// Change favorite club
    Club {
        #[command(flatten)]
        login: Login,

        club: String,
    },

    /// Show the next fixture and save a prediction for it
    Predict {
        #[command(flatten)]
        login: Login,

        /// Arsenal's goals
        home: String,

        /// Opponent's goals
        away: String,
    },

    /// Show the next fixture and your latest prediction
    Fixture {
        #[command(flatten)]
        login: Login,
    },

    /// Check your latest prediction against the real result
    Check {
        #[command(flatten)]
        login: Login,
    },

    /// Generate a line of text
    Generate {
        #[command(flatten)]
        login: Login,

        #[arg(short, long, default_value = "fact")]
        mode: String,

        #[arg(short, long, value_enum, default_value_t = Tone::Medium)]
        intensity: Tone,

        /// Player id
        #[arg(long)]
        player: Option<String>,
    },

    /// Show the club archive: honors, timeline, and links
    Archive {
        #[command(flatten)]
        login: Login,
    },

    /// Send a chat message
    Chat {
        #[command(flatten)]
        login: Login,

        message: String,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if let Err(e) = init_tracing(&cli.log) {
        eprintln!("warning: {e}");
    }

    let app = match build_app(cli.api) {
        Ok(app) => app,
        Err(e) => {
            eprintln!("error: {e}");
            process::exit(2);
        }
    };

    let result = match cli.command {
        Commands::Status => commands::status(&app).await,
        Commands::Login { login } => commands::login(&app, &login).await.map(|_| ()),
        Commands::Register { login, club } => commands::register(&app, &login, &club).await,
        Commands::Clubs => {
            commands::clubs();
            Ok(())
        }
        Commands::Route {
            path,
            email,
            password,
        } => {
            let login = email.zip(password).map(|(email, password)| Login { email, password });
            commands::route(&app, &path, login.as_ref()).await
        }
        Commands::Club { login, club } => commands::change_club(&app, &login, &club).await,
        Commands::Predict { login, home, away } => {
            commands::predict(&app, &login, &home, &away).await
        }
        Commands::Fixture { login } => commands::fixture(&app, &login).await,
        Commands::Check { login } => commands::check(&app, &login).await,
        Commands::Generate {
            login,
            mode,
            intensity,
            player,
        } => commands::generate(&app, &login, mode, intensity.into(), player).await,
        Commands::Archive { login } => commands::archive(&app, &login).await,
        Commands::Chat { login, message } => commands::chat(&app, &login, &message).await,
    };

    if let Err(e) = result {
        eprintln!("error: {}", commands::describe(&e));
        process::exit(1);
    }
}

fn build_app(api: Option<String>) -> Result<AuraApp<aura::transport::HttpBackend>, AuraError> {
    let mut config = AuraConfig::from_env()?;
    if let Some(api) = api {
        config = config.with_api_base_url(api);
    }
    AuraApp::builder().config(config).build()
}
