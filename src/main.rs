//! listkeep - books, contacts, recipes and a shopping cart in one dashboard
//!
//! All collections live in memory for the length of the session.

use clap::{Parser, Subcommand};
use listkeep::auth::AuthForm;
use listkeep::commands::{self, OutputFormat};
use listkeep::config::ListkeepPaths;
use listkeep::logging;
use listkeep::models::EntityKind;
use listkeep::tui;

#[derive(Parser)]
#[command(name = "listkeep")]
#[command(author, version, about = "Validated in-memory list managers for books, contacts, recipes and a shopping cart")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Write the default config file (~/.listkeep/config.toml)
    Init,

    /// Launch the dashboard (default)
    Tui,

    /// Show the form rules for an entity
    Schema {
        /// Entity: book, contact, recipe, or cart
        entity: EntityKind,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Validate a candidate entity given as FIELD=VALUE pairs
    Validate {
        /// Entity: book, contact, recipe, or cart
        entity: EntityKind,

        /// Field assignments; use \n inside a value for a line break
        fields: Vec<String>,

        /// Report every violated rule, not just the first per field
        #[arg(long)]
        all: bool,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Sign in against the simulated auth backend
    SignIn {
        #[arg(long)]
        email: String,

        #[arg(long)]
        password: String,
    },

    /// Create an account against the simulated auth backend
    SignUp {
        #[arg(long)]
        first_name: String,

        #[arg(long)]
        last_name: String,

        #[arg(long)]
        email: String,

        #[arg(long)]
        password: String,

        #[arg(long)]
        confirm_password: String,
    },
}

fn format(json: bool) -> OutputFormat {
    if json {
        OutputFormat::Json
    } else {
        OutputFormat::Summary
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let command = cli.command.unwrap_or(Commands::Tui);
    if !matches!(command, Commands::Tui) {
        logging::init_stderr();
    }

    let ok = match command {
        Commands::Init => {
            commands::init(&ListkeepPaths::new()?)?;
            true
        }
        Commands::Tui => {
            let config = commands::dashboard_config()?;
            logging::init_for_dashboard(config.log_file.as_deref())?;
            let mut app = tui::TuiApp::new(config);
            app.run()?;
            true
        }
        Commands::Schema { entity, json } => {
            commands::schema(entity, format(json))?;
            true
        }
        Commands::Validate {
            entity,
            fields,
            all,
            json,
        } => commands::validate(entity, &fields, all, format(json))?,
        Commands::SignIn { email, password } => {
            let pairs = [("email", email), ("password", password)];
            commands::authenticate(AuthForm::sign_in(), &pairs).await?
        }
        Commands::SignUp {
            first_name,
            last_name,
            email,
            password,
            confirm_password,
        } => {
            let pairs = [
                ("firstName", first_name),
                ("lastName", last_name),
                ("email", email),
                ("password", password),
                ("confirmPassword", confirm_password),
            ];
            commands::authenticate(AuthForm::sign_up(), &pairs).await?
        }
    };

    if !ok {
        std::process::exit(1);
    }
    Ok(())
}
