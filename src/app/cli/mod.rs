//! CLI Adapter.

mod catalog;
mod scaffold;
mod validate;

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use clap::{ArgAction, Args, Parser, Subcommand};

use crate::app::api::ScaffoldRequest;
use crate::domain::AppError;

#[derive(Parser)]
#[command(name = "worldgen")]
#[command(version)]
#[command(about = "Materialize declarative workspace worlds on disk", long_about = None)]
struct Cli {
    /// Engine config file (defaults to ./worldgen.toml when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,
    /// Only log errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate, plan, and create a world
    #[clap(visible_alias = "c")]
    Create {
        /// World config path or catalog name
        world: String,
        #[command(flatten)]
        target: TargetArgs,
        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },
    /// Check a world config against the schema
    #[clap(visible_alias = "v")]
    Validate {
        /// World config path or catalog name
        world: String,
    },
    /// Show the operations a create would run
    #[clap(visible_alias = "p")]
    Plan {
        /// World config path or catalog name
        world: String,
        #[command(flatten)]
        target: TargetArgs,
        /// Print the plan as JSON
        #[arg(long)]
        json: bool,
    },
    /// List built-in and catalog worlds
    #[clap(visible_alias = "ls")]
    List,
    /// Print a catalog world's YAML
    Show {
        /// Catalog or built-in world name
        name: String,
    },
}

#[derive(Args)]
struct TargetArgs {
    /// Directory the world is created in (defaults to the current directory)
    #[arg(long)]
    root: Option<PathBuf>,
    /// Value for ${USER} (defaults to $USER)
    #[arg(long)]
    user: Option<String>,
    /// Value for ${DATE}, RFC 3339 (defaults to now)
    #[arg(long, value_parser = parse_now)]
    now: Option<DateTime<Utc>>,
}

impl From<TargetArgs> for ScaffoldRequest {
    fn from(args: TargetArgs) -> Self {
        ScaffoldRequest { root: args.root, user: args.user, now: args.now }
    }
}

fn parse_now(value: &str) -> Result<DateTime<Utc>, String> {
    DateTime::parse_from_rfc3339(value)
        .map(|parsed| parsed.with_timezone(&Utc))
        .map_err(|err| format!("expected an RFC 3339 timestamp: {}", err))
}

/// Entry point for the CLI.
pub fn run() {
    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.quiet);

    let config = cli.config.as_deref();
    let result: Result<i32, AppError> = match cli.command {
        Commands::Create { world, target, json } => scaffold::run_create(&world, target.into(), config, json),
        Commands::Validate { world } => validate::run_validate(&world, config).map(|_| 0),
        Commands::Plan { world, target, json } => scaffold::run_plan(&world, target.into(), config, json).map(|_| 0),
        Commands::List => catalog::run_list(config).map(|_| 0),
        Commands::Show { name } => catalog::run_show(&name, config).map(|_| 0),
    };

    match result {
        Ok(exit_code) => {
            if exit_code != 0 {
                std::process::exit(exit_code);
            }
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(e.exit_code());
        }
    }
}

/// Log to stderr so JSON on stdout stays parseable. `RUST_LOG` wins when set.
fn init_tracing(verbose: u8, quiet: bool) {
    use tracing_subscriber::{EnvFilter, fmt, prelude::*};

    let level = match verbose {
        0 if quiet => "error",
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).with_target(verbose >= 2))
        .init();
}
