use anyhow::Result;
use chrono::{Local, NaiveDate};
use clap::{Args, CommandFactory, Parser, Subcommand};
use svkmimer::core::Product;
use svkmimer::core::log::init_logging;

#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to optional configuration file
    #[arg(short, long, global = true)]
    config_path: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Args)]
struct PeriodArgs {
    /// First day to fetch (YYYY-MM-DD), defaults to today
    #[arg(long)]
    from: Option<NaiveDate>,

    /// Last day to fetch (YYYY-MM-DD), defaults to today
    #[arg(long)]
    to: Option<NaiveDate>,

    /// Print results as JSON
    #[arg(long)]
    json: bool,
}

impl PeriodArgs {
    fn period(&self) -> svkmimer::Period {
        let today = Local::now().date_naive();
        svkmimer::Period {
            from: self.from.unwrap_or(today),
            to: self.to.unwrap_or(today),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Create default configuration
    Setup,
    /// Display FCR prices converted to SEK
    Prices {
        #[command(flatten)]
        period: PeriodArgs,

        /// Product to show: n, d-up, d-down or d (all when omitted)
        #[arg(short, long)]
        product: Option<Product>,

        /// Capacity in kW, overrides the configured value
        #[arg(short = 'k', long)]
        capacity: Option<u32>,
    },
    /// Display EUR to SEK exchange rates
    Rates {
        #[command(flatten)]
        period: PeriodArgs,
    },
}

impl From<Commands> for svkmimer::AppCommand {
    fn from(cmd: Commands) -> svkmimer::AppCommand {
        match cmd {
            Commands::Prices {
                period,
                product,
                capacity,
            } => svkmimer::AppCommand::Prices {
                period: period.period(),
                product,
                capacity_kw: capacity,
                json: period.json,
            },
            Commands::Rates { period } => svkmimer::AppCommand::Rates {
                period: period.period(),
                json: period.json,
            },
            Commands::Setup => unreachable!("Setup command should be handled separately"),
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let result = match cli.command {
        Some(Commands::Setup) => svkmimer::cli::setup::setup(),
        Some(cmd) => svkmimer::run_command(cmd.into(), cli.config_path.as_deref()).await,
        None => {
            Cli::command().print_help()?;
            Ok(())
        }
    };

    if let Err(e) = &result {
        tracing::error!(error = %e, "Application failed");
    }
    result
}
