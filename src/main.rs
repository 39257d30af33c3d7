use anyhow::Result;
use clap::{Parser, Subcommand};

/// shiftboard - weekly hours entry for the production floor
#[derive(Parser)]
#[command(name = "shiftboard")]
#[command(about = "Week-based daily hours entry in front of the scheduling API", long_about = None)]
struct Cli {
    /// Path to configuration file
    #[arg(long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve {
        /// Server host address (overrides config file)
        #[arg(long)]
        host: Option<String>,

        /// Server port (overrides config file)
        #[arg(long)]
        port: Option<u16>,
    },
    /// Print the week containing a date
    Week {
        /// Any date in YYYY-MM-DD; defaults to today
        #[arg(long)]
        date: Option<String>,

        /// Print the week as JSON
        #[arg(long)]
        json: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = shiftboard::config::Config::load(cli.config.clone())?;
    config.validate().map_err(|e| anyhow::anyhow!(e))?;

    shiftboard::observability::init_observability(
        "shiftboard",
        env!("CARGO_PKG_VERSION"),
        &config.observability.log_level,
    )?;

    match cli.command {
        Commands::Serve { host, port } => shiftboard::cli::serve(config, host, port).await,
        Commands::Week { date, json } => shiftboard::cli::print_week(&config, date.as_deref(), json),
    }
}
