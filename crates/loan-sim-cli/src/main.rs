mod commands;
mod config;
mod error;
mod input;
mod output;

use clap::{Parser, Subcommand};
use colored::Colorize;
use std::process;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use commands::product::ProductArgs;
use commands::simulate::SimulateArgs;
use config::CliConfig;
use error::CliError;
use output::OutputFormat;

/// Fixed-installment loan simulations
#[derive(Parser)]
#[command(
    name = "loansim",
    version,
    about = "Fixed-installment loan simulations",
    long_about = "Simulates fixed-installment (French system) loans with decimal \
                  precision: effective monthly rate, fixed installment and the full \
                  amortization schedule. Also manages the catalog of loan products \
                  that simulations run against."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format (defaults to the config file's, then json)
    #[arg(long, global = true)]
    output: Option<OutputFormat>,

    /// Configuration file path
    #[arg(long, global = true)]
    config: Option<String>,

    /// Log at debug level
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Simulate a loan: installment, totals and amortization schedule
    Simulate(SimulateArgs),
    /// Manage loan products (list, show, create, update, delete)
    Product(ProductArgs),
    /// Print version information
    Version,
}

fn init_tracing(config: &CliConfig, verbose: bool) {
    let fallback = if verbose { "debug" } else { config.log_level.as_str() };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init();
}

fn fail(err: &CliError) -> ! {
    if err.exit_code() == error::EXIT_INTERNAL {
        tracing::error!(error = %err, "command failed");
    }
    eprintln!("{}: {}", "error".red().bold(), err.user_message());
    process::exit(err.exit_code());
}

fn main() {
    let cli = Cli::parse();

    let config = match CliConfig::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            init_tracing(&CliConfig::default(), cli.verbose);
            fail(&e);
        }
    };
    init_tracing(&config, cli.verbose);

    let format = cli.output.or(config.output).unwrap_or(OutputFormat::Json);

    let result = match cli.command {
        Commands::Simulate(args) => commands::simulate::run_simulate(args, &config),
        Commands::Product(args) => commands::product::run_product(args, &config),
        Commands::Version => {
            println!("loansim {}", env!("CARGO_PKG_VERSION"));
            return;
        }
    };

    match result {
        Ok(value) => output::format_output(format, &value),
        Err(e) => fail(&e),
    }
}
