use crate::render::{run_bands, run_screen, ScreenArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use vaccine_checker::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Age-Based Vaccine Checker",
    about = "Compute exact age, age band, vaccine indications and recommended labs",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Screen a single date of birth and print the result
    Screen(ScreenArgs),
    /// List the age bands in order
    Bands,
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
    /// Vaccine reference table (.json or .csv); overrides APP_VACCINE_TABLE
    #[arg(long)]
    pub(crate) table: Option<PathBuf>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Screen(args) => run_screen(args),
        Command::Bands => {
            run_bands();
            Ok(())
        }
    }
}
