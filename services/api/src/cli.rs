use crate::demo::{
    run_autoconsumption, run_demo, run_roi, run_sizing, AutoconsumptionArgs, DemoArgs, RoiArgs,
    SizingArgs,
};
use crate::server;
use clap::{Args, Parser, Subcommand};
use solar_ops::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Solar Field Operations",
    about = "Run the solar field-operations service and its calculators from the command line",
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
    /// Run one of the energy/financial calculators directly
    Calc {
        #[command(subcommand)]
        command: CalcCommand,
    },
    /// Run an end-to-end CLI demo covering intake, assessment, and rendering
    Demo(DemoArgs),
}

#[derive(Subcommand, Debug)]
enum CalcCommand {
    /// Evaluate self-consumption from production and export figures
    Autoconsumption(AutoconsumptionArgs),
    /// Recommend a PV system size for an annual consumption
    Sizing(SizingArgs),
    /// Project 25 years of return on investment for an installation
    Roi(RoiArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Calc {
            command: CalcCommand::Autoconsumption(args),
        } => run_autoconsumption(args),
        Command::Calc {
            command: CalcCommand::Sizing(args),
        } => run_sizing(args),
        Command::Calc {
            command: CalcCommand::Roi(args),
        } => run_roi(args),
        Command::Demo(args) => run_demo(args),
    }
}
