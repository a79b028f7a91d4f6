use crate::demo::{run_demo, run_generate, DemoArgs, GenerateArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use techsalary::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "TechSalary",
    about = "Serve and maintain the TechSalary compensation data service",
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
    /// Seed the entity catalog and generate synthetic records offline
    Generate(GenerateArgs),
    /// Run an end-to-end CLI demo covering seeding, generation, and queries
    Demo(DemoArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
    /// Seed the catalog and generate this many records before serving
    #[arg(long)]
    pub(crate) seed_records: Option<usize>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Generate(args) => run_generate(args),
        Command::Demo(args) => run_demo(args),
    }
}
