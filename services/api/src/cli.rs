use crate::commands::{
    run_catalog, run_employees, run_grade, CatalogArgs, EmployeesCommand, GradeArgs,
};
use crate::server;
use clap::{Args, Parser, Subcommand};
use function_grade::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Function Grade",
    about = "Grade employee functions against the standard role catalog",
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
    /// Grade raw characteristic scores and suggest a standard role
    Grade(GradeArgs),
    /// List function families or the roles within one family
    Catalog(CatalogArgs),
    /// Manage the employee register in the configured data file
    Employees {
        #[command(subcommand)]
        command: EmployeesCommand,
    },
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
        Command::Grade(args) => run_grade(args),
        Command::Catalog(args) => run_catalog(args),
        Command::Employees { command } => run_employees(command),
    }
}
