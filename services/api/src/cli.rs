use crate::demo::{
    run_board, run_dashboard, run_demo, run_summary, BoardArgs, DashboardArgs, DemoArgs,
    SummaryArgs,
};
use crate::server;
use clap::{Args, Parser, Subcommand};
use hireflow::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Hireflow",
    about = "Run and inspect the hiring pipeline board from the command line",
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
    /// Inspect the seeded pipeline board
    Pipeline {
        #[command(subcommand)]
        command: PipelineCommand,
    },
    /// Run a scripted demo of candidate moves, stage edits and notices
    Demo(DemoArgs),
}

#[derive(Subcommand, Debug)]
enum PipelineCommand {
    /// Print the board columns, optionally restricted to one job
    Board(BoardArgs),
    /// Print the hiring status breakdown per stage
    Summary(SummaryArgs),
    /// Print dashboard totals, department distribution and recent activity
    Dashboard(DashboardArgs),
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
        Command::Pipeline {
            command: PipelineCommand::Board(args),
        } => run_board(args),
        Command::Pipeline {
            command: PipelineCommand::Summary(args),
        } => run_summary(args),
        Command::Pipeline {
            command: PipelineCommand::Dashboard(args),
        } => run_dashboard(args),
        Command::Demo(args) => run_demo(args).await,
    }
}
