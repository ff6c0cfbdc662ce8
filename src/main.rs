use clap::Parser;
use task_forest::cli::{Cli, Commands};
use task_forest::cli_handlers::{handle_init_command, handle_task_command};
use task_forest::error::Result;
use task_forest::logging::LoggingConfig;
use task_forest::project::ProjectContext;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let log_config = LoggingConfig::from_args(cli.quiet, cli.verbose > 0, cli.json);
    if let Err(e) = task_forest::logging::init_logging(log_config) {
        eprintln!("Failed to initialize logging: {}", e);
        std::process::exit(1);
    }

    if let Err(e) = run(&cli).await {
        let error_response = e.to_error_response();
        eprintln!("{}", serde_json::to_string_pretty(&error_response).unwrap());
        std::process::exit(1);
    }
}

async fn run(cli: &Cli) -> Result<()> {
    match cli.command.clone() {
        Commands::Init { at, force } => handle_init_command(at, force).await?,

        Commands::Task(task_cmd) => {
            let ctx = ProjectContext::load_or_init().await?;
            handle_task_command(&ctx.store, task_cmd).await?
        },
    }

    Ok(())
}
