use std::path::PathBuf;
use std::process::ExitCode;

use cardio_risk::RiskScorer;
use cardio_server::commands::{self, CommandError};
use cardio_server::{app, cors_layer, load_scorer, AppState, ModelArgs, ServeArgs};
use clap::{Args, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(
    name = "cardio",
    version,
    about = "Cardiovascular disease risk prediction service",
    long_about = "cardio scores cardiovascular disease risk from eleven clinical inputs.\n\n\
        EXAMPLES:\n\
        \n  cardio serve --model models/cardio_model.json   Start the HTTP API\n\
        \n  cardio predict patient.json                      Score one record\n\
        \n  echo '{...}' | cardio predict --json             Score a record from stdin\n\
        \n  cardio inspect                                   Show model and scaler details"
)]
struct Cli {
    /// Increase verbosity level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Start the HTTP prediction API
    Serve(ServeArgs),

    /// Score one clinical record given as JSON
    Predict(PredictArgs),

    /// Print model metadata and the per-feature scaler table
    Inspect(ModelArgs),
}

#[derive(Debug, Args)]
struct PredictArgs {
    /// Clinical record JSON file (reads from stdin if not provided)
    #[arg(value_name = "FILE")]
    input: Option<PathBuf>,

    /// Print the result as JSON
    #[arg(long)]
    json: bool,

    #[command(flatten)]
    model: ModelArgs,
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let outcome = match cli.command {
        Command::Serve(args) => serve(args).await,
        Command::Predict(args) => predict(args),
        Command::Inspect(args) => inspect(args),
    };

    match outcome {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn serve(args: ServeArgs) -> Result<(), Box<dyn std::error::Error>> {
    let state = AppState::new(load_scorer(args.model.path.as_deref()));
    let router = app(state, cors_layer(&args.allowed_origins));

    let listener = tokio::net::TcpListener::bind(args.bind).await?;
    log::info!("cardio listening on http://{}", args.bind);
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    log::info!("cardio shut down");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        log::error!("failed to listen for shutdown signal: {e}");
        std::future::pending::<()>().await;
    }
}

fn predict(args: PredictArgs) -> Result<(), Box<dyn std::error::Error>> {
    let (_, artifact) = commands::load_artifact(args.model.path.as_deref())?;
    let scorer = RiskScorer::from_artifact(artifact).map_err(CommandError::from)?;
    let record = commands::read_record(args.input.as_deref())?;
    print!("{}", commands::predict(&scorer, &record, args.json)?);
    if args.json {
        println!();
    }
    Ok(())
}

fn inspect(args: ModelArgs) -> Result<(), Box<dyn std::error::Error>> {
    let (path, artifact) = commands::load_artifact(args.path.as_deref())?;
    print!("{}", commands::render_inspect(&path, &artifact));
    Ok(())
}
