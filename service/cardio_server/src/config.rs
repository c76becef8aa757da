use clap::Args;
use std::net::SocketAddr;
use std::path::PathBuf;

/// Origins allowed to call the API from a browser unless overridden.
pub const DEFAULT_ALLOWED_ORIGINS: [&str; 3] = [
    "https://disease-predictor-ai.netlify.app",
    "http://localhost:3000",
    "http://127.0.0.1:3000",
];

#[derive(Debug, Clone, Args)]
pub struct ModelArgs {
    /// Model artifact (JSON). Searched for as cardio_model.json when omitted
    #[arg(long = "model", env = "CARDIO_MODEL_PATH", value_name = "FILE")]
    pub path: Option<PathBuf>,
}

#[derive(Debug, Clone, Args)]
pub struct ServeArgs {
    /// Address to listen on
    #[arg(long, env = "CARDIO_BIND", default_value = "127.0.0.1:8000")]
    pub bind: SocketAddr,

    /// Comma-separated CORS origins; `*` allows any origin without credentials
    #[arg(
        long,
        env = "CARDIO_ALLOWED_ORIGINS",
        value_delimiter = ',',
        default_values = DEFAULT_ALLOWED_ORIGINS
    )]
    pub allowed_origins: Vec<String>,

    #[command(flatten)]
    pub model: ModelArgs,
}
