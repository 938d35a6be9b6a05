use anyhow::{Context, Result, bail};
use clap::{Parser, ValueEnum};
use geolens::{api::AnalyzeRequest, app_state::AppState, config::Config};
use tracing_subscriber::EnvFilter;

/// Analyze one website for generative-engine optimization and print the
/// result as JSON.
#[derive(Parser)]
#[command(name = "geolens", version, long_about = None)]
struct Cli {
    /// Absolute URL of the page to analyze.
    url: String,

    /// Pretty-print the JSON result.
    #[arg(long)]
    pretty: bool,

    /// Override the configured model identifier.
    #[arg(long)]
    model: Option<String>,

    /// Log format on stderr.
    #[arg(long, default_value = "text")]
    log_format: LogFormat,
}

#[derive(Clone, Debug, ValueEnum)]
enum LogFormat {
    Text,
    Json,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(&cli.log_format);

    let url = AnalyzeRequest {
        url: Some(cli.url.clone()),
    }
    .validate()
    .map_err(anyhow::Error::msg)?
    .to_string();

    let mut config = Config::from_env()?;
    if let Some(model) = cli.model {
        config.engine_mut().model = model;
    }
    if !config.engine().is_configured() {
        bail!("OPENAI_API_KEY is not set");
    }

    let state = AppState::from_config(&config)?;
    let result = state
        .analyzer
        .analyze(&url)
        .await
        .with_context(|| format!("analysis of {url} failed"))?;

    let json = if cli.pretty {
        serde_json::to_string_pretty(&result)?
    } else {
        serde_json::to_string(&result)?
    };
    println!("{json}");
    Ok(())
}

fn init_tracing(format: &LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    match format {
        LogFormat::Text => builder.init(),
        LogFormat::Json => builder.json().init(),
    }
}
