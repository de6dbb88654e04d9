use std::sync::Arc;
use clap::Parser;
use ec_core::Result;
use ec_inference::{create_model, Config, Gpt2Tokenizer, InferenceConfig, Orchestrator, Summarizer};
use ec_storage::{BackendConfig, DEFAULT_WEAVIATE_URL};
use ec_web::AppState;
use tracing::info;

mod logging;

#[derive(Parser, Debug)]
#[command(author, version, about = "Economic country summaries over a Weaviate feed", long_about = None)]
pub struct Cli {
    #[arg(long, env = "STORAGE", default_value = "weaviate", help = "Feed store: weaviate (default), memory")]
    storage: String,
    #[arg(long, env = "WEAVIATE_URL", default_value = DEFAULT_WEAVIATE_URL)]
    backend_url: String,
    #[arg(long, env = "WEAVIATE_API_KEY", hide_env_values = true)]
    backend_api_key: Option<String>,
    #[arg(long, env = "OPEN_AI_KEY", hide_env_values = true)]
    api_key: Option<String>,
    #[arg(long, env = "MODEL", default_value = "openai", help = "Completion model: openai (default), dummy")]
    model: String,
    #[arg(long, env = "MODEL_NAME", default_value = ec_inference::DEFAULT_MODEL_NAME)]
    model_name: String,
    #[arg(long, env = "OPENAI_BASE_URL")]
    model_url: Option<String>,
    /// Add a 1-10 risk score (`dangerous_level`) to every country summary
    #[arg(long, env = "RISK_LEVEL")]
    risk_level: bool,
    #[arg(long, env = "BIND_ADDR", default_value = "0.0.0.0:8000")]
    bind: String,
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(clap::Subcommand, Debug, PartialEq)]
enum Commands {
    /// Run the HTTP server (default)
    Serve,
    /// Print summaries for the given countries as JSON
    Summary {
        #[arg(required = true)]
        countries: Vec<String>,
    },
}

impl Cli {
    fn backend_config(&self) -> BackendConfig {
        BackendConfig::new(self.backend_url.clone())
            .with_api_key(self.backend_api_key.clone())
            .with_openai_key(self.api_key.clone())
    }

    fn inference_config(&self) -> Config {
        Config {
            api_key: self.api_key.clone(),
            model: self.model.clone(),
            inference_config: InferenceConfig {
                model_url: self.model_url.clone(),
                model_name: self.model_name.clone(),
                risk_assessment: self.risk_level,
            },
        }
    }
}

async fn build_orchestrator(cli: &Cli) -> Result<Orchestrator> {
    let storage = ec_storage::create_storage(&cli.storage, cli.backend_config()).await?;
    info!("Storage initialized (using {})", storage.name());

    let config = cli.inference_config();
    let model = create_model(Some(config.clone())).await?;
    info!("Completion model initialized (using {} with {})", model.name(), config.inference_config.model_name);

    let tokenizer = Arc::new(Gpt2Tokenizer::new()?);
    let summarizer = Summarizer::new(model, tokenizer, config.inference_config.model_name);
    Ok(Orchestrator::new(storage, summarizer)
        .with_risk_assessment(config.inference_config.risk_assessment))
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    logging::init_logging();
    let cli = Cli::parse();

    let orchestrator = build_orchestrator(&cli).await?;

    match cli.command.unwrap_or(Commands::Serve) {
        Commands::Serve => {
            ec_web::serve(AppState::new(orchestrator), &cli.bind).await?;
        }
        Commands::Summary { countries } => {
            let summaries = orchestrator.country_summaries(&countries).await?;
            println!("{}", serde_json::to_string_pretty(&summaries)?);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_summary_command() {
        let cli = Cli::try_parse_from([
            "ecosum", "--storage", "memory", "--model", "dummy", "--risk-level",
            "summary", "Germany", "France",
        ]).unwrap();
        assert_eq!(cli.storage, "memory");
        assert!(cli.risk_level);
        assert_eq!(cli.command, Some(Commands::Summary {
            countries: vec!["Germany".to_string(), "France".to_string()],
        }));
        let config = cli.inference_config();
        assert_eq!(config.model, "dummy");
        assert!(config.inference_config.risk_assessment);
    }

    #[tokio::test]
    async fn test_offline_summary() {
        let cli = Cli::try_parse_from([
            "ecosum", "--storage", "memory", "--model", "dummy", "summary", "Chile",
        ]).unwrap();
        let orchestrator = build_orchestrator(&cli).await.unwrap();
        let summaries = orchestrator.country_summaries(&["Chile".to_string()]).await.unwrap();
        assert_eq!(summaries.len(), 1);
        assert_eq!(summaries[0].country, "Chile");
        assert!(summaries[0].links.is_empty());
    }
}
