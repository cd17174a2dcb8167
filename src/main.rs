use clap::Parser;
use job_scout::agent::{ChatAgent, ScrapeJobsTool, ToolRegistry};
use job_scout::conversation::spawn_line_reader;
use job_scout::fetchers::ReqwestFetcher;
use job_scout::{AppConfig, Conversation, JobExtractor};
use std::io::BufReader;
use std::process::ExitCode;
use std::sync::Arc;

mod args;
use args::Args;

/// Exit code for configuration failures at startup
const EXIT_CONFIG: u8 = 2;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    // Initialize logging
    env_logger::init();

    let _args = Args::parse();

    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            ::log::error!("Invalid configuration: {}", e);
            eprintln!("Configuration error: {e}");
            return ExitCode::from(EXIT_CONFIG);
        }
    };

    let mut conversation = match build_conversation(&config) {
        Ok(conversation) => conversation,
        Err(e) => {
            ::log::error!("Failed to start: {}", e);
            eprintln!("Startup error: {e}");
            return ExitCode::from(EXIT_CONFIG);
        }
    };

    println!("Job search assistant ready. Ask for jobs, or type 'quit' to exit.");

    let input = spawn_line_reader(BufReader::new(std::io::stdin()));
    let mut stdout = std::io::stdout();
    if let Err(e) = conversation.run(input, &mut stdout, interrupted()).await {
        ::log::error!("Console I/O failed: {}", e);
    }

    ExitCode::SUCCESS
}

fn build_conversation(
    config: &AppConfig,
) -> Result<Conversation<ChatAgent>, Box<dyn std::error::Error>> {
    let fetcher = Arc::new(ReqwestFetcher::new(config.scrape.timeout)?);
    let extractor = JobExtractor::new(&config.scrape, fetcher)?;
    let tools = ToolRegistry::new().with_tool(Arc::new(ScrapeJobsTool::new(extractor)));
    let agent = ChatAgent::new(&config.agent, tools)?;

    Ok(Conversation::new(agent))
}

/// Resolves on Ctrl-C; never resolves if the handler cannot be installed
async fn interrupted() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        ::log::warn!("Unable to listen for Ctrl-C: {}", e);
        std::future::pending::<()>().await;
    }
}
